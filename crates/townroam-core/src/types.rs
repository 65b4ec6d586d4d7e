use glam::{IVec2, Vec2};

/// Chunk key in chunk-space (each unit = one chunk side length).
pub type ChunkKey = IVec2;

/// Continuous position on the ground plane: `x` is world X, `y` is world Z.
pub type Coordinate = Vec2;

/// Class of road at a point. Main avenues dominate streets where both apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoadClass {
    Main,
    Street,
    None,
}

/// World axis a road segment runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Runs along Z (constant X).
    Vertical,
    /// Runs along X (constant Z).
    Horizontal,
}

impl Axis {
    /// The other axis.
    pub fn perpendicular(self) -> Self {
        match self {
            Axis::Vertical => Axis::Horizontal,
            Axis::Horizontal => Axis::Vertical,
        }
    }

    /// Unit direction of travel along this axis.
    pub fn unit(self) -> Vec2 {
        match self {
            Axis::Vertical => Vec2::Y,
            Axis::Horizontal => Vec2::X,
        }
    }
}

/// Result of classifying a ground point against the road grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoadInfo {
    pub is_road: bool,
    pub class: RoadClass,
    pub axis: Axis,
}

impl RoadInfo {
    pub fn is_main(&self) -> bool {
        self.class == RoadClass::Main
    }
}
