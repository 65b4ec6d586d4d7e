use glam::Vec2;
use townroam_core::rng::ChunkRng;
use townroam_core::types::{Axis, ChunkKey, Coordinate, RoadClass};

/// Lifecycle of a chunk key in the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkState {
    /// Not generated, or evicted. Requesting it generates fresh content.
    Absent,
    /// Generated and held by the cache.
    Resident,
}

/// A sampled point of road surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadSample {
    pub position: Coordinate,
    pub axis: Axis,
    pub class: RoadClass,
}

/// Axis-aligned building footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Building {
    /// Footprint centre.
    pub position: Coordinate,
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    /// Visual style index for the renderer.
    pub style: u32,
}

impl Building {
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.depth * 0.5)
    }

    pub fn min(&self) -> Vec2 {
        self.position - self.half_extents()
    }

    pub fn max(&self) -> Vec2 {
        self.position + self.half_extents()
    }

    /// 3x3 grid over the footprint: corners, edge midpoints and centre.
    pub fn footprint_points(&self) -> [Coordinate; 9] {
        let h = self.half_extents();
        let mut points = [self.position; 9];
        let mut i = 0;
        for sz in [-1.0, 0.0, 1.0] {
            for sx in [-1.0, 0.0, 1.0] {
                points[i] = self.position + Vec2::new(sx * h.x, sz * h.y);
                i += 1;
            }
        }
        points
    }

    /// Whether two footprints, each grown by `gap / 2`, overlap.
    pub fn overlaps(&self, other: &Building, gap: f32) -> bool {
        let reach = self.half_extents() + other.half_extents() + Vec2::splat(gap);
        let d = (self.position - other.position).abs();
        d.x < reach.x && d.y < reach.y
    }

    /// Whether a circle intersects the footprint.
    pub fn intersects_circle(&self, center: Coordinate, radius: f32) -> bool {
        let closest = center.clamp(self.min(), self.max());
        closest.distance_squared(center) < radius * radius
    }
}

/// What an NPC talks about when the player approaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogueKind {
    Greeting,
    Directions,
    Rumor,
    Shopkeeper,
}

impl DialogueKind {
    pub const ALL: [DialogueKind; 4] = [
        DialogueKind::Greeting,
        DialogueKind::Directions,
        DialogueKind::Rumor,
        DialogueKind::Shopkeeper,
    ];
}

/// A pedestrian. `spawn` is fixed layout; `position` and `target` move.
#[derive(Debug, Clone, PartialEq)]
pub struct Npc {
    pub spawn: Coordinate,
    pub position: Coordinate,
    pub target: Coordinate,
    pub kind: DialogueKind,
    pub(crate) rng: ChunkRng,
}

/// A car bound to the main-avenue grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub position: Coordinate,
    /// Axis the vehicle currently drives along.
    pub axis: Axis,
    /// +1.0 or -1.0 along `axis`.
    pub direction: f32,
    /// Warped-space centre line of the avenue being followed.
    pub lane_line: f32,
    pub speed: f32,
    /// Visual variant index for the renderer.
    pub variant: u32,
    /// Distance left before the vehicle may turn again.
    pub(crate) turn_cooldown: f32,
    pub(crate) rng: ChunkRng,
}

impl Vehicle {
    /// Unit heading in world space.
    pub fn heading(&self) -> Vec2 {
        self.axis.unit() * self.direction
    }
}

/// Everything generated for one chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkContent {
    pub key: ChunkKey,
    pub roads: Vec<RoadSample>,
    pub buildings: Vec<Building>,
    pub npcs: Vec<Npc>,
    pub vehicles: Vec<Vehicle>,
}

impl ChunkContent {
    pub fn new(key: ChunkKey) -> Self {
        Self {
            key,
            roads: Vec::new(),
            buildings: Vec::new(),
            npcs: Vec::new(),
            vehicles: Vec::new(),
        }
    }

    /// NPC spawn points, which never change after generation.
    pub fn npc_spawns(&self) -> impl Iterator<Item = (Coordinate, DialogueKind)> + '_ {
        self.npcs.iter().map(|n| (n.spawn, n.kind))
    }
}
