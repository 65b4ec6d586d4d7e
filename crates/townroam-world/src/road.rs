use glam::Vec2;
use townroam_core::config::RoadConfig;
use townroam_core::math::{distance_to_grid_line, nearest_grid_line};
use townroam_core::types::{Axis, Coordinate, RoadClass, RoadInfo};

/// Fixed-point iterations for lane solving. The map contracts by at least
/// `1 - k1*a1` per step, so this is far below f32 precision for sane configs.
const LANE_SOLVE_ITERATIONS: usize = 12;

/// Raw grid tests before precedence is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridFlags {
    pub on_main_x: bool,
    pub on_main_z: bool,
    pub on_street_x: bool,
    pub on_street_z: bool,
}

/// The road grid oracle: a warped periodic grid of main avenues with minor
/// streets in between.
///
/// Every query is a pure function of the position and the road config.
#[derive(Debug, Clone)]
pub struct RoadGrid {
    config: RoadConfig,
}

impl RoadGrid {
    pub fn new(config: RoadConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RoadConfig {
        &self.config
    }

    /// `sin(a*k1)*a1 + cos(b*k2)*a2`
    fn warp(&self, a: f32, b: f32) -> f32 {
        let c = &self.config;
        (a * c.warp_k1).sin() * c.warp_a1 + (b * c.warp_k2).cos() * c.warp_a2
    }

    /// Map a world position into warped grid space.
    pub fn warped(&self, pos: Coordinate) -> Vec2 {
        Vec2::new(
            pos.x + self.warp(pos.x, pos.y),
            pos.y + self.warp(pos.y, pos.x),
        )
    }

    /// Per-axis main/street tests at a world position.
    pub fn grid_flags(&self, x: f32, z: f32) -> GridFlags {
        let c = &self.config;
        let w = self.warped(Vec2::new(x, z));
        GridFlags {
            on_main_x: distance_to_grid_line(w.x, c.main_spacing) < c.main_half_width,
            on_main_z: distance_to_grid_line(w.y, c.main_spacing) < c.main_half_width,
            on_street_x: distance_to_grid_line(w.x, c.street_spacing) < c.street_half_width,
            on_street_z: distance_to_grid_line(w.y, c.street_spacing) < c.street_half_width,
        }
    }

    /// Classify a world position. Main avenues take precedence over streets.
    pub fn classify(&self, x: f32, z: f32) -> RoadInfo {
        let f = self.grid_flags(x, z);
        let is_main = f.on_main_x || f.on_main_z;
        let is_street = !is_main && (f.on_street_x || f.on_street_z);
        let class = if is_main {
            RoadClass::Main
        } else if is_street {
            RoadClass::Street
        } else {
            RoadClass::None
        };
        let axis = if f.on_main_x || f.on_street_x {
            Axis::Vertical
        } else {
            Axis::Horizontal
        };
        RoadInfo {
            is_road: is_main || is_street,
            class,
            axis,
        }
    }

    pub fn classify_at(&self, pos: Coordinate) -> RoadInfo {
        self.classify(pos.x, pos.y)
    }

    /// Half-width of a road class (zero for `None`).
    pub fn half_width(&self, class: RoadClass) -> f32 {
        match class {
            RoadClass::Main => self.config.main_half_width,
            RoadClass::Street => self.config.street_half_width,
            RoadClass::None => 0.0,
        }
    }

    /// Line spacing of a road class (main spacing for `None`).
    pub fn spacing(&self, class: RoadClass) -> f32 {
        match class {
            RoadClass::Street => self.config.street_spacing,
            RoadClass::Main | RoadClass::None => self.config.main_spacing,
        }
    }

    /// Nearest avenue centre line to a warped coordinate.
    pub fn nearest_main_line(&self, warped: f32) -> f32 {
        nearest_grid_line(warped, self.config.main_spacing)
    }

    /// World `x` whose warped x equals `line` at depth `z`.
    pub fn solve_lane_x(&self, line: f32, z: f32) -> f32 {
        let c = &self.config;
        let cross = (z * c.warp_k2).cos() * c.warp_a2;
        let mut x = line - cross;
        for _ in 0..LANE_SOLVE_ITERATIONS {
            x = line - (x * c.warp_k1).sin() * c.warp_a1 - cross;
        }
        x
    }

    /// World `z` whose warped z equals `line` at `x`.
    pub fn solve_lane_z(&self, line: f32, x: f32) -> f32 {
        let c = &self.config;
        let cross = (x * c.warp_k2).cos() * c.warp_a2;
        let mut z = line - cross;
        for _ in 0..LANE_SOLVE_ITERATIONS {
            z = line - (z * c.warp_k1).sin() * c.warp_a1 - cross;
        }
        z
    }

    /// Project `pos` onto the road that follows `axis` with warped centre
    /// `line`, keeping its along-axis coordinate.
    pub fn snap_to_line(&self, pos: Coordinate, axis: Axis, line: f32) -> Coordinate {
        match axis {
            Axis::Vertical => Vec2::new(self.solve_lane_x(line, pos.y), pos.y),
            Axis::Horizontal => Vec2::new(pos.x, self.solve_lane_z(line, pos.x)),
        }
    }
}

impl Default for RoadGrid {
    fn default() -> Self {
        Self::new(RoadConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> impl Iterator<Item = (f32, f32)> {
        (-150..150).flat_map(|i| (-150..150).map(move |j| (i as f32 * 1.3, j as f32 * 1.7)))
    }

    #[test]
    fn test_classify_is_pure() {
        let grid = RoadGrid::default();
        for (x, z) in sample_points().step_by(97) {
            assert_eq!(grid.classify(x, z), grid.classify(x, z));
        }
    }

    #[test]
    fn test_main_precedence_over_street() {
        let grid = RoadGrid::default();
        let mut overlaps = 0;
        for (x, z) in sample_points() {
            let f = grid.grid_flags(x, z);
            let main = f.on_main_x || f.on_main_z;
            let street = f.on_street_x || f.on_street_z;
            let info = grid.classify(x, z);
            if main && street {
                overlaps += 1;
                assert_eq!(
                    info.class,
                    RoadClass::Main,
                    "overlap at ({x}, {z}) must classify as main"
                );
            }
            assert_eq!(info.is_road, main || street);
        }
        assert!(overlaps > 0, "sample should contain main/street overlaps");
    }

    #[test]
    fn test_all_classes_occur() {
        let grid = RoadGrid::default();
        let mut seen = [false; 3];
        for (x, z) in sample_points() {
            match grid.classify(x, z).class {
                RoadClass::Main => seen[0] = true,
                RoadClass::Street => seen[1] = true,
                RoadClass::None => seen[2] = true,
            }
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn test_axis_follows_x_tests() {
        let grid = RoadGrid::default();
        for (x, z) in sample_points().step_by(7) {
            let f = grid.grid_flags(x, z);
            let info = grid.classify(x, z);
            if f.on_main_x || f.on_street_x {
                assert_eq!(info.axis, Axis::Vertical);
            } else {
                assert_eq!(info.axis, Axis::Horizontal);
            }
        }
    }

    #[test]
    fn test_grid_is_warped() {
        let grid = RoadGrid::default();
        // The avenue x = 0 in warped space drifts in world x as z changes.
        let x_a = grid.solve_lane_x(0.0, 0.0);
        let x_b = grid.solve_lane_x(0.0, 50.0);
        assert!((x_a - x_b).abs() > 0.5, "avenue should not be straight");
    }

    #[test]
    fn test_solved_lane_hits_line() {
        let grid = RoadGrid::default();
        for line in [-120.0, 0.0, 60.0, 600.0] {
            for depth in [-333.0, -10.0, 0.0, 17.5, 480.0] {
                let x = grid.solve_lane_x(line, depth);
                let w = grid.warped(Vec2::new(x, depth));
                assert!((w.x - line).abs() < 1e-3, "x lane miss: {} vs {line}", w.x);
                assert!(grid.classify(x, depth).is_main());

                let z = grid.solve_lane_z(line, depth);
                let w = grid.warped(Vec2::new(depth, z));
                assert!((w.y - line).abs() < 1e-3, "z lane miss: {} vs {line}", w.y);
                assert!(grid.classify(depth, z).is_main());
            }
        }
    }

    #[test]
    fn test_street_line_between_avenues() {
        let grid = RoadGrid::default();
        let found = (0..200).map(|i| i as f32 * 0.9).any(|z| {
            let x = grid.solve_lane_x(20.0, z);
            let info = grid.classify(x, z);
            info.class == RoadClass::Street && info.axis == Axis::Vertical
        });
        assert!(found, "warped x = 20 should be a vertical street somewhere");
    }
}
