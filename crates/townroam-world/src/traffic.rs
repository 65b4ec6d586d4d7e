//! Grid-following vehicle movement.
//!
//! Each tick a vehicle moves along its axis and is then re-snapped onto its
//! lane, so it can never leave the avenue it follows. Crossing another avenue
//! may turn it onto that avenue.

use townroam_core::config::TrafficConfig;
use townroam_core::types::{Axis, Coordinate};

use crate::chunk::Vehicle;
use crate::road::RoadGrid;

/// Warped coordinate of the lane a vehicle keeps to. Traffic keeps right of
/// the centre line relative to its direction of travel.
fn lane_target(traffic: &TrafficConfig, vehicle: &Vehicle) -> f32 {
    let side = match vehicle.axis {
        Axis::Vertical => vehicle.direction,
        Axis::Horizontal => -vehicle.direction,
    };
    vehicle.lane_line + side * traffic.lane_offset
}

/// The vehicle's position projected onto its lane.
pub fn lane_position(grid: &RoadGrid, traffic: &TrafficConfig, vehicle: &Vehicle) -> Coordinate {
    grid.snap_to_line(vehicle.position, vehicle.axis, lane_target(traffic, vehicle))
}

/// Warped coordinate along the direction of travel.
fn along(grid: &RoadGrid, vehicle: &Vehicle) -> f32 {
    let w = grid.warped(vehicle.position);
    match vehicle.axis {
        Axis::Vertical => w.y,
        Axis::Horizontal => w.x,
    }
}

/// The grid line passed when moving from `before` to `after`, if any.
fn crossed_line(before: f32, after: f32, spacing: f32) -> Option<f32> {
    let a = (before / spacing).floor();
    let b = (after / spacing).floor();
    if a == b {
        None
    } else {
        Some(a.max(b) * spacing)
    }
}

/// Advance one vehicle by `dt` seconds.
pub fn step_vehicle(vehicle: &mut Vehicle, dt: f32, grid: &RoadGrid, traffic: &TrafficConfig) {
    let spacing = grid.config().main_spacing;
    let before = along(grid, vehicle);

    vehicle.position += vehicle.heading() * vehicle.speed * dt;
    vehicle.position = lane_position(grid, traffic, vehicle);

    vehicle.turn_cooldown = (vehicle.turn_cooldown - vehicle.speed * dt).max(0.0);

    let after = along(grid, vehicle);
    if let Some(line) = crossed_line(before, after, spacing) {
        // The cooldown keeps a vehicle from turning twice in one intersection.
        if vehicle.turn_cooldown <= 0.0 && vehicle.rng.chance(traffic.turn_chance) {
            vehicle.axis = vehicle.axis.perpendicular();
            vehicle.lane_line = line;
            vehicle.direction = vehicle.rng.sign();
            vehicle.position = lane_position(grid, traffic, vehicle);
            vehicle.turn_cooldown = spacing * 0.5;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::ChunkGenerator;
    use glam::{IVec2, Vec2};
    use townroam_core::config::WorldConfig;
    use townroam_core::rng::ChunkRng;
    use townroam_core::types::RoadClass;

    fn spawn(gen: &ChunkGenerator, at: Vec2, seed: u64) -> Vehicle {
        gen.vehicle_from_candidate(at, &mut ChunkRng::new(seed))
            .expect("candidate on avenue")
    }

    #[test]
    fn test_crossed_line() {
        assert_eq!(crossed_line(55.0, 61.0, 60.0), Some(60.0));
        assert_eq!(crossed_line(61.0, 55.0, 60.0), Some(60.0));
        assert_eq!(crossed_line(-1.0, 1.0, 60.0), Some(0.0));
        assert_eq!(crossed_line(10.0, 20.0, 60.0), None);
    }

    #[test]
    fn test_vehicle_stays_on_main_road() {
        let gen = ChunkGenerator::new(WorldConfig::default());
        let traffic = &gen.config().traffic;
        let mut vehicles = vec![
            spawn(&gen, Vec2::new(0.0, 10.0), 1),
            spawn(&gen, Vec2::new(10.0, 0.0), 2),
            spawn(&gen, Vec2::new(120.0, -45.0), 3),
        ];
        for key in [IVec2::new(0, 0), IVec2::new(3, -1), IVec2::new(-6, 4)] {
            vehicles.extend(gen.generate(key).vehicles);
        }

        for v in &mut vehicles {
            for tick in 0..3000 {
                step_vehicle(v, 1.0 / 30.0, gen.grid(), traffic);
                let info = gen.grid().classify_at(v.position);
                assert!(info.is_road, "tick {tick}: vehicle left the road");
                assert_eq!(info.class, RoadClass::Main, "tick {tick}: vehicle on minor road");
            }
        }
    }

    #[test]
    fn test_vehicle_moves_along_axis() {
        let gen = ChunkGenerator::new(WorldConfig::default());
        let mut v = spawn(&gen, Vec2::new(0.0, 10.0), 4);
        let start = v.position;
        let mut no_turn = gen.config().traffic.clone();
        no_turn.turn_chance = 0.0;
        for _ in 0..30 {
            step_vehicle(&mut v, 1.0 / 30.0, gen.grid(), &no_turn);
        }
        let travelled = (v.position.y - start.y) * v.direction;
        assert!(
            (travelled - v.speed).abs() < 1e-3,
            "expected {} units, got {travelled}",
            v.speed
        );
        assert_eq!(v.axis, Axis::Vertical);
    }

    #[test]
    fn test_vehicle_turns_at_intersection() {
        let gen = ChunkGenerator::new(WorldConfig::default());
        let mut always = gen.config().traffic.clone();
        always.turn_chance = 1.0;
        let mut v = spawn(&gen, Vec2::new(0.0, 10.0), 9);
        let axis = v.axis;
        // Reaches the next avenue within 60 units in either direction.
        let mut turned = false;
        for _ in 0..(60.0 * 30.0 / v.speed) as usize + 30 {
            step_vehicle(&mut v, 1.0 / 30.0, gen.grid(), &always);
            if v.axis != axis {
                turned = true;
                break;
            }
        }
        assert!(turned, "vehicle should have turned");
        assert_eq!(v.lane_line % 60.0, 0.0);
        assert!(gen.grid().classify_at(v.position).is_main());
    }

    #[test]
    fn test_vehicle_motion_reproducible() {
        let gen = ChunkGenerator::new(WorldConfig::default());
        let traffic = &gen.config().traffic;
        let mut a = gen.generate(IVec2::new(0, 0)).vehicles;
        let mut b = gen.generate(IVec2::new(0, 0)).vehicles;
        for _ in 0..500 {
            for v in a.iter_mut().chain(b.iter_mut()) {
                step_vehicle(v, 0.05, gen.grid(), traffic);
            }
        }
        assert_eq!(a, b);
    }
}
