use glam::Vec2;
use townroam_core::config::PlayerConfig;
use townroam_core::types::Coordinate;

use crate::chunk::Building;

/// One frame of joystick input. `joystick` is clamped to unit length.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSample {
    pub joystick: Vec2,
}

impl InputSample {
    pub fn new(x: f32, z: f32) -> Self {
        Self {
            joystick: Vec2::new(x, z),
        }
    }

    pub fn idle() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    pub position: Coordinate,
    /// Yaw in radians, 0 facing +Z.
    pub heading: f32,
}

impl PlayerState {
    pub fn at(position: Coordinate) -> Self {
        Self {
            position,
            heading: 0.0,
        }
    }
}

fn blocked(pos: Coordinate, radius: f32, obstacles: &[&Building], from: Coordinate) -> bool {
    // Footprints the player already overlaps never block, so a player spawned
    // inside one can walk out.
    obstacles
        .iter()
        .any(|b| b.intersects_circle(pos, radius) && !b.intersects_circle(from, radius))
}

/// Displacement the input asks for this tick, before collision.
pub fn requested_delta(input: InputSample, dt: f32, cfg: &PlayerConfig) -> Vec2 {
    input.joystick.clamp_length_max(1.0) * cfg.move_speed * dt
}

/// Move the player for one tick. Each axis is tried separately so the player
/// slides along building walls instead of sticking to them.
pub fn step_player(
    player: &PlayerState,
    input: InputSample,
    dt: f32,
    cfg: &PlayerConfig,
    obstacles: &[&Building],
) -> PlayerState {
    let dir = input.joystick.clamp_length_max(1.0);
    if dir == Vec2::ZERO {
        return *player;
    }
    let delta = requested_delta(input, dt, cfg);

    let mut pos = player.position;
    let try_x = pos + Vec2::new(delta.x, 0.0);
    if !blocked(try_x, cfg.radius, obstacles, pos) {
        pos = try_x;
    }
    let try_z = pos + Vec2::new(0.0, delta.y);
    if !blocked(try_z, cfg.radius, obstacles, pos) {
        pos = try_z;
    }

    PlayerState {
        position: pos,
        heading: dir.x.atan2(dir.y),
    }
}
