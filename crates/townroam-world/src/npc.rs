use glam::Vec2;
use townroam_core::config::NpcConfig;
use townroam_core::math::smoothing_factor;
use townroam_core::types::Coordinate;

use crate::chunk::Npc;
use crate::road::RoadGrid;

/// Tries before an NPC gives up and heads back to its spawn point.
const TARGET_ATTEMPTS: usize = 4;

/// Draw a new off-road wander target around the NPC's spawn point.
fn pick_target(npc: &mut Npc, grid: &RoadGrid, cfg: &NpcConfig) -> Coordinate {
    let r = cfg.wander_radius;
    for _ in 0..TARGET_ATTEMPTS {
        let offset = Vec2::new(npc.rng.range_f32(-r, r), npc.rng.range_f32(-r, r));
        let candidate = npc.spawn + offset;
        if !grid.classify_at(candidate).is_road {
            return candidate;
        }
    }
    npc.spawn
}

/// Ease an NPC toward its target; pick a new target once it arrives.
pub fn step_npc(npc: &mut Npc, dt: f32, grid: &RoadGrid, cfg: &NpcConfig) {
    let k = smoothing_factor(cfg.follow_rate, dt);
    npc.position += (npc.target - npc.position) * k;
    if npc.position.distance(npc.target) < cfg.arrive_distance {
        npc.target = pick_target(npc, grid, cfg);
    }
}
