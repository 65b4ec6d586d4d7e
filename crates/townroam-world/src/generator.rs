use glam::Vec2;
use townroam_core::config::WorldConfig;
use townroam_core::math::{chunk_center, chunk_origin, nearest_grid_line};
use townroam_core::rng::ChunkRng;
use townroam_core::types::{Axis, ChunkKey, Coordinate, RoadClass};

use crate::chunk::{Building, ChunkContent, DialogueKind, Npc, RoadSample, Vehicle};
use crate::road::RoadGrid;

/// Minimum clearance kept between neighbouring buildings.
const BUILDING_GAP: f32 = 1.0;

/// Draws per NPC before it is dropped.
const NPC_SPAWN_ATTEMPTS: usize = 4;

/// Sidewalk passes. The second settles the small shift one axis's snap
/// causes in the other axis's warped coordinate.
const NUDGE_PASSES: usize = 3;

/// Deterministic per-chunk content generator.
///
/// `generate(key)` depends only on the key and the config it was built with,
/// so an evicted chunk regenerates with the same layout.
#[derive(Debug, Clone)]
pub struct ChunkGenerator {
    config: WorldConfig,
    grid: RoadGrid,
}

impl ChunkGenerator {
    pub fn new(config: WorldConfig) -> Self {
        let grid = RoadGrid::new(config.roads.clone());
        Self { config, grid }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn grid(&self) -> &RoadGrid {
        &self.grid
    }

    pub fn chunk_size(&self) -> f32 {
        self.config.chunk_size
    }

    /// Generate the full content of a chunk.
    ///
    /// Stages draw from one seeded stream in a fixed order:
    /// - road samples (no randomness)
    /// - buildings, by rejection sampling against roads and each other
    /// - NPC spawns, pushed onto the sidewalk when drawn on a road
    /// - vehicle candidates, kept only on main avenues
    pub fn generate(&self, key: ChunkKey) -> ChunkContent {
        let mut rng = ChunkRng::for_chunk(key, self.config.world_seed);
        let mut content = ChunkContent::new(key);

        content.roads = self.sample_roads(key);
        content.buildings = self.place_buildings(key, &mut rng);
        content.npcs = self.place_npcs(key, &mut rng);
        content.vehicles = self.place_vehicles(key, &mut rng);

        log::debug!(
            "Generated chunk ({}, {}): {} road samples, {} buildings, {} npcs, {} vehicles",
            key.x,
            key.y,
            content.roads.len(),
            content.buildings.len(),
            content.npcs.len(),
            content.vehicles.len()
        );
        content
    }

    /// Classify a coarse sub-grid of the chunk and keep the road points.
    fn sample_roads(&self, key: ChunkKey) -> Vec<RoadSample> {
        let size = self.config.chunk_size;
        let step = self.config.population.road_sample_step;
        let origin = chunk_origin(key, size);
        let per_side = (size / step).ceil() as i32;

        let mut roads = Vec::new();
        for iz in 0..per_side {
            for ix in 0..per_side {
                let position = origin + Vec2::new(ix as f32 * step, iz as f32 * step);
                let info = self.grid.classify_at(position);
                if info.is_road {
                    roads.push(RoadSample {
                        position,
                        axis: info.axis,
                        class: info.class,
                    });
                }
            }
        }
        roads
    }

    fn random_point(&self, key: ChunkKey, rng: &mut ChunkRng) -> Coordinate {
        let size = self.config.chunk_size;
        chunk_origin(key, size) + Vec2::new(rng.next_f32() * size, rng.next_f32() * size)
    }

    /// Centre for a footprint with half extents `half` that keeps the whole
    /// footprint inside the chunk, so buildings of neighbouring chunks never
    /// overlap. Footprints wider than the chunk are centred.
    fn footprint_center(&self, key: ChunkKey, half: Vec2, rng: &mut ChunkRng) -> Coordinate {
        let size = self.config.chunk_size;
        let origin = chunk_origin(key, size);
        let axis = |h: f32, u: f32| {
            let room = size - 2.0 * h;
            if room > 0.0 {
                h + u * room
            } else {
                size * 0.5
            }
        };
        let (ux, uz) = (rng.next_f32(), rng.next_f32());
        origin + Vec2::new(axis(half.x, ux), axis(half.y, uz))
    }

    fn place_buildings(&self, key: ChunkKey, rng: &mut ChunkRng) -> Vec<Building> {
        let pop = &self.config.population;
        let wanted = rng.range_u32(pop.buildings_min, pop.buildings_max) as usize;
        let mut buildings: Vec<Building> = Vec::with_capacity(wanted);

        let mut attempts = 0;
        while buildings.len() < wanted && attempts < pop.placement_attempts {
            attempts += 1;
            let width = rng.range_f32(pop.building_width.0, pop.building_width.1);
            let depth = rng.range_f32(pop.building_width.0, pop.building_width.1);
            let candidate = Building {
                position: self.footprint_center(key, Vec2::new(width, depth) * 0.5, rng),
                width,
                depth,
                height: rng.range_f32(pop.building_height.0, pop.building_height.1),
                style: rng.range_u32(0, 3),
            };
            if self.building_fits(&candidate, &buildings) {
                buildings.push(candidate);
            }
        }

        if buildings.len() < wanted {
            log::debug!(
                "Chunk ({}, {}): placed {}/{} buildings after {} attempts",
                key.x,
                key.y,
                buildings.len(),
                wanted,
                attempts
            );
        }
        buildings
    }

    /// A building fits if no footprint point is on a road and it keeps its
    /// distance from every already placed building.
    pub fn building_fits(&self, candidate: &Building, placed: &[Building]) -> bool {
        let on_road = candidate
            .footprint_points()
            .iter()
            .any(|p| self.grid.classify_at(*p).is_road);
        !on_road && !placed.iter().any(|b| b.overlaps(candidate, BUILDING_GAP))
    }

    fn place_npcs(&self, key: ChunkKey, rng: &mut ChunkRng) -> Vec<Npc> {
        let pop = &self.config.population;
        let count = rng.range_u32(pop.npcs_min, pop.npcs_max);
        let mut npcs = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let spawn = (0..NPC_SPAWN_ATTEMPTS)
                .map(|_| self.nudge_to_sidewalk(self.random_point(key, rng)))
                .find(|p| !self.grid.classify_at(*p).is_road);
            let kind = DialogueKind::ALL[rng.range_u32(0, 3) as usize];
            let Some(spawn) = spawn else {
                log::trace!(
                    "Chunk ({}, {}): dropped npc, no sidewalk spot in {} draws",
                    key.x,
                    key.y,
                    NPC_SPAWN_ATTEMPTS
                );
                continue;
            };
            npcs.push(Npc {
                spawn,
                position: spawn,
                target: spawn,
                kind,
                rng: rng.fork(),
            });
        }
        npcs
    }

    /// Move a point off every road it stands on. For each axis whose road
    /// test passes, the point is placed on the sidewalk line: the road's
    /// centre line plus half width and margin, on the side the point was
    /// already on. Off-road points are returned unchanged.
    pub fn nudge_to_sidewalk(&self, pos: Coordinate) -> Coordinate {
        let mut pos = pos;
        for _ in 0..NUDGE_PASSES {
            let f = self.grid.grid_flags(pos.x, pos.y);
            let w = self.grid.warped(pos);
            let target_x = self.sidewalk_line(w.x, f.on_main_x, f.on_street_x);
            if let Some(line) = target_x {
                pos = self.grid.snap_to_line(pos, Axis::Vertical, line);
            }

            let f = self.grid.grid_flags(pos.x, pos.y);
            let w = self.grid.warped(pos);
            let target_z = self.sidewalk_line(w.y, f.on_main_z, f.on_street_z);
            if let Some(line) = target_z {
                pos = self.grid.snap_to_line(pos, Axis::Horizontal, line);
            }

            if target_x.is_none() && target_z.is_none() {
                break;
            }
        }
        pos
    }

    /// Warped sidewalk coordinate for one axis, or `None` when that axis is
    /// not on a road.
    fn sidewalk_line(&self, warped: f32, on_main: bool, on_street: bool) -> Option<f32> {
        let class = if on_main {
            RoadClass::Main
        } else if on_street {
            RoadClass::Street
        } else {
            return None;
        };
        let line = nearest_grid_line(warped, self.grid.spacing(class));
        let offset = self.grid.half_width(class) + self.config.population.sidewalk_margin;
        Some(line + side_or_positive(warped - line) * offset)
    }

    fn place_vehicles(&self, key: ChunkKey, rng: &mut ChunkRng) -> Vec<Vehicle> {
        let size = self.config.chunk_size;
        let center = chunk_center(key, size);
        let origin = chunk_origin(key, size);
        let spacing = self.config.roads.main_spacing;

        let mut vehicles = Vec::new();
        for _ in 0..self.config.traffic.vehicle_candidates {
            // Snap one coordinate to the avenue nearest the chunk centre,
            // spread the other across the chunk.
            let across = origin + Vec2::splat(rng.next_f32() * size);
            let candidate = if rng.chance(0.5) {
                Vec2::new(nearest_grid_line(center.x, spacing), across.y)
            } else {
                Vec2::new(across.x, nearest_grid_line(center.y, spacing))
            };
            match self.vehicle_from_candidate(candidate, rng) {
                Some(vehicle) => vehicles.push(vehicle),
                None => log::trace!(
                    "Chunk ({}, {}): discarded vehicle candidate at ({:.1}, {:.1})",
                    key.x,
                    key.y,
                    candidate.x,
                    candidate.y
                ),
            }
        }
        vehicles
    }

    /// Turn a spawn candidate into a vehicle, or `None` unless the candidate
    /// lies on a main avenue. Minor streets never get traffic.
    pub fn vehicle_from_candidate(
        &self,
        candidate: Coordinate,
        rng: &mut ChunkRng,
    ) -> Option<Vehicle> {
        let info = self.grid.classify_at(candidate);
        if info.class != RoadClass::Main {
            return None;
        }

        let flags = self.grid.grid_flags(candidate.x, candidate.y);
        let warped = self.grid.warped(candidate);
        let (axis, lane_line) = if flags.on_main_x {
            (Axis::Vertical, self.grid.nearest_main_line(warped.x))
        } else {
            (Axis::Horizontal, self.grid.nearest_main_line(warped.y))
        };

        let traffic = &self.config.traffic;
        let direction = rng.sign();
        let speed = rng.range_f32(traffic.speed.0, traffic.speed.1);
        let variant = rng.range_u32(0, traffic.variants.saturating_sub(1));
        let mut vehicle = Vehicle {
            position: candidate,
            axis,
            direction,
            lane_line,
            speed,
            variant,
            turn_cooldown: 0.0,
            rng: rng.fork(),
        };
        vehicle.position = crate::traffic::lane_position(&self.grid, traffic, &vehicle);
        Some(vehicle)
    }
}

fn side_or_positive(side: f32) -> f32 {
    if side < 0.0 {
        -1.0
    } else {
        1.0
    }
}
