pub mod chunk;
pub mod chunk_map;
pub mod generator;
pub mod npc;
pub mod player;
pub mod road;
pub mod streaming;
pub mod traffic;

use chunk::{Building, ChunkContent, Npc, Vehicle};
use chunk_map::{ChunkCache, StreamingReport};
use generator::ChunkGenerator;
use glam::IVec2;
use player::{requested_delta, step_player, InputSample, PlayerState};
use streaming::StreamingPolicy;
use townroam_core::config::{validate_config, WorldConfig};
use townroam_core::error::ConfigError;
use townroam_core::math::{chunk_center, world_to_chunk};
use townroam_core::types::{ChunkKey, Coordinate, RoadInfo};

/// What one simulation tick did.
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub streaming: StreamingReport,
    /// The player's requested move was cut short by a building.
    pub player_blocked: bool,
    pub vehicles: usize,
    pub npcs: usize,
}

/// Primary public struct for the townroam-world crate.
/// Owns the chunk cache, generator, streaming window and player state.
pub struct World {
    cache: ChunkCache,
    generator: ChunkGenerator,
    streaming: StreamingPolicy,
    player: PlayerState,
    ticks: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

impl World {
    /// Create a world with the player at the centre of chunk (0, 0) and the
    /// surrounding chunks generated. The config is assumed valid.
    pub fn new(config: WorldConfig) -> Self {
        let spawn = chunk_center(IVec2::ZERO, config.chunk_size);
        Self::with_spawn(config, spawn)
    }

    /// Validate the config, then create the world.
    pub fn try_new(config: WorldConfig) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Invalid)?;
        Ok(Self::new(config))
    }

    pub fn with_spawn(config: WorldConfig, spawn: Coordinate) -> Self {
        log::info!(
            "Creating world: seed {}, chunk size {}, view radius {}",
            config.world_seed,
            config.chunk_size,
            config.view_radius
        );
        let streaming = StreamingPolicy::new(config.view_radius);
        let mut world = Self {
            cache: ChunkCache::new(),
            generator: ChunkGenerator::new(config),
            streaming,
            player: PlayerState::at(spawn),
            ticks: 0,
        };
        world.update(spawn);
        world
    }

    /// Re-centre the streaming window on `pos`.
    pub fn update(&mut self, pos: Coordinate) -> StreamingReport {
        self.streaming.update(&mut self.cache, &self.generator, pos)
    }

    /// Advance the world by `dt` seconds: move the player, stream chunks
    /// around the new position, then drive vehicles and NPCs.
    pub fn tick(&mut self, input: InputSample, dt: f32) -> TickReport {
        let config = self.generator.config();
        let player_key = world_to_chunk(self.player.position, config.chunk_size);
        let obstacles: Vec<&Building> = self
            .cache
            .near(player_key, 1)
            .flat_map(|c| c.buildings.iter())
            .collect();

        let next = step_player(&self.player, input, dt, &config.player, &obstacles);
        // A blocked axis move is cancelled outright, leaving that coordinate unchanged.
        let wanted = requested_delta(input, dt, &config.player);
        let prev = self.player.position;
        let player_blocked = (wanted.x != 0.0 && next.position.x == prev.x)
            || (wanted.y != 0.0 && next.position.y == prev.y);
        self.player = next;

        let streaming = self.update(self.player.position);

        let grid = self.generator.grid();
        let config = self.generator.config();
        let mut vehicles = 0;
        let mut npcs = 0;
        for (_, chunk) in self.cache.iter_mut() {
            for v in &mut chunk.vehicles {
                traffic::step_vehicle(v, dt, grid, &config.traffic);
            }
            for n in &mut chunk.npcs {
                npc::step_npc(n, dt, grid, &config.npcs);
            }
            vehicles += chunk.vehicles.len();
            npcs += chunk.npcs.len();
        }
        self.ticks += 1;

        TickReport {
            streaming,
            player_blocked,
            vehicles,
            npcs,
        }
    }

    pub fn view_radius(&self) -> i32 {
        self.streaming.radius()
    }

    /// Change the streaming radius and re-stream around the player.
    pub fn set_view_radius(&mut self, radius: i32) -> StreamingReport {
        self.streaming.set_radius(radius);
        self.update(self.player.position)
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Teleport the player and stream around the new position.
    pub fn set_player_position(&mut self, pos: Coordinate) -> StreamingReport {
        self.player.position = pos;
        self.update(pos)
    }

    pub fn config(&self) -> &WorldConfig {
        self.generator.config()
    }

    pub fn cache(&self) -> &ChunkCache {
        &self.cache
    }

    pub fn generator(&self) -> &ChunkGenerator {
        &self.generator
    }

    /// Road classification at a world position.
    pub fn classify(&self, x: f32, z: f32) -> RoadInfo {
        self.generator.grid().classify(x, z)
    }

    /// Resident chunk keys in a stable order.
    pub fn resident_keys(&self) -> Vec<ChunkKey> {
        self.cache.resident_keys()
    }

    pub fn chunks(&self) -> impl Iterator<Item = &ChunkContent> {
        self.cache.iter().map(|(_, c)| c)
    }

    /// Buildings of resident chunks within one chunk of `pos`.
    pub fn buildings_near(&self, pos: Coordinate) -> Vec<&Building> {
        let key = world_to_chunk(pos, self.config().chunk_size);
        self.cache
            .near(key, 1)
            .flat_map(|c| c.buildings.iter())
            .collect()
    }

    pub fn vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.chunks().flat_map(|c| c.vehicles.iter())
    }

    pub fn npcs(&self) -> impl Iterator<Item = &Npc> {
        self.chunks().flat_map(|c| c.npcs.iter())
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
