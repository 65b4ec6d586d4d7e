use crate::chunk_map::{ChunkCache, StreamingReport};
use crate::generator::ChunkGenerator;
use townroam_core::math::world_to_chunk;
use townroam_core::types::{ChunkKey, Coordinate};

/// Policy for loading/unloading chunks based on the player position.
/// The cache is only touched when the player crosses into another chunk.
pub struct StreamingPolicy {
    radius: i32,
    last_center: Option<ChunkKey>,
}

impl StreamingPolicy {
    pub fn new(radius: i32) -> Self {
        Self {
            radius,
            last_center: None,
        }
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Change the view radius. Takes effect on the next `update`.
    pub fn set_radius(&mut self, radius: i32) {
        if radius != self.radius {
            self.radius = radius;
            self.last_center = None;
        }
    }

    /// Chunk the window was last centred on.
    pub fn center(&self) -> Option<ChunkKey> {
        self.last_center
    }

    /// Re-centre the window on `player_pos`. Returns an empty report when the
    /// player is still in the same chunk as last time.
    pub fn update(
        &mut self,
        cache: &mut ChunkCache,
        generator: &ChunkGenerator,
        player_pos: Coordinate,
    ) -> StreamingReport {
        let key = world_to_chunk(player_pos, generator.chunk_size());
        if self.last_center == Some(key) {
            return StreamingReport {
                center: key,
                ..Default::default()
            };
        }
        self.last_center = Some(key);
        cache.ensure_loaded(player_pos, self.radius, generator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{IVec2, Vec2};
    use townroam_core::config::WorldConfig;

    #[test]
    fn test_update_skips_same_chunk() {
        let gen = ChunkGenerator::new(WorldConfig::default());
        let mut cache = ChunkCache::new();
        let mut policy = StreamingPolicy::new(1);

        let first = policy.update(&mut cache, &gen, Vec2::new(1.0, 1.0));
        assert_eq!(first.generated.len(), 9);
        let second = policy.update(&mut cache, &gen, Vec2::new(19.0, 19.0));
        assert!(second.is_empty());
        assert_eq!(policy.center(), Some(IVec2::new(0, 0)));
    }

    #[test]
    fn test_update_follows_player() {
        let gen = ChunkGenerator::new(WorldConfig::default());
        let mut cache = ChunkCache::new();
        let mut policy = StreamingPolicy::new(2);
        policy.update(&mut cache, &gen, Vec2::new(1.0, 1.0));
        let report = policy.update(&mut cache, &gen, Vec2::new(-1.0, 1.0));
        assert_eq!(report.center, IVec2::new(-1, 0));
        assert_eq!(report.generated.len(), 5);
        assert_eq!(report.evicted.len(), 5);
        assert_eq!(cache.loaded_count(), 25);
    }

    #[test]
    fn test_radius_change_applies() {
        let gen = ChunkGenerator::new(WorldConfig::default());
        let mut cache = ChunkCache::new();
        let mut policy = StreamingPolicy::new(2);
        policy.update(&mut cache, &gen, Vec2::ZERO);
        policy.set_radius(1);
        let report = policy.update(&mut cache, &gen, Vec2::ZERO);
        assert_eq!(report.evicted.len(), 16);
        assert_eq!(cache.loaded_count(), 9);
    }
}
