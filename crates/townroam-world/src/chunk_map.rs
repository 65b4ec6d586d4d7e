use crate::chunk::{ChunkContent, ChunkState};
use crate::generator::ChunkGenerator;
use glam::IVec2;
use std::collections::{HashMap, HashSet};
use townroam_core::math::{chebyshev, world_to_chunk};
use townroam_core::types::{ChunkKey, Coordinate};

/// Keys generated and evicted by one `ensure_loaded` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamingReport {
    pub center: ChunkKey,
    pub generated: Vec<ChunkKey>,
    pub evicted: Vec<ChunkKey>,
}

impl StreamingReport {
    pub fn is_empty(&self) -> bool {
        self.generated.is_empty() && self.evicted.is_empty()
    }
}

/// Every key within Chebyshev distance `radius` of `center`, row by row.
pub fn window_keys(center: ChunkKey, radius: i32) -> Vec<ChunkKey> {
    let side = (2 * radius + 1).max(0) as usize;
    let mut keys = Vec::with_capacity(side * side);
    for dz in -radius..=radius {
        for dx in -radius..=radius {
            keys.push(center + IVec2::new(dx, dz));
        }
    }
    keys
}

/// Resident chunk content keyed by chunk coordinate.
///
/// A key is either absent or resident. Generation happens at most once per
/// residency; mutation goes through `&mut self`, so two generations of the
/// same key cannot race.
pub struct ChunkCache {
    chunks: HashMap<ChunkKey, ChunkContent>,
    generated_total: u64,
    evicted_total: u64,
}

impl Default for ChunkCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkCache {
    pub fn new() -> Self {
        Self {
            chunks: HashMap::new(),
            generated_total: 0,
            evicted_total: 0,
        }
    }

    /// Fetch a resident chunk or generate and insert it.
    pub fn get_or_generate(
        &mut self,
        key: ChunkKey,
        generator: &ChunkGenerator,
    ) -> &mut ChunkContent {
        let generated_total = &mut self.generated_total;
        self.chunks.entry(key).or_insert_with(|| {
            *generated_total += 1;
            generator.generate(key)
        })
    }

    /// Make exactly the chunks within `radius` of `center`'s chunk resident.
    pub fn ensure_loaded(
        &mut self,
        center: Coordinate,
        radius: i32,
        generator: &ChunkGenerator,
    ) -> StreamingReport {
        let center_key = world_to_chunk(center, generator.chunk_size());
        let mut report = StreamingReport {
            center: center_key,
            ..Default::default()
        };

        let wanted = window_keys(center_key, radius);
        for key in &wanted {
            if !self.chunks.contains_key(key) {
                self.get_or_generate(*key, generator);
                report.generated.push(*key);
            }
        }

        let retain: HashSet<ChunkKey> = wanted.into_iter().collect();
        let mut stale: Vec<ChunkKey> = self
            .chunks
            .keys()
            .filter(|k| !retain.contains(k))
            .copied()
            .collect();
        stale.sort_by_key(|k| (k.y, k.x));
        for key in &stale {
            self.evict(key);
        }
        report.evicted = stale;

        if !report.is_empty() {
            log::debug!(
                "Streaming around ({}, {}): +{} -{} chunks, {} resident",
                center_key.x,
                center_key.y,
                report.generated.len(),
                report.evicted.len(),
                self.chunks.len()
            );
        }
        report
    }

    /// Drop a chunk. Returns its content if it was resident.
    pub fn evict(&mut self, key: &ChunkKey) -> Option<ChunkContent> {
        let removed = self.chunks.remove(key);
        if removed.is_some() {
            self.evicted_total += 1;
        }
        removed
    }

    pub fn state(&self, key: &ChunkKey) -> ChunkState {
        if self.chunks.contains_key(key) {
            ChunkState::Resident
        } else {
            ChunkState::Absent
        }
    }

    pub fn get(&self, key: &ChunkKey) -> Option<&ChunkContent> {
        self.chunks.get(key)
    }

    pub fn get_mut(&mut self, key: &ChunkKey) -> Option<&mut ChunkContent> {
        self.chunks.get_mut(key)
    }

    /// Iterator over all resident chunks.
    pub fn iter(&self) -> impl Iterator<Item = (&ChunkKey, &ChunkContent)> {
        self.chunks.iter()
    }

    /// Mutable iterator over all resident chunks.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&ChunkKey, &mut ChunkContent)> {
        self.chunks.iter_mut()
    }

    /// Resident keys in a stable order, for renderers that need a snapshot
    /// decoupled from later cache mutation.
    pub fn resident_keys(&self) -> Vec<ChunkKey> {
        let mut keys: Vec<ChunkKey> = self.chunks.keys().copied().collect();
        keys.sort_by_key(|k| (k.y, k.x));
        keys
    }

    /// Resident chunks within `radius` of `center`.
    pub fn near(&self, center: ChunkKey, radius: i32) -> impl Iterator<Item = &ChunkContent> {
        self.chunks
            .iter()
            .filter(move |(k, _)| chebyshev(**k, center) <= radius)
            .map(|(_, c)| c)
    }

    pub fn loaded_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total generations over the cache lifetime, re-generations included.
    pub fn generated_total(&self) -> u64 {
        self.generated_total
    }

    pub fn evicted_total(&self) -> u64 {
        self.evicted_total
    }

    pub fn clear(&mut self) {
        self.evicted_total += self.chunks.len() as u64;
        self.chunks.clear();
    }
}
