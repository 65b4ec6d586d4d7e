use std::time::Instant;

use townroam_core::config::WorldConfig;
use townroam_world::World;

use crate::scenes::SceneConfig;

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub tick_count: u32,
    pub chunks_generated: u64,
    pub chunks_evicted: u64,
    pub resident_chunks: u32,
    pub vehicles: u32,
    pub npcs: u32,
    pub distance: f32,
    pub timings: TimingSeries,
}

/// Runs scenes against a headless world.
pub struct BenchmarkRunner {
    config: WorldConfig,
    tick_count: u32,
    dt: f32,
}

impl BenchmarkRunner {
    pub fn new(config: WorldConfig, tick_count: u32) -> Self {
        Self {
            config,
            tick_count,
            dt: 1.0 / 60.0,
        }
    }

    /// Fixed timestep used for every tick.
    pub fn with_dt(mut self, dt: f32) -> Self {
        self.dt = dt;
        self
    }

    /// Run a single benchmark scene and return timing results.
    pub fn run_scene(&self, scene: &SceneConfig) -> BenchmarkResult {
        log::info!("Running scene '{}' ({} ticks)...", scene.name, self.tick_count);

        let mut world = World::new(self.config.clone());
        let start_pos = world.player().position;
        let mut distance = 0.0;
        let mut frame_times = Vec::with_capacity(self.tick_count as usize);
        let mut vehicles = 0;
        let mut npcs = 0;

        for tick in 0..self.tick_count {
            let input = scene.input_at(tick);
            let before = world.player().position;

            let frame_start = Instant::now();
            let report = world.tick(input, self.dt);
            let elapsed = frame_start.elapsed().as_secs_f64() * 1000.0;
            frame_times.push(elapsed);

            distance += world.player().position.distance(before);
            vehicles = report.vehicles;
            npcs = report.npcs;
        }

        let timings = compute_timings(&frame_times);
        let cache = world.cache();
        log::info!(
            "  Done after {} ticks: mean={:.3}ms, p95={:.3}ms, p99={:.3}ms, {} generated, {} evicted, {:.1} from spawn",
            world.ticks(),
            timings.mean_ms,
            timings.p95_ms,
            timings.p99_ms,
            cache.generated_total(),
            cache.evicted_total(),
            world.player().position.distance(start_pos)
        );

        BenchmarkResult {
            scene_name: scene.name.to_string(),
            tick_count: self.tick_count,
            chunks_generated: cache.generated_total(),
            chunks_evicted: cache.evicted_total(),
            resident_chunks: cache.loaded_count() as u32,
            vehicles: vehicles as u32,
            npcs: npcs as u32,
            distance,
            timings,
        }
    }
}

/// Compute timing statistics from a list of frame times in milliseconds.
pub fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = ((n as f64) * 0.95).ceil() as usize;
    let p99_idx = ((n as f64) * 0.99).ceil() as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        p99_ms: sorted[p99_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::Route;
    use glam::Vec2;

    #[test]
    fn test_compute_timings_empty() {
        let t = compute_timings(&[]);
        assert_eq!(t.mean_ms, 0.0);
        assert_eq!(t.max_ms, 0.0);
    }

    #[test]
    fn test_compute_timings_stats() {
        let times: Vec<f64> = (1..=100).map(|i| i as f64).collect();
        let t = compute_timings(&times);
        assert_eq!(t.min_ms, 1.0);
        assert_eq!(t.max_ms, 100.0);
        assert_eq!(t.median_ms, 50.5);
        assert!((t.mean_ms - 50.5).abs() < 1e-9);
        assert!(t.p95_ms >= 95.0 && t.p95_ms <= 97.0);
        assert!(t.p99_ms >= 99.0);
    }

    #[test]
    fn test_run_scene_accounts_chunks() {
        let runner = BenchmarkRunner::new(WorldConfig::default(), 240);
        let scene = SceneConfig {
            name: "walk",
            route: Route::Straight {
                direction: Vec2::X,
            },
        };
        let result = runner.run_scene(&scene);
        assert_eq!(result.tick_count, 240);
        assert_eq!(result.resident_chunks, 25);
        assert_eq!(
            result.chunks_generated - result.chunks_evicted,
            result.resident_chunks as u64
        );
        assert!(result.distance <= 8.0 * 240.0 / 60.0 + 1e-3);
    }

    #[test]
    fn test_with_dt_sets_timestep() {
        let runner = BenchmarkRunner::new(WorldConfig::default(), 1).with_dt(1.0 / 30.0);
        assert_eq!(runner.dt, 1.0 / 30.0);
        let scene = SceneConfig {
            name: "walk",
            route: Route::Straight {
                direction: Vec2::Y,
            },
        };
        let result = runner.run_scene(&scene);
        assert!(result.distance <= 8.0 / 30.0 + 1e-4, "one tick moves at most speed * dt");
    }

    #[test]
    fn test_idle_scene_generates_once() {
        let runner = BenchmarkRunner::new(WorldConfig::default(), 30);
        let scene = SceneConfig {
            name: "idle",
            route: Route::Idle,
        };
        let result = runner.run_scene(&scene);
        assert_eq!(result.chunks_generated, 25);
        assert_eq!(result.tick_count, 30);
        assert_eq!(result.chunks_evicted, 0);
        assert_eq!(result.distance, 0.0);
    }
}
