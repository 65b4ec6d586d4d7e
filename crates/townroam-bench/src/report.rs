use std::path::Path;

use crate::runner::BenchmarkResult;

/// A complete baseline containing results from all scenes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Baseline {
    pub timestamp: String,
    pub results: Vec<BenchmarkResult>,
}

/// Load a baseline from a JSON file. Returns None if the file is missing or
/// unreadable.
pub fn load_baseline(path: &Path) -> Option<Baseline> {
    let contents = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(baseline) => Some(baseline),
        Err(e) => {
            log::warn!("Ignoring unreadable baseline {}: {e}", path.display());
            None
        }
    }
}

pub fn save_baseline(path: &Path, baseline: &Baseline) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(baseline).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

/// Scene metrics tracked against a baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    MeanTick,
    P95Tick,
    /// Chunks generated over the run. Only compared between runs of equal
    /// length; growth means the streaming window churns more.
    ChunksGenerated,
}

impl Metric {
    fn label(self) -> &'static str {
        match self {
            Metric::MeanTick => "mean tick (ms)",
            Metric::P95Tick => "p95 tick (ms)",
            Metric::ChunksGenerated => "chunks generated",
        }
    }

    fn value(self, r: &BenchmarkResult) -> f64 {
        match self {
            Metric::MeanTick => r.timings.mean_ms,
            Metric::P95Tick => r.timings.p95_ms,
            Metric::ChunksGenerated => r.chunks_generated as f64,
        }
    }
}

/// A scene metric that grew past the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Regression {
    pub scene: String,
    pub metric: Metric,
    pub baseline: f64,
    pub current: f64,
}

impl Regression {
    pub fn pct_change(&self) -> f64 {
        (self.current - self.baseline) / self.baseline * 100.0
    }
}

/// Compare each scene against the baseline scene of the same name. Scenes
/// missing from the baseline, and metrics with a zero baseline, are skipped.
pub fn compare(
    current: &[BenchmarkResult],
    baseline: &Baseline,
    threshold_pct: f64,
) -> Vec<Regression> {
    let mut regressions = Vec::new();

    for result in current {
        let Some(base) = baseline
            .results
            .iter()
            .find(|b| b.scene_name == result.scene_name)
        else {
            continue;
        };

        let mut metrics = vec![Metric::MeanTick, Metric::P95Tick];
        if base.tick_count == result.tick_count {
            metrics.push(Metric::ChunksGenerated);
        }
        for metric in metrics {
            let regression = Regression {
                scene: result.scene_name.clone(),
                metric,
                baseline: metric.value(base),
                current: metric.value(result),
            };
            if regression.baseline > 0.0 && regression.pct_change() > threshold_pct {
                regressions.push(regression);
            }
        }
    }

    regressions
}

/// Format results as a markdown summary table.
pub fn format_markdown(results: &[BenchmarkResult]) -> String {
    let mut out = String::new();
    out.push_str("| Scene | Ticks | Generated | Evicted | Vehicles | NPCs | Mean (ms) | Median (ms) | P95 (ms) | P99 (ms) | Max (ms) |\n");
    out.push_str("|-------|-------|-----------|---------|----------|------|-----------|-------------|----------|----------|----------|\n");

    for r in results {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {:.3} | {:.3} | {:.3} | {:.3} | {:.3} |\n",
            r.scene_name,
            r.tick_count,
            r.chunks_generated,
            r.chunks_evicted,
            r.vehicles,
            r.npcs,
            r.timings.mean_ms,
            r.timings.median_ms,
            r.timings.p95_ms,
            r.timings.p99_ms,
            r.timings.max_ms,
        ));
    }

    out
}

/// Format a comparison report showing regressions.
pub fn format_comparison(regressions: &[Regression], threshold_pct: f64) -> String {
    if regressions.is_empty() {
        return format!(
            "Tick times and chunk churn within {:.0}% of baseline.\n",
            threshold_pct
        );
    }

    let mut out = format!("REGRESSIONS (>{:.0}% over baseline):\n", threshold_pct);
    for r in regressions {
        out.push_str(&format!(
            "  - {}: {} {:.3} -> {:.3} (+{:.1}%)\n",
            r.scene,
            r.metric.label(),
            r.baseline,
            r.current,
            r.pct_change()
        ));
    }
    out
}
