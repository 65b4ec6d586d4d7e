use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use townroam_bench::report;
use townroam_bench::runner::BenchmarkRunner;
use townroam_bench::scenes;
use townroam_core::config::WorldConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut baseline_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut regression_threshold = 10.0f64;
    let mut tick_count = 600u32;
    let mut seed: Option<u64> = None;
    let mut dt = 1.0f32 / 60.0;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--baseline" => {
                i += 1;
                baseline_path = Some(PathBuf::from(value(&args, i, "--baseline")));
            }
            "--output" => {
                i += 1;
                output_path = Some(PathBuf::from(value(&args, i, "--output")));
            }
            "--config" => {
                i += 1;
                config_path = Some(PathBuf::from(value(&args, i, "--config")));
            }
            "--regression-threshold" => {
                i += 1;
                regression_threshold = parse(&args, i, "--regression-threshold");
            }
            "--ticks" => {
                i += 1;
                tick_count = parse(&args, i, "--ticks");
            }
            "--dt" => {
                i += 1;
                dt = parse(&args, i, "--dt");
            }
            "--seed" => {
                i += 1;
                seed = Some(parse(&args, i, "--seed"));
            }
            "--help" | "-h" => {
                eprintln!("Usage: bench-runner [OPTIONS]");
                eprintln!("  --config <path>                World config (RON)");
                eprintln!("  --seed <n>                     Override the world seed");
                eprintln!("  --dt <seconds>                 Fixed timestep (default: 1/60)");
                eprintln!("  --baseline <path>              Load baseline JSON for comparison");
                eprintln!("  --output <path>                Save current results as JSON baseline");
                eprintln!(
                    "  --regression-threshold <pct>   Regression threshold percentage (default: 10)"
                );
                eprintln!("  --ticks <n>                    Ticks per scene (default: 600)");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = match config_path {
        Some(ref path) => match WorldConfig::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => WorldConfig::default(),
    };
    if let Some(seed) = seed {
        config.world_seed = seed;
    }

    let runner = BenchmarkRunner::new(config, tick_count).with_dt(dt);

    let scene_configs = scenes::standard_scenes();
    let mut results = Vec::new();

    for scene in &scene_configs {
        let result = runner.run_scene(scene);
        results.push(result);
    }

    println!("\n## Benchmark Results\n");
    println!("{}", report::format_markdown(&results));

    if let Some(ref path) = output_path {
        let baseline = report::Baseline {
            timestamp: timestamp(),
            results: results.clone(),
        };
        if let Err(e) = report::save_baseline(path, &baseline) {
            log::error!("Failed to save baseline to {}: {e}", path.display());
            process::exit(1);
        }
        log::info!("Saved baseline to {}", path.display());
    }

    if let Some(ref path) = baseline_path {
        if let Some(baseline) = report::load_baseline(path) {
            let regressions = report::compare(&results, &baseline, regression_threshold);
            println!(
                "{}",
                report::format_comparison(&regressions, regression_threshold)
            );
            if !regressions.is_empty() {
                eprintln!(
                    "ERROR: {} regressions detected, exiting with code 1",
                    regressions.len()
                );
                process::exit(1);
            }
        } else {
            log::warn!("Baseline file not found: {}", path.display());
        }
    }

    log::info!("Benchmark complete.");
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(v) => v,
        None => {
            eprintln!("Missing value for {flag}");
            process::exit(1);
        }
    }
}

fn parse<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    let raw = value(args, i, flag);
    match raw.parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("Invalid {flag} value: {raw}");
            process::exit(1);
        }
    }
}

fn timestamp() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("bench-{secs}")
}
