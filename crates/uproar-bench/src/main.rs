use std::path::PathBuf;
use std::process;

use uproar_bench::report;
use uproar_bench::runner::BenchmarkRunner;
use uproar_bench::scenes;

fn usage() {
    eprintln!("Usage: uproar-bench [OPTIONS]");
    eprintln!("  --baseline <path>              Load baseline JSON for comparison");
    eprintln!("  --output <path>                Save current results as JSON baseline");
    eprintln!("  --regression-threshold <pct>   Regression threshold percentage (default: 10)");
    eprintln!("  --ticks <n>                    Ticks per scene (default: 600)");
    eprintln!("  --seed <n>                     Event generator seed (default: 42)");
}

fn value_of<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(value) => value,
        None => {
            eprintln!("Missing value for {}", flag);
            process::exit(1);
        }
    }
}

fn parse_or_exit<T: std::str::FromStr>(value: &str, flag: &str) -> T {
    match value.parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            eprintln!("Invalid {} value: {}", flag, value);
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut baseline_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut regression_threshold = 10.0f64;
    let mut tick_count = 600u32;
    let mut seed = 42u64;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--baseline" => {
                i += 1;
                baseline_path = Some(PathBuf::from(value_of(&args, i, flag)));
            }
            "--output" => {
                i += 1;
                output_path = Some(PathBuf::from(value_of(&args, i, flag)));
            }
            "--regression-threshold" => {
                i += 1;
                regression_threshold = parse_or_exit(value_of(&args, i, flag), flag);
            }
            "--ticks" => {
                i += 1;
                tick_count = parse_or_exit(value_of(&args, i, flag), flag);
            }
            "--seed" => {
                i += 1;
                seed = parse_or_exit(value_of(&args, i, flag), flag);
            }
            "--help" | "-h" => {
                usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let runner = match BenchmarkRunner::new(tick_count, seed) {
        Ok(runner) => runner,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    let results: Vec<_> = scenes::standard_scenes()
        .iter()
        .map(|config| runner.run_scene(config))
        .collect();

    println!("\n## Uproar Benchmark Results\n");
    println!("{}", report::format_markdown(&results));

    if let Some(ref path) = output_path {
        let baseline = report::Baseline {
            timestamp: format!("bench-{}", process::id()),
            results: results.clone(),
        };
        match report::save_baseline(path, &baseline) {
            Ok(()) => log::info!("Saved baseline to {}", path.display()),
            Err(e) => {
                eprintln!("ERROR: failed to save baseline {}: {}", path.display(), e);
                process::exit(1);
            }
        }
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
