//! Benchmark runner: naive reference vs tiled matmul.

use std::process;

use tiled_matmul::{BenchConfig, run_benchmark};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = BenchConfig::default();
    match run_benchmark(&config) {
        Ok(report) => print!("{report}"),
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    }
}
