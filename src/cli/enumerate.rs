//! The `enumerate` command: run the search and report what it finds.

use std::sync::Arc;
use std::time::Instant;

use num_bigint::BigInt;
use tracing::info;

use super::EnumerateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::input::Problem;
use crate::search::{self, PointObserver, SearchOptions};

/// Prints each lattice point to stdout the moment it is discovered.
/// Lines from concurrent branches interleave, but never mid-line: the
/// observer runs under the results lock.
struct StdoutPrinter;

impl PointObserver for StdoutPrinter {
    fn on_point(&self, point: &[BigInt]) {
        let line = point
            .iter()
            .map(BigInt::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        println!("{line}");
    }
}

pub fn run(args: &EnumerateArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;

    let mut logging = config.logging;
    if let Some(level) = &args.log_level {
        logging.level = level.clone();
    }
    if args.json_logs {
        logging.format = "json".into();
    }
    logging.init();

    let threads = args
        .threads
        .or(config.search.threads)
        .unwrap_or_else(num_cpus::get)
        .max(1);

    let started = Instant::now();

    let problem = match &args.input {
        Some(path) => Problem::from_path(path)?,
        None => Problem::from_stdin()?,
    };

    info!(size = problem.size, threads, "starting enumeration");

    let options = SearchOptions { threads };
    let results = search::enumerate_with(
        &problem.basis,
        &problem.lower,
        &problem.upper,
        &options,
        Arc::new(StdoutPrinter),
    )?;

    let elapsed = started.elapsed().as_secs_f64();
    println!("elapsed: {elapsed:7.3}");
    println!("count:   {:7}", results.len());

    info!(count = results.len(), elapsed, "enumeration finished");

    Ok(())
}
