use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::{debug, info, warn};

use primecount::config::WorkerConfig;
use primecount::count::count_sequential;
use primecount::io::{create_progress_bar, read_numbers};
use primecount::parallel::ParallelCounter;
use primecount::report::{BenchReport, Timing};

#[derive(Parser, Debug)]
#[command(name = "primecount")]
#[command(about = "Count primes in a file, single-threaded and in parallel", long_about = None)]
#[command(override_usage = "primecount [OPTIONS] <INPUT> [WORKERS]")]
struct Args {
    /// Input file containing integers
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Number of worker threads (defaults to number of CPU cores)
    #[arg(value_name = "WORKERS", allow_hyphen_values = true)]
    workers: Option<String>,

    /// Show a progress bar during the parallel pass
    #[arg(short, long)]
    progress: bool,

    /// Enable verbose logging (-v for debug, -vv for trace, -vvv adds thread ids)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_thread_ids(verbose >= 3)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let Some(input) = args.input else {
        println!("{}", Args::command().render_usage());
        return Ok(());
    };

    let config = WorkerConfig::from_host(args.workers.as_deref());
    debug!(
        "Using up to {} workers (defaulted: {})",
        config.workers, config.defaulted
    );

    let numbers = match read_numbers(&input) {
        Ok(numbers) => numbers,
        Err(err) => {
            eprintln!("Failed to read file: {:#}", err);
            return Ok(());
        }
    };

    if numbers.is_empty() {
        println!("No numbers found in file: {}", input.display());
        return Ok(());
    }

    let single_start = Instant::now();
    let single_primes = count_sequential(&numbers);
    let single_elapsed = single_start.elapsed();
    info!("Single-thread pass found {} primes", single_primes);

    let mut counter = match ParallelCounter::new(config.workers) {
        Ok(counter) => counter,
        Err(err) => {
            eprintln!("Worker pool failed: {:#}", err);
            return Ok(());
        }
    };
    if args.progress {
        let workers = counter.workers_for(numbers.len());
        counter = counter.with_progress(create_progress_bar(workers));
    }

    let multi_start = Instant::now();
    let multi = counter.run(&numbers);
    let multi_elapsed = multi_start.elapsed();
    info!(
        "Multi-thread pass found {} primes on {} workers",
        multi.primes, multi.workers
    );

    let report = BenchReport {
        input,
        total_numbers: numbers.len(),
        single: Timing {
            primes: single_primes,
            elapsed: single_elapsed,
        },
        multi: Timing {
            primes: multi.primes,
            elapsed: multi_elapsed,
        },
        workers: multi.workers,
    };

    println!("{}", report);

    if !report.counts_match() {
        warn!(
            "Sequential count {} differs from parallel count {}",
            report.single.primes, report.multi.primes
        );
    }

    Ok(())
}
