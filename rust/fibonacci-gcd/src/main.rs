//! fibonacci-gcd CLI: Fibonacci-GCD factor search over pairs of primes.
//!
//! Modes:
//!   --mode=fibonacci                 Adjacent prime pairs, seed (0, 1) (default)
//!   --mode=random --seed=1           Randomly drawn prime pairs, seed (0, 1)
//!   --mode=lucas                     Adjacent prime pairs, seed (2, 1)
//!   --mode=combined                  Adjacent prime pairs, both seeds, smallest index wins
//!   --mode=primes                    Print the primes below --bound
//!   --mode=binet --number=100        Print the Fibonacci number F(n)
//!
//! Options:
//!   --bound=<N>             Primes are drawn from below N (default: 50000)
//!   --max-iterations=<N>    Give up on a pair after N terms (lucas mode defaults to 2*bound)
//!   --out-dir=<path>        Directory for CSV output (default: .)
//!
//! Writes <mode>.csv.gz (sorted by x) and <mode>_cluster.csv.gz (sorted by gcd/index).
//! Set RUST_LOG=debug for per-pair progress.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use sequence_core::{fibonacci, sieve_of_eratosthenes, Result, SequenceError, WorkerPool};

use fibonacci_gcd::report::write_report_files;
use fibonacci_gcd::{
    FactorSearchPipeline, FibonacciSearcher, PrimeSource, RandomSource, SequentialSource,
};

/// CLI configuration parsed from command-line arguments.
struct CliConfig {
    mode: Mode,
    bound: u64,
    seed: u64,
    max_iterations: Option<u64>,
    number: u64,
    out_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Fibonacci,
    Random,
    Lucas,
    Combined,
    Primes,
    Binet,
}

impl Mode {
    fn name(self) -> &'static str {
        match self {
            Mode::Fibonacci => "fibonacci",
            Mode::Random => "random",
            Mode::Lucas => "lucas",
            Mode::Combined => "combined",
            Mode::Primes => "primes",
            Mode::Binet => "binet",
        }
    }
}

impl FromStr for Mode {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "fibonacci" => Mode::Fibonacci,
            "random" => Mode::Random,
            "lucas" => Mode::Lucas,
            "combined" => Mode::Combined,
            "primes" => Mode::Primes,
            "binet" => Mode::Binet,
            other => {
                return Err(SequenceError::invalid_input(format!(
                    "unknown mode {:?}",
                    other
                )))
            }
        })
    }
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    let prefix = format!("--{}=", name);
    args.iter().find_map(|a| a.strip_prefix(prefix.as_str()))
}

fn parse_value<T: FromStr>(raw: &str, name: &str) -> Result<T> {
    raw.parse().map_err(|_| {
        SequenceError::invalid_input(format!("invalid value {:?} for --{}", raw, name))
    })
}

fn parse_args() -> Result<CliConfig> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mode = match flag(&args, "mode") {
        Some(raw) => raw.parse()?,
        None => Mode::Fibonacci,
    };
    let max_iterations = match flag(&args, "max-iterations") {
        Some(raw) => Some(parse_value(raw, "max-iterations")?),
        None => None,
    };

    Ok(CliConfig {
        mode,
        bound: flag(&args, "bound").map_or(Ok(50_000), |raw| parse_value(raw, "bound"))?,
        seed: flag(&args, "seed").map_or(Ok(1), |raw| parse_value(raw, "seed"))?,
        max_iterations,
        number: flag(&args, "number").map_or(Ok(100), |raw| parse_value(raw, "number"))?,
        out_dir: PathBuf::from(flag(&args, "out-dir").unwrap_or(".")),
    })
}

fn main() {
    env_logger::init();

    let result = parse_args().and_then(|config| run(&config));
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &CliConfig) -> Result<()> {
    let capped = |searcher: FibonacciSearcher| match config.max_iterations {
        Some(cap) => searcher.with_max_iterations(cap),
        None => searcher,
    };

    match config.mode {
        Mode::Primes => {
            for p in sieve_of_eratosthenes(config.bound) {
                println!("{}", p);
            }
            Ok(())
        }
        Mode::Binet => {
            println!("{}", fibonacci(config.number));
            Ok(())
        }
        Mode::Fibonacci => run_search(
            config,
            &mut SequentialSource::new(config.bound),
            vec![capped(FibonacciSearcher::fibonacci())],
        ),
        Mode::Random => run_search(
            config,
            &mut RandomSource::new(config.bound, config.seed),
            vec![capped(FibonacciSearcher::fibonacci())],
        ),
        Mode::Lucas => {
            // Some pairs never divide a Lucas term, so this mode is always capped.
            let cap = config
                .max_iterations
                .unwrap_or_else(|| config.bound.saturating_mul(2));
            run_search(
                config,
                &mut SequentialSource::new(config.bound),
                vec![FibonacciSearcher::lucas().with_max_iterations(cap)],
            )
        }
        Mode::Combined => run_search(
            config,
            &mut SequentialSource::new(config.bound),
            vec![
                capped(FibonacciSearcher::fibonacci()),
                capped(FibonacciSearcher::lucas()),
            ],
        ),
    }
}

fn run_search(
    config: &CliConfig,
    source: &mut dyn PrimeSource,
    strategies: Vec<FibonacciSearcher>,
) -> Result<()> {
    let pool = WorkerPool::with_default_capacity()?;
    let pipeline = FactorSearchPipeline::new(&pool, strategies)?;

    let start = Instant::now();
    let report = pipeline.run(source)?;
    log::info!(
        "{} search finished in {:.1}s",
        config.mode.name(),
        start.elapsed().as_secs_f64()
    );

    for r in report.by_x() {
        println!("{} {} {} {}", r.x, r.y, r.index, r.gcd);
    }
    if report.skipped > 0 {
        println!("{} pairs skipped at the iteration cap", report.skipped);
    }

    let (primary, cluster) = write_report_files(&config.out_dir, config.mode.name(), &report)?;
    println!("Wrote {} and {}", primary.display(), cluster.display());
    Ok(())
}
