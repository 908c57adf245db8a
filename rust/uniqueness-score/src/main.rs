//! uniqueness-score CLI: generate or read integer sequences and score them.
//!
//! Modes:
//!   --mode=collatz --number=13              Collatz trajectory with prime factors (default)
//!   --mode=brute                            Score the trajectories of 1..1024
//!   --mode=arithmetic --a=2 --b=3           Score a + b*i
//!   --mode=geometric --a=2 --b=3            Score a * b^i
//!   --mode=atomic                           Score distinct atomic neutron counts
//!   --mode=random --seed=1                  Score distinct seeded random u64 values
//!   --mode=oeis --corpus=stripped.gz        Rank an OEIS corpus into README.md
//!   --mode=sweep --series=sevenSmooth       Score a series at every size, write CSV
//!   --mode=histogram --limit=1048576        2-adic valuation counts of even numbers
//!
//! Options:
//!   --length=<N>            Terms for arithmetic/geometric/random (default: 256)
//!   --periodic-table=<path> Periodic table JSON (default: ./PeriodicTableJSON.json)
//!   --readme=<path>         Leaderboard Markdown output (default: README.md)
//!   --json=<path>           Also write the leaderboard as JSON
//!   --max-size=<N>          Sweep sizes 1..N (default: 256, 2048 for the complement)
//!   --out-dir=<path>        Directory for CSV output (default: .)
//!
//! Set RUST_LOG=debug for per-sequence progress.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use num_bigint::BigInt;

use sequence_core::{
    arithmetic_series, collatz, create_gzip, finish_gzip, geometric_series, load_periodic_table,
    neutron_counts, prime_factors, random_series, two_adic_histogram, Result, SequenceError,
    WorkerPool, DEFAULT_LENGTH, DEFAULT_RANDOM_SEED,
};
use uniqueness_score::report::{write_json, write_readme, write_size_csv};
use uniqueness_score::{lookup_source, sum_product_score, sweep, ScoringPipeline};

/// CLI configuration parsed from command-line arguments.
struct CliConfig {
    mode: Mode,
    number: BigInt,
    a: BigInt,
    b: BigInt,
    length: usize,
    seed: u64,
    corpus: PathBuf,
    periodic_table: PathBuf,
    readme: PathBuf,
    json: Option<PathBuf>,
    series: String,
    max_size: Option<usize>,
    limit: u64,
    out_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Collatz,
    Brute,
    Arithmetic,
    Geometric,
    Atomic,
    Random,
    Oeis,
    Sweep,
    Histogram,
}

impl FromStr for Mode {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "collatz" => Mode::Collatz,
            "brute" => Mode::Brute,
            "arithmetic" => Mode::Arithmetic,
            "geometric" => Mode::Geometric,
            "atomic" => Mode::Atomic,
            "random" => Mode::Random,
            "oeis" => Mode::Oeis,
            "sweep" => Mode::Sweep,
            "histogram" => Mode::Histogram,
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

/// Parse `--name=value`, falling back to `default` when absent. A value that
/// does not parse is an error, never silently replaced by the default.
fn parse_flag<T: FromStr>(args: &[String], name: &str, default: T) -> Result<T> {
    match flag(args, name) {
        Some(raw) => raw.parse().map_err(|_| {
            SequenceError::invalid_input(format!("invalid value {:?} for --{}", raw, name))
        }),
        None => Ok(default),
    }
}

fn parse_args() -> Result<CliConfig> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mode = match flag(&args, "mode") {
        Some(raw) => raw.parse()?,
        None => Mode::Collatz,
    };
    let series = flag(&args, "series").unwrap_or("sevenSmooth").to_string();

    Ok(CliConfig {
        mode,
        number: parse_flag(&args, "number", BigInt::from(13))?,
        a: parse_flag(&args, "a", BigInt::from(2))?,
        b: parse_flag(&args, "b", BigInt::from(3))?,
        length: parse_flag(&args, "length", DEFAULT_LENGTH)?,
        seed: parse_flag(&args, "seed", DEFAULT_RANDOM_SEED)?,
        corpus: parse_flag(&args, "corpus", PathBuf::from("stripped.gz"))?,
        periodic_table: parse_flag(
            &args,
            "periodic-table",
            PathBuf::from("PeriodicTableJSON.json"),
        )?,
        readme: parse_flag(&args, "readme", PathBuf::from("README.md"))?,
        json: flag(&args, "json").map(PathBuf::from),
        series,
        max_size: match flag(&args, "max-size") {
            Some(_) => Some(parse_flag(&args, "max-size", 0)?),
            None => None,
        },
        limit: parse_flag(&args, "limit", 1u64 << 20)?,
        out_dir: parse_flag(&args, "out-dir", PathBuf::from("."))?,
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
    match config.mode {
        Mode::Collatz => run_collatz_mode(config),
        Mode::Brute => run_brute_mode(),
        Mode::Arithmetic => {
            score_and_print(&arithmetic_series(&config.a, &config.b, config.length));
            Ok(())
        }
        Mode::Geometric => {
            score_and_print(&geometric_series(&config.a, &config.b, config.length));
            Ok(())
        }
        Mode::Atomic => {
            let elements = load_periodic_table(&config.periodic_table)?;
            score_and_print(&neutron_counts(&elements));
            Ok(())
        }
        Mode::Random => {
            score_and_print(&random_series(config.length, config.seed));
            Ok(())
        }
        Mode::Oeis => run_oeis_mode(config),
        Mode::Sweep => run_sweep_mode(config),
        Mode::Histogram => {
            for (valuation, count) in two_adic_histogram(config.limit).iter().enumerate() {
                println!("{} {}", valuation, count);
            }
            Ok(())
        }
    }
}

/// Print every term, then the series' score.
fn score_and_print(series: &[BigInt]) {
    for term in series {
        println!("{}", term);
    }
    print_score(series);
}

fn print_score(series: &[BigInt]) {
    let n = series.len();
    let score = sum_product_score(series);
    println!(
        "pairs={} sum={} product={} score={}",
        n * (n + 1) / 2,
        score.sum,
        score.product,
        score.combined
    );
}

fn run_collatz_mode(config: &CliConfig) -> Result<()> {
    let series = collatz(&config.number)?;
    for term in &series {
        let factors: Vec<String> = prime_factors(term.magnitude())
            .iter()
            .map(|f| f.to_string())
            .collect();
        println!("{} [{}]", term, factors.join(", "));
    }
    print_score(&series);
    Ok(())
}

fn run_brute_mode() -> Result<()> {
    for start in 1..1024 {
        let series = collatz(&BigInt::from(start))?;
        print!("{} ", start);
        print_score(&series);
    }
    Ok(())
}

fn run_oeis_mode(config: &CliConfig) -> Result<()> {
    let start = Instant::now();
    let pool = WorkerPool::with_default_capacity()?;
    let entries = uniqueness_score::open_corpus(&config.corpus)?;
    let leaderboard = ScoringPipeline::new(&pool).run(entries)?;
    log::info!("ranked corpus in {:?}", start.elapsed());

    let mut out = BufWriter::new(File::create(&config.readme)?);
    write_readme(&mut out, &leaderboard)?;
    out.flush()?;
    println!("Wrote {}", config.readme.display());

    if let Some(path) = &config.json {
        let mut out = BufWriter::new(File::create(path)?);
        write_json(&mut out, &leaderboard)?;
        out.flush()?;
        println!("Wrote {}", path.display());
    }

    for record in leaderboard.filled().take(10) {
        println!("{:<10} {:.6}", record.name, record.score.combined);
    }
    Ok(())
}

fn run_sweep_mode(config: &CliConfig) -> Result<()> {
    let source = lookup_source(&config.series)?;

    let (preview, preview_score) = source.preview();
    let terms: Vec<String> = preview.iter().map(|v| v.to_string()).collect();
    println!("{}", terms.join(" "));
    if let Some(score) = preview_score {
        println!("{} {} {}", score.sum, score.product, score.combined);
    }

    let max_size = config.max_size.unwrap_or(source.default_max_size);
    let pool = WorkerPool::with_default_capacity()?;
    let report = sweep(&pool, &source, max_size)?;

    for r in &report.results {
        println!(
            "{} {} {} {}",
            r.size, r.score.sum, r.score.product, r.score.combined
        );
    }
    if let Some(best) = report.best() {
        println!("best size {} score {}", best.size, best.score.combined);
    }

    let path = config.out_dir.join(format!("{}.csv.gz", source.key));
    let mut out = create_gzip(&path)?;
    write_size_csv(&mut out, &report.results)?;
    finish_gzip(out)?;
    println!("Wrote {} (score vs size for {} numbers)", path.display(), source.nice);
    Ok(())
}
