//! Scaling runs for both experiments.
//!
//! Times the sum/product scorer on sequences of growing length and the
//! Fibonacci-GCD pipeline on growing prime bounds, then fits an empirical
//! exponent to each series of timings.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use fibonacci_gcd::{FactorSearchPipeline, FibonacciSearcher, SequentialSource};
use sequence_core::{random_series, smooth_series, SmoothBasis, WorkerPool};
use uniqueness_score::sum_product_score;

/// Maximum time per single measurement (seconds).
const TIMEOUT_SECS: u64 = 60;

/// Run a closure with a timeout. Returns None if timed out.
fn with_timeout<T: Send + 'static>(
    timeout: Duration,
    f: impl FnOnce() -> T + Send + 'static,
) -> Option<(T, Duration)> {
    let (tx, rx) = mpsc::channel();
    let start = Instant::now();
    std::thread::spawn(move || {
        let result = f();
        let _ = tx.send(result);
    });
    match rx.recv_timeout(timeout) {
        Ok(result) => Some((result, start.elapsed())),
        Err(_) => None,
    }
}

/// Least-squares slope of `ln(time)` against `ln(size)`.
fn fit_exponent(points: &[(f64, f64)]) -> Option<f64> {
    let logs: Vec<(f64, f64)> = points
        .iter()
        .filter(|(x, y)| *x > 0.0 && *y > 0.0)
        .map(|(x, y)| (x.ln(), y.ln()))
        .collect();
    if logs.len() < 2 {
        return None;
    }
    let n = logs.len() as f64;
    let mean_x = logs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = logs.iter().map(|p| p.1).sum::<f64>() / n;
    let cov: f64 = logs.iter().map(|(x, y)| (x - mean_x) * (y - mean_y)).sum();
    let var: f64 = logs.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
    if var == 0.0 {
        None
    } else {
        Some(cov / var)
    }
}

fn print_exponent(label: &str, points: &[(f64, f64)]) {
    match fit_exponent(points) {
        Some(k) => println!("  {} ~ size^{:.2}\n", label, k),
        None => println!("  {}: not enough points to fit\n", label),
    }
}

fn main() {
    env_logger::init();

    println!("================================================================");
    println!("  SCALING: sum/product scoring and Fibonacci-GCD search");
    println!("================================================================\n");

    bench_scoring();
    bench_factor_search();
}

fn bench_scoring() {
    println!("--- sum_product_score ---");
    println!("  {:>8} {:>12} {:>12} {:>12}", "size", "series", "score", "time(us)");

    let basis = SmoothBasis::seven();
    let mut random_points = Vec::new();
    let mut smooth_points = Vec::new();

    for size in [32usize, 64, 128, 256, 512, 1024] {
        for (label, complement) in [("random", None), ("7-smooth", Some(false))] {
            let series = match complement {
                None => random_series(size, 1),
                Some(c) => smooth_series(size, &basis, c),
            };
            match with_timeout(Duration::from_secs(TIMEOUT_SECS), move || {
                sum_product_score(&series)
            }) {
                Some((score, elapsed)) => {
                    println!(
                        "  {:>8} {:>12} {:>12.6} {:>12}",
                        size,
                        label,
                        score.combined,
                        elapsed.as_micros()
                    );
                    let point = (size as f64, elapsed.as_secs_f64());
                    if complement.is_none() {
                        random_points.push(point);
                    } else {
                        smooth_points.push(point);
                    }
                }
                None => println!("  {:>8} {:>12} {:>12} {:>12}", size, label, "-", "TIMEOUT"),
            }
        }
    }
    println!();
    print_exponent("random scoring time", &random_points);
    print_exponent("7-smooth scoring time", &smooth_points);
}

fn bench_factor_search() {
    println!("--- Fibonacci-GCD pipeline over adjacent primes ---");
    println!(
        "  {:>8} {:>8} {:>12} {:>12} {:>12}",
        "bound", "pairs", "mean index", "max index", "time(ms)"
    );

    let mut points = Vec::new();
    for bound in [1_000u64, 5_000, 20_000, 50_000] {
        let search = move || -> sequence_core::Result<_> {
            let pool = WorkerPool::with_default_capacity()?;
            let pipeline = FactorSearchPipeline::new(&pool, vec![FibonacciSearcher::fibonacci()])?;
            pipeline.run(&mut SequentialSource::new(bound))
        };
        let measured = with_timeout(Duration::from_secs(TIMEOUT_SECS), search);

        match measured {
            Some((Ok(report), elapsed)) => {
                let indices: Vec<u64> = report.results.iter().map(|r| r.index).collect();
                let mean = indices.iter().sum::<u64>() as f64
                    / indices.len().max(1) as f64;
                let max = indices.iter().copied().max().unwrap_or(0);
                println!(
                    "  {:>8} {:>8} {:>12.1} {:>12} {:>12}",
                    bound,
                    report.len(),
                    mean,
                    max,
                    elapsed.as_millis()
                );
                points.push((bound as f64, elapsed.as_secs_f64()));
            }
            Some((Err(e), _)) => println!("  {:>8} error: {}", bound, e),
            None => println!("  {:>8} {:>8} {:>12} {:>12} {:>12}", bound, "-", "-", "-", "TIMEOUT"),
        }
    }
    println!();
    print_exponent("factor search time", &points);
}
