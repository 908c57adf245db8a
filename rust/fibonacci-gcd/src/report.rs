//! CSV renderings of a [`FactorReport`].

use std::io::Write;
use std::path::{Path, PathBuf};

use sequence_core::{create_gzip, finish_gzip, Result};

use crate::pipeline::{FactorReport, FactorResult};

/// `x, y, index, gcd`, one row per result in the given order.
pub fn write_results_csv<W: Write>(out: &mut W, results: &[FactorResult]) -> Result<()> {
    writeln!(out, "x, y, index, gcd")?;
    for r in results {
        writeln!(out, "{}, {}, {}, {}", r.x, r.y, r.index, r.gcd)?;
    }
    Ok(())
}

/// `x, y, index, gcd, slope` with the slope to six decimals.
pub fn write_cluster_csv<W: Write>(out: &mut W, results: &[FactorResult]) -> Result<()> {
    writeln!(out, "x, y, index, gcd, slope")?;
    for r in results {
        writeln!(
            out,
            "{}, {}, {}, {}, {:.6}",
            r.x,
            r.y,
            r.index,
            r.gcd,
            r.slope()
        )?;
    }
    Ok(())
}

/// Write `<name>.csv.gz` (sorted by `x`) and `<name>_cluster.csv.gz` (sorted
/// by slope) under `dir`, returning both paths.
pub fn write_report_files(
    dir: impl AsRef<Path>,
    name: &str,
    report: &FactorReport,
) -> Result<(PathBuf, PathBuf)> {
    let dir = dir.as_ref();

    let primary = dir.join(format!("{}.csv.gz", name));
    let mut out = create_gzip(&primary)?;
    write_results_csv(&mut out, &report.by_x())?;
    finish_gzip(out)?;

    let cluster = dir.join(format!("{}_cluster.csv.gz", name));
    let mut out = create_gzip(&cluster)?;
    write_cluster_csv(&mut out, &report.by_slope())?;
    finish_gzip(out)?;

    log::info!("wrote {} and {}", primary.display(), cluster.display());
    Ok((primary, cluster))
}
