//! Markdown, CSV and JSON renderings of finished results.

use std::io::Write;

use serde::Serialize;

use sequence_core::Result;

use crate::leaderboard::Leaderboard;
use crate::sweep::SizeScore;

/// Write `leaderboard` as a Markdown table, one row per slot, best first.
pub fn write_leaderboard_markdown<W: Write>(out: &mut W, leaderboard: &Leaderboard) -> Result<()> {
    writeln!(out, "| Name | Score | Sum | Product | Numbers |")?;
    writeln!(out, "| ---- | ----- | --- | ------- | ------- |")?;
    for record in leaderboard {
        writeln!(
            out,
            "| [{name}](https://oeis.org/{name}) | {:.6} | {:.6} | {:.6} | [{}] |",
            record.score.combined,
            record.score.sum,
            record.score.product,
            record.numbers.join(" "),
            name = record.name,
        )?;
    }
    Ok(())
}

/// The README that accompanies a corpus run: the sweep plot reference
/// followed by the leaderboard table.
pub fn write_readme<W: Write>(out: &mut W, leaderboard: &Leaderboard) -> Result<()> {
    writeln!(out, "Score for seven smooth series, A002473, of different sizes:")?;
    writeln!(out, "![seven smooth scores](sevenSmooth.png?raw=true)")?;
    writeln!(out)?;
    write_leaderboard_markdown(out, leaderboard)
}

/// Write sweep results as `size, sum, product, score` CSV.
pub fn write_size_csv<W: Write>(out: &mut W, results: &[SizeScore]) -> Result<()> {
    writeln!(out, "size, sum, product, score")?;
    for r in results {
        writeln!(
            out,
            "{}, {}, {}, {}",
            r.size, r.score.sum, r.score.product, r.score.combined
        )?;
    }
    Ok(())
}

/// Pretty-printed JSON of any serializable report.
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(std::io::Error::from)?;
    writeln!(out)?;
    Ok(())
}
