//! Gzip-compressed report files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::Result;

/// A buffered writer that gzip-compresses (best compression) into `path`.
///
/// Call [`GzEncoder::finish`] (or [`finish_gzip`]) to flush the trailer and
/// surface any write error.
pub fn create_gzip(path: impl AsRef<Path>) -> Result<GzEncoder<BufWriter<File>>> {
    let file = File::create(path.as_ref())?;
    Ok(GzEncoder::new(BufWriter::new(file), Compression::best()))
}

/// Finish a gzip stream and flush the underlying file.
pub fn finish_gzip<W: Write>(encoder: GzEncoder<W>) -> Result<()> {
    let mut inner = encoder.finish()?;
    inner.flush()?;
    Ok(())
}
