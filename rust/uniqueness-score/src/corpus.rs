//! Reader for OEIS `stripped`-style corpora.
//!
//! Each data line is `<name> <csv>`, e.g. `A000045 ,0,1,1,2,3,5,8,`. Lines
//! starting with `#` are comments. The file may be gzip-compressed; that is
//! detected from its magic bytes rather than its name.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use num_bigint::BigInt;
use sequence_core::{Result, SequenceError};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// One named sequence from the corpus, terms still in text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    pub name: String,
    pub tokens: Vec<String>,
}

impl CorpusEntry {
    /// Parse the tokens as base-10 integers, keeping the first occurrence of
    /// each distinct value.
    pub fn distinct_integers(&self) -> Result<Vec<BigInt>> {
        let mut seen = HashSet::with_capacity(self.tokens.len());
        let mut integers = Vec::with_capacity(self.tokens.len());
        for token in &self.tokens {
            let invalid = || {
                SequenceError::invalid_input(format!(
                    "invalid number {:?} in sequence {}",
                    token, self.name
                ))
            };
            if !is_decimal_integer(token) {
                return Err(invalid());
            }
            let value: BigInt = token.parse().map_err(|_| invalid())?;
            if seen.insert(value.clone()) {
                integers.push(value);
            }
        }
        Ok(integers)
    }
}

/// `[+-]?[0-9]+`. `BigInt::from_str` alone also accepts `_` separators.
fn is_decimal_integer(token: &str) -> bool {
    let digits = token.strip_prefix(&['+', '-'][..]).unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a single corpus line. Comments and blank lines yield `Ok(None)`.
pub fn parse_line(line: &str, line_number: usize) -> Result<Option<CorpusEntry>> {
    let line = line.trim_end_matches(&['\n', '\r'][..]);
    if line.starts_with('#') || line.trim().is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(' ').collect();
    if fields.len() != 2 {
        return Err(SequenceError::malformed(
            line_number,
            format!("expected `<name> <csv>`, found {} fields", fields.len()),
        ));
    }

    if fields[0].is_empty() {
        return Err(SequenceError::malformed(line_number, "empty sequence name"));
    }

    let tokens: Vec<String> = fields[1]
        .trim_matches(',')
        .split(',')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();
    if tokens.is_empty() {
        return Err(SequenceError::malformed(
            line_number,
            format!("sequence {} has no terms", fields[0]),
        ));
    }

    Ok(Some(CorpusEntry {
        name: fields[0].to_string(),
        tokens,
    }))
}

/// Streams [`CorpusEntry`] values from a line-oriented reader.
pub struct CorpusReader<R> {
    reader: R,
    line_number: usize,
    buf: String,
}

impl<R: BufRead> CorpusReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buf: String::new(),
        }
    }

    /// Number of lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for CorpusReader<R> {
    type Item = Result<CorpusEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_number += 1;
                    match parse_line(&self.buf, self.line_number) {
                        Ok(Some(entry)) => return Some(Ok(entry)),
                        Ok(None) => continue,
                        Err(e) => return Some(Err(e)),
                    }
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

/// Open a corpus file, transparently decompressing gzip.
pub fn open_corpus(path: impl AsRef<Path>) -> Result<CorpusReader<Box<dyn BufRead>>> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);
    let compressed = reader.fill_buf()?.starts_with(&GZIP_MAGIC);
    log::info!(
        "reading corpus {} ({})",
        path.display(),
        if compressed { "gzip" } else { "plain" }
    );

    let reader: Box<dyn BufRead> = if compressed {
        Box::new(BufReader::new(MultiGzDecoder::new(reader)))
    } else {
        Box::new(reader)
    };
    Ok(CorpusReader::new(reader))
}
