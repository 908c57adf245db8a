//! Atomic neutron counts derived from a periodic-table dataset.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use num_bigint::BigInt;
use serde::Deserialize;

use crate::{Result, Sequence, SequenceError};

/// The two fields of a periodic-table element this crate consumes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Element {
    pub atomic_mass: f64,
    pub number: i64,
}

impl Element {
    /// `round(atomic_mass) - number`, rounding halves away from zero.
    pub fn neutron_count(&self) -> i64 {
        self.atomic_mass.round() as i64 - self.number
    }
}

/// Accepts both `{"elements": [...]}` and a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum TableDocument {
    Wrapped { elements: Vec<Element> },
    Bare(Vec<Element>),
}

/// Load the elements of a periodic-table JSON file.
pub fn load_periodic_table(path: impl AsRef<Path>) -> Result<Vec<Element>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    parse_periodic_table(&contents).map_err(|source| SequenceError::Dataset {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_periodic_table(json: &str) -> std::result::Result<Vec<Element>, serde_json::Error> {
    let document: TableDocument = serde_json::from_str(json)?;
    Ok(match document {
        TableDocument::Wrapped { elements } => elements,
        TableDocument::Bare(elements) => elements,
    })
}

/// Distinct neutron counts of `elements`, ascending.
pub fn neutron_counts(elements: &[Element]) -> Sequence {
    elements
        .iter()
        .map(Element::neutron_count)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(BigInt::from)
        .collect()
}
