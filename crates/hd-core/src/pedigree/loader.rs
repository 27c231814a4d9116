//! Pedigree CSV loader.
//!
//! Expected header: `name,mother,father,trait` with an optional `gene`
//! column. Blank parents mean "unknown"; `trait` is `1`, `0`, or blank;
//! `gene` is `0`, `1`, `2`, or blank. Row numbers in errors are the 1-based
//! file line on which the record starts (the header is line 1).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use hd_common::{Error, GeneCount, Result};
use serde::Deserialize;
use tracing::debug;

use super::{Pedigree, PersonRecord};

const REQUIRED_COLUMNS: [&str; 4] = ["name", "mother", "father", "trait"];

#[derive(Debug, Deserialize)]
struct PedigreeRow {
    name: String,
    #[serde(default)]
    mother: Option<String>,
    #[serde(default)]
    father: Option<String>,
    #[serde(rename = "trait", default)]
    observed_trait: Option<String>,
    #[serde(default)]
    gene: Option<String>,
}

fn parse_trait(row: usize, value: Option<String>) -> Result<Option<bool>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some("1") => Ok(Some(true)),
        Some("0") => Ok(Some(false)),
        Some(other) => Err(Error::InvalidTrait {
            row,
            value: other.to_string(),
        }),
    }
}

fn parse_genes(row: usize, value: Option<String>) -> Result<Option<GeneCount>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => GeneCount::parse(raw)
            .map(Some)
            .ok_or_else(|| Error::InvalidGeneCount {
                row,
                value: raw.to_string(),
            }),
    }
}

fn csv_error(err: csv::Error) -> Error {
    Error::Pedigree(err.to_string())
}

/// Read person records from CSV without structural validation.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<PersonRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_error)?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(Error::Pedigree(format!(
                "missing required column '{column}'"
            )));
        }
    }

    let mut records = Vec::new();
    let mut raw = csv::StringRecord::new();
    while rdr.read_record(&mut raw).map_err(csv_error)? {
        // Start line of the record; quoted fields may span lines.
        let line = raw.position().map_or(0, |p| p.line() as usize);
        let row: PedigreeRow = raw
            .deserialize(Some(&headers))
            .map_err(|e| Error::Pedigree(format!("row {line}: {e}")))?;
        records.push(PersonRecord {
            observed_trait: parse_trait(line, row.observed_trait)?,
            observed_genes: parse_genes(line, row.gene)?,
            name: row.name,
            mother: row.mother,
            father: row.father,
        });
    }
    Ok(records)
}

/// Read and validate a pedigree from CSV.
pub fn read_pedigree<R: Read>(reader: R) -> Result<Pedigree> {
    Pedigree::from_records(read_records(reader)?)
}

/// Open, read, and validate a pedigree file.
pub fn load_pedigree(path: &Path) -> Result<Pedigree> {
    let file = File::open(path)?;
    let pedigree = read_pedigree(file)?;
    debug!(path = %path.display(), individuals = pedigree.len(), "pedigree loaded");
    Ok(pedigree)
}
