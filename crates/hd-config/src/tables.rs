//! Conditional probability table types.
//!
//! These types match the tables JSON file layout: an unconditional gene
//! prior for founders, a trait-given-gene-count table, and a scalar
//! mutation rate. Tables are loaded once per run and are read-only after.

use hd_common::GeneCount;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::validate::{ValidationError, ValidationResult};

/// Tolerance for "row sums to one" checks.
pub const SUM_TOLERANCE: f64 = 1e-6;

/// Complete probability tables configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProbabilityTables {
    pub schema_version: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Unconditional gene count prior used for founders.
    pub gene: GenePrior,

    /// Probability of showing the trait given the gene count.
    #[serde(rename = "trait")]
    pub trait_given_genes: TraitTable,

    /// Probability that a transmitted allele flips state.
    pub mutation: f64,
}

/// Founder prior over gene counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GenePrior {
    pub zero: f64,
    pub one: f64,
    pub two: f64,
}

impl GenePrior {
    pub fn get(&self, count: GeneCount) -> f64 {
        match count {
            GeneCount::Zero => self.zero,
            GeneCount::One => self.one,
            GeneCount::Two => self.two,
        }
    }

    /// Prior as an array indexed by [`GeneCount::index`].
    pub fn as_array(&self) -> [f64; 3] {
        [self.zero, self.one, self.two]
    }
}

/// Trait probabilities for one gene count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TraitParams {
    pub present: f64,
    pub absent: f64,

    #[serde(rename = "_comment", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl TraitParams {
    pub fn new(present: f64, absent: f64) -> Self {
        Self {
            present,
            absent,
            comment: None,
        }
    }

    pub fn get(&self, has_trait: bool) -> f64 {
        if has_trait {
            self.present
        } else {
            self.absent
        }
    }
}

/// Trait-given-gene-count table (3 rows × 2 columns).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TraitTable {
    pub zero: TraitParams,
    pub one: TraitParams,
    pub two: TraitParams,
}

impl TraitTable {
    pub fn row(&self, count: GeneCount) -> &TraitParams {
        match count {
            GeneCount::Zero => &self.zero,
            GeneCount::One => &self.one,
            GeneCount::Two => &self.two,
        }
    }
}

impl ProbabilityTables {
    /// Load tables from a JSON file.
    pub fn from_file(path: &std::path::Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse_json(&content)
    }

    /// Parse tables from a JSON string.
    pub fn parse_json(json: &str) -> ValidationResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    /// Founder prior for a gene count.
    #[inline]
    pub fn gene_prior(&self, count: GeneCount) -> f64 {
        self.gene.get(count)
    }

    /// P(trait = `has_trait` | gene count).
    #[inline]
    pub fn trait_probability(&self, count: GeneCount, has_trait: bool) -> f64 {
        self.trait_given_genes.row(count).get(has_trait)
    }

    /// Check if the founder prior sums to 1.0 (within tolerance).
    pub fn gene_prior_sums_to_one(&self, tolerance: f64) -> bool {
        let sum: f64 = self.gene.as_array().iter().sum();
        (sum - 1.0).abs() < tolerance
    }

    /// SHA-256 over the canonical JSON form, hex encoded.
    ///
    /// Reports carry this so results can be matched to the tables that
    /// produced them.
    pub fn fingerprint(&self) -> String {
        let canonical = serde_json::to_vec(self).unwrap_or_default();
        hex::encode(Sha256::digest(&canonical))
    }

    /// JSON Schema describing the tables file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(ProbabilityTables)
    }
}

/// Embedded default tables JSON for fallback.
const DEFAULT_TABLES_JSON: &str = include_str!("schemas/tables.default.json");

impl Default for ProbabilityTables {
    fn default() -> Self {
        // Parse the embedded default tables JSON
        // This should never fail since the JSON is embedded at compile time
        Self::parse_json(DEFAULT_TABLES_JSON).expect("Embedded default tables JSON is invalid")
    }
}
