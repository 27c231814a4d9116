//! Semantic validation of probability tables.

use hd_common::{schema, GeneCount};
use thiserror::Error;

use crate::tables::{ProbabilityTables, SUM_TOLERANCE};

/// Result alias for table loading and validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors raised while loading or validating tables.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("incompatible schema version {found} (expected major version of {expected})")]
    IncompatibleSchema { found: String, expected: String },

    #[error("{field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl From<ValidationError> for hd_common::Error {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::IoError(msg) => hd_common::Error::Config(msg),
            other => hd_common::Error::InvalidTables(other.to_string()),
        }
    }
}

fn check_probability(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            reason: format!("must be a probability in [0, 1], got {value}"),
        });
    }
    Ok(())
}

fn gene_label(count: GeneCount) -> &'static str {
    match count {
        GeneCount::Zero => "zero",
        GeneCount::One => "one",
        GeneCount::Two => "two",
    }
}

impl ProbabilityTables {
    /// Check schema compatibility and every probabilistic constraint.
    pub fn validate(&self) -> ValidationResult<()> {
        if !schema::is_compatible(&self.schema_version) {
            return Err(ValidationError::IncompatibleSchema {
                found: self.schema_version.clone(),
                expected: schema::SCHEMA_VERSION.to_string(),
            });
        }

        for count in GeneCount::ALL {
            check_probability(
                &format!("gene.{}", gene_label(count)),
                self.gene_prior(count),
            )?;
        }
        if !self.gene_prior_sums_to_one(SUM_TOLERANCE) {
            let sum: f64 = self.gene.as_array().iter().sum();
            return Err(ValidationError::InvalidValue {
                field: "gene".to_string(),
                reason: format!("prior must sum to 1, got {sum}"),
            });
        }

        for count in GeneCount::ALL {
            let label = gene_label(count);
            let row = self.trait_given_genes.row(count);
            check_probability(&format!("trait.{label}.present"), row.present)?;
            check_probability(&format!("trait.{label}.absent"), row.absent)?;
            let sum = row.present + row.absent;
            if (sum - 1.0).abs() >= SUM_TOLERANCE {
                return Err(ValidationError::InvalidValue {
                    field: format!("trait.{label}"),
                    reason: format!("present + absent must sum to 1, got {sum}"),
                });
            }
        }

        check_probability("mutation", self.mutation)
    }
}
