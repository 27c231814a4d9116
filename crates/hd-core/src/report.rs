//! Report structures and renderers.
//!
//! Each report is a plain data struct that serializes directly to the JSON
//! output format; the text renderers consume the same structs.

use std::fmt::Write as _;

use hd_common::{GeneCount, Result, SCHEMA_VERSION};
use hd_config::{ProbabilityTables, ResolvedTables};
use serde::{Deserialize, Serialize};

use crate::inference::{
    HypothesisSpace, Inference, InferenceStats, PersonPosterior, MAX_ENUMERABLE,
};
use crate::pedigree::Pedigree;

/// Gene posterior keyed by copy count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneReport {
    #[serde(rename = "0")]
    pub zero: f64,
    #[serde(rename = "1")]
    pub one: f64,
    #[serde(rename = "2")]
    pub two: f64,
}

/// Trait posterior keyed by presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitReport {
    #[serde(rename = "true")]
    pub present: f64,
    #[serde(rename = "false")]
    pub absent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualReport {
    pub name: String,
    pub gene: GeneReport,
    #[serde(rename = "trait")]
    pub trait_: TraitReport,
}

impl From<&PersonPosterior> for IndividualReport {
    fn from(p: &PersonPosterior) -> Self {
        Self {
            name: p.name.clone(),
            gene: GeneReport {
                zero: p.genes.get(GeneCount::Zero),
                one: p.genes.get(GeneCount::One),
                two: p.genes.get(GeneCount::Two),
            },
            trait_: TraitReport {
                present: p.traits.present(),
                absent: p.traits.absent(),
            },
        }
    }
}

/// Output of `heredity infer`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceReport {
    pub schema_version: String,
    pub tables_fingerprint: String,
    pub tables_source: String,
    pub stats: InferenceStats,
    pub individuals: Vec<IndividualReport>,
}

impl InferenceReport {
    pub fn new(inference: &Inference, tables: &ResolvedTables) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            tables_fingerprint: tables.tables.fingerprint(),
            tables_source: tables.source.to_string(),
            stats: inference.stats.clone(),
            individuals: inference
                .posteriors
                .iter()
                .map(IndividualReport::from)
                .collect(),
        }
    }

    /// Plain-text layout: one block per individual, gene counts descending,
    /// trait `True` before `False`, four decimal places.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for person in &self.individuals {
            let _ = writeln!(out, "{}:", person.name);
            let _ = writeln!(out, "  Gene:");
            let _ = writeln!(out, "    2: {:.4}", person.gene.two);
            let _ = writeln!(out, "    1: {:.4}", person.gene.one);
            let _ = writeln!(out, "    0: {:.4}", person.gene.zero);
            let _ = writeln!(out, "  Trait:");
            let _ = writeln!(out, "    True: {:.4}", person.trait_.present);
            let _ = writeln!(out, "    False: {:.4}", person.trait_.absent);
        }
        out
    }
}

/// Output of `heredity check`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckReport {
    pub schema_version: String,
    pub individuals: usize,
    pub founders: usize,
    pub trait_evidence: usize,
    pub gene_evidence: usize,
    /// `None` when the pedigree is too large to enumerate at all.
    pub valid_trait_masks: Option<u64>,
    /// `None` when the count overflows `u128`.
    pub hypotheses: Option<u128>,
    pub max_individuals: usize,
    pub within_limit: bool,
}

impl CheckReport {
    pub fn new(pedigree: &Pedigree, max_individuals: usize) -> Result<Self> {
        let limit = max_individuals.min(MAX_ENUMERABLE);
        let (valid_trait_masks, hypotheses) = if pedigree.len() <= MAX_ENUMERABLE {
            let space = HypothesisSpace::new(pedigree)?;
            (
                Some(space.valid_trait_mask_count()),
                space.hypothesis_count(),
            )
        } else {
            (None, None)
        };
        Ok(Self {
            schema_version: SCHEMA_VERSION.to_string(),
            individuals: pedigree.len(),
            founders: pedigree.founders().count(),
            trait_evidence: pedigree.trait_evidence_count(),
            gene_evidence: pedigree.gene_evidence_count(),
            valid_trait_masks,
            hypotheses,
            max_individuals: limit,
            within_limit: pedigree.len() <= limit,
        })
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "individuals:    {}", self.individuals);
        let _ = writeln!(out, "founders:       {}", self.founders);
        let _ = writeln!(out, "trait evidence: {}", self.trait_evidence);
        let _ = writeln!(out, "gene evidence:  {}", self.gene_evidence);
        match self.hypotheses {
            Some(h) => {
                let _ = writeln!(out, "hypotheses:     {h}");
            }
            None => {
                let _ = writeln!(out, "hypotheses:     (not enumerable)");
            }
        }
        let verdict = if self.within_limit {
            "ok"
        } else {
            "exceeds size limit"
        };
        let _ = writeln!(out, "status:         {verdict} (limit {})", self.max_individuals);
        out
    }
}

/// Output of `heredity tables show`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesReport {
    pub source: String,
    pub fingerprint: String,
    pub tables: ProbabilityTables,
}

impl From<&ResolvedTables> for TablesReport {
    fn from(resolved: &ResolvedTables) -> Self {
        Self {
            source: resolved.source.to_string(),
            fingerprint: resolved.tables.fingerprint(),
            tables: resolved.tables.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{infer, InferenceConfig};
    use crate::pedigree::PersonRecord;
    use hd_config::TablesSource;

    fn resolved() -> ResolvedTables {
        ResolvedTables {
            tables: ProbabilityTables::default(),
            source: TablesSource::Defaults,
        }
    }

    fn lily_only() -> Pedigree {
        Pedigree::from_records(vec![PersonRecord::founder("Lily")]).unwrap()
    }

    #[test]
    fn text_layout_matches_reference_format() {
        let tables = resolved();
        let inference = infer(&lily_only(), &tables.tables, &InferenceConfig::default()).unwrap();
        let text = InferenceReport::new(&inference, &tables).render_text();
        let expected = "\
Lily:
  Gene:
    2: 0.0100
    1: 0.0300
    0: 0.9600
  Trait:
    True: 0.0329
    False: 0.9671
";
        assert_eq!(text, expected);
    }

    #[test]
    fn json_uses_string_keys() {
        let tables = resolved();
        let inference = infer(&lily_only(), &tables.tables, &InferenceConfig::default()).unwrap();
        let report = InferenceReport::new(&inference, &tables);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["schema_version"], SCHEMA_VERSION);
        assert_eq!(value["tables_source"], "defaults");
        let lily = &value["individuals"][0];
        assert_eq!(lily["name"], "Lily");
        assert!((lily["gene"]["2"].as_f64().unwrap() - 0.01).abs() < 1e-12);
        assert!((lily["trait"]["true"].as_f64().unwrap() - 0.0329).abs() < 1e-12);
        assert_eq!(value["stats"]["individuals"], 1);
    }

    #[test]
    fn check_counts_evidence() {
        let pedigree = Pedigree::from_records(vec![
            PersonRecord::child("Harry", "Lily", "James"),
            PersonRecord::founder("James").with_trait(true),
            PersonRecord::founder("Lily").with_genes(GeneCount::Zero),
        ])
        .unwrap();
        let report = CheckReport::new(&pedigree, 18).unwrap();
        assert_eq!(report.individuals, 3);
        assert_eq!(report.founders, 2);
        assert_eq!(report.trait_evidence, 1);
        assert_eq!(report.gene_evidence, 1);
        assert_eq!(report.valid_trait_masks, Some(4));
        assert_eq!(report.hypotheses, Some(4 * 9));
        assert!(report.within_limit);
        assert!(report.render_text().contains("status:         ok"));
    }

    #[test]
    fn check_survives_uncountable_hypothesis_space() {
        let records: Vec<PersonRecord> = (0..55)
            .map(|i| PersonRecord::founder(&format!("p{i}")))
            .collect();
        let pedigree = Pedigree::from_records(records).unwrap();
        let report = CheckReport::new(&pedigree, 18).unwrap();
        assert_eq!(report.individuals, 55);
        assert_eq!(report.valid_trait_masks, Some(1u64 << 55));
        assert_eq!(report.hypotheses, None);
        assert!(!report.within_limit);
        assert!(report.render_text().contains("(not enumerable)"));
    }

    #[test]
    fn check_flags_oversized_pedigree() {
        let records: Vec<PersonRecord> = (0..4)
            .map(|i| PersonRecord::founder(&format!("p{i}")))
            .collect();
        let pedigree = Pedigree::from_records(records).unwrap();
        let report = CheckReport::new(&pedigree, 3).unwrap();
        assert!(!report.within_limit);
        assert_eq!(report.max_individuals, 3);
    }
}
