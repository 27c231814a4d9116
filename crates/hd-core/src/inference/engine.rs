//! Exact inference driver.
//!
//! Enumerate → evaluate → accumulate → normalize. The sequential path folds
//! every hypothesis into one accumulator. The parallel path hands each
//! admitted trait mask to a rayon worker with its own accumulator, merges
//! the partial accumulators, and normalizes once after the final merge.

use hd_common::{Error, Result};
use hd_config::ProbabilityTables;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::accumulate::Accumulator;
use super::enumerate::{HypothesisSpace, MAX_ENUMERABLE};
use super::joint::joint_probability;
use super::posterior::Posteriors;
use crate::pedigree::Pedigree;

/// Default cap on pedigree size; 3^18 · 2^18 hypotheses is already large.
pub const DEFAULT_MAX_INDIVIDUALS: usize = 18;

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Split the enumeration across worker threads (requires the
    /// `parallel` feature; ignored otherwise).
    pub parallel: bool,
    /// Reject pedigrees with more individuals than this.
    pub max_individuals: usize,
    /// Relative tolerance for the gene-mass/trait-mass cross-check.
    pub consistency_tolerance: f64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            parallel: cfg!(feature = "parallel"),
            max_individuals: DEFAULT_MAX_INDIVIDUALS,
            consistency_tolerance: 1e-9,
        }
    }
}

/// Summary of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceStats {
    pub individuals: usize,
    pub valid_trait_masks: u64,
    pub hypotheses: u64,
    /// Total probability of the evidence, P(observations).
    pub evidence_mass: f64,
    pub parallel: bool,
}

/// Posteriors plus run statistics.
#[derive(Debug, Clone)]
pub struct Inference {
    pub posteriors: Posteriors,
    pub stats: InferenceStats,
}

/// Compute every individual's posterior gene and trait distributions.
pub fn infer(
    pedigree: &Pedigree,
    tables: &ProbabilityTables,
    config: &InferenceConfig,
) -> Result<Inference> {
    tables.validate()?;

    let limit = config.max_individuals.min(MAX_ENUMERABLE);
    if pedigree.len() > limit {
        return Err(Error::PedigreeTooLarge {
            count: pedigree.len(),
            max: limit,
        });
    }

    let space = HypothesisSpace::new(pedigree)?;
    let parallel = config.parallel && cfg!(feature = "parallel");
    if config.parallel && !parallel {
        warn!("parallel enumeration requested without the `parallel` feature, running sequentially");
    }
    info!(
        individuals = pedigree.len(),
        trait_evidence = pedigree.trait_evidence_count(),
        gene_evidence = pedigree.gene_evidence_count(),
        hypotheses = ?space.hypothesis_count(),
        parallel,
        "enumerating hypotheses"
    );

    let accumulator = if parallel {
        accumulate_parallel(&space, tables)
    } else {
        accumulate_sequential(&space, tables)
    };

    let evidence_mass = accumulator.evidence_mass();
    if !evidence_mass.is_finite() || evidence_mass <= 0.0 {
        return Err(Error::EmptyHypothesisSpace);
    }
    accumulator.check_consistency(config.consistency_tolerance)?;

    let posteriors = accumulator.normalize(pedigree)?;
    let stats = InferenceStats {
        individuals: pedigree.len(),
        valid_trait_masks: space.valid_trait_mask_count(),
        hypotheses: accumulator.hypotheses(),
        evidence_mass,
        parallel,
    };
    info!(
        hypotheses = stats.hypotheses,
        evidence_mass = stats.evidence_mass,
        "inference complete"
    );
    Ok(Inference { posteriors, stats })
}

fn accumulate_sequential(space: &HypothesisSpace<'_>, tables: &ProbabilityTables) -> Accumulator {
    let pedigree = space.pedigree();
    let mut acc = Accumulator::new(pedigree.len());
    space.visit(|genes, traits| {
        let p = joint_probability(pedigree, tables, genes.counts(), traits);
        acc.add(genes.counts(), traits, p);
    });
    acc
}

#[cfg(feature = "parallel")]
fn accumulate_parallel(space: &HypothesisSpace<'_>, tables: &ProbabilityTables) -> Accumulator {
    use rayon::prelude::*;

    let pedigree = space.pedigree();
    let n = pedigree.len();
    let masks = space.valid_trait_masks();
    debug!(
        masks = masks.len(),
        threads = rayon::current_num_threads(),
        "distributing trait masks across workers"
    );
    masks
        .par_iter()
        .fold(
            || Accumulator::new(n),
            |mut acc, &mask| {
                space.visit_trait_mask(mask, |genes, traits| {
                    let p = joint_probability(pedigree, tables, genes.counts(), traits);
                    acc.add(genes.counts(), traits, p);
                });
                acc
            },
        )
        .reduce(
            || Accumulator::new(n),
            |mut left, right| {
                left.merge(&right);
                left
            },
        )
}

#[cfg(not(feature = "parallel"))]
fn accumulate_parallel(space: &HypothesisSpace<'_>, tables: &ProbabilityTables) -> Accumulator {
    debug!("parallel feature disabled, enumerating sequentially");
    accumulate_sequential(space, tables)
}
