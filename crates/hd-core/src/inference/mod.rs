//! Exact inference over a pedigree.
//!
//! Every combination of gene counts and trait values is enumerated, its joint
//! probability evaluated, and the results summed per individual. See
//! [`engine::infer`] for the entry point.

pub mod accumulate;
pub mod engine;
pub mod enumerate;
pub mod joint;
pub mod posterior;

pub use accumulate::Accumulator;
pub use engine::{infer, Inference, InferenceConfig, InferenceStats, DEFAULT_MAX_INDIVIDUALS};
pub use enumerate::{GeneAssignment, HypothesisSpace, TraitEvidence, TraitMask, MAX_ENUMERABLE};
pub use joint::{
    gene_probability, inherited_gene_probability, joint_probability, transmission_probability,
};
pub use posterior::{GeneDistribution, PersonPosterior, Posteriors, TraitDistribution};
