//! Joint probability of one complete hypothesis.
//!
//! The network factorizes per individual: a gene factor (founder prior, or
//! inheritance from the two parents' counts with mutation) times a trait
//! factor (trait CPT at the individual's own gene count). The joint
//! probability is the product of those factors over the whole pedigree.

use hd_common::{GeneCount, PersonId};
use hd_config::ProbabilityTables;

use super::enumerate::TraitMask;
use crate::pedigree::Pedigree;

/// Probability that a parent carrying `parent` copies passes on a
/// functional allele.
///
/// - 0 copies: only by mutation, `m`
/// - 1 copy: one of two alleles is chosen; mutation in either direction
///   cancels out, `0.5`
/// - 2 copies: unless mutation flips it, `1 - m`
#[inline]
pub fn transmission_probability(parent: GeneCount, mutation: f64) -> f64 {
    match parent {
        GeneCount::Zero => mutation,
        GeneCount::One => 0.5,
        GeneCount::Two => 1.0 - mutation,
    }
}

/// P(child has `child` copies | mother's and father's counts).
pub fn inherited_gene_probability(
    mother: GeneCount,
    father: GeneCount,
    child: GeneCount,
    mutation: f64,
) -> f64 {
    let from_mother = transmission_probability(mother, mutation);
    let from_father = transmission_probability(father, mutation);
    match child {
        GeneCount::Zero => (1.0 - from_mother) * (1.0 - from_father),
        GeneCount::One => from_mother * (1.0 - from_father) + (1.0 - from_mother) * from_father,
        GeneCount::Two => from_mother * from_father,
    }
}

/// Gene factor for one individual under a gene assignment.
pub fn gene_probability(
    pedigree: &Pedigree,
    tables: &ProbabilityTables,
    genes: &[GeneCount],
    id: PersonId,
) -> f64 {
    let own = genes[id.index()];
    match pedigree.get(id).parents() {
        None => tables.gene_prior(own),
        Some(parents) => inherited_gene_probability(
            genes[parents.mother.index()],
            genes[parents.father.index()],
            own,
            tables.mutation,
        ),
    }
}

/// Probability that `genes` and `traits` together describe reality.
pub fn joint_probability(
    pedigree: &Pedigree,
    tables: &ProbabilityTables,
    genes: &[GeneCount],
    traits: TraitMask,
) -> f64 {
    pedigree
        .iter()
        .map(|(id, _)| {
            let gene = gene_probability(pedigree, tables, genes, id);
            let trait_p = tables.trait_probability(genes[id.index()], traits.has_trait(id));
            gene * trait_p
        })
        .product()
}
