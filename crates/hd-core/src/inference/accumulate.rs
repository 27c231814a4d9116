//! Accumulation and normalization of joint probabilities.
//!
//! Each hypothesis adds its joint probability to one gene slot and one trait
//! slot of every individual. Accumulators built over disjoint parts of the
//! hypothesis space merge by element-wise summation; normalization happens
//! once, after the last merge.
//!
//! Before normalization every individual's gene mass and trait mass both
//! equal the total mass of all admitted hypotheses.

use hd_common::{Error, GeneCount, PersonId, Result};
use hd_math::{approx_eq, normalize_probs, CompensatedSum};

use super::enumerate::TraitMask;
use super::posterior::{GeneDistribution, PersonPosterior, Posteriors, TraitDistribution};
use crate::pedigree::Pedigree;

#[derive(Debug, Clone, Copy, Default)]
struct PersonMass {
    genes: [CompensatedSum; 3],
    traits: [CompensatedSum; 2],
}

/// Running, unnormalized per-individual totals.
#[derive(Debug, Clone)]
pub struct Accumulator {
    people: Vec<PersonMass>,
    total: CompensatedSum,
    hypotheses: u64,
}

impl Accumulator {
    pub fn new(individuals: usize) -> Self {
        Self {
            people: vec![PersonMass::default(); individuals],
            total: CompensatedSum::new(),
            hypotheses: 0,
        }
    }

    /// Fold one hypothesis with joint probability `p` into the totals.
    pub fn add(&mut self, genes: &[GeneCount], traits: TraitMask, p: f64) {
        debug_assert_eq!(genes.len(), self.people.len());
        for (i, (mass, count)) in self.people.iter_mut().zip(genes).enumerate() {
            mass.genes[count.index()].add(p);
            mass.traits[traits.has_trait(PersonId::from(i)) as usize].add(p);
        }
        self.total.add(p);
        self.hypotheses += 1;
    }

    /// Element-wise sum of another accumulator over the same pedigree.
    pub fn merge(&mut self, other: &Accumulator) {
        debug_assert_eq!(self.people.len(), other.people.len());
        for (mine, theirs) in self.people.iter_mut().zip(&other.people) {
            for (a, b) in mine.genes.iter_mut().zip(&theirs.genes) {
                a.merge(b);
            }
            for (a, b) in mine.traits.iter_mut().zip(&theirs.traits) {
                a.merge(b);
            }
        }
        self.total.merge(&other.total);
        self.hypotheses += other.hypotheses;
    }

    /// Unnormalized gene mass, indexed by [`GeneCount::index`].
    pub fn gene_mass(&self, id: PersonId) -> [f64; 3] {
        self.people[id.index()].genes.map(|s| s.value())
    }

    /// Unnormalized trait mass; slot 0 absent, slot 1 present.
    pub fn trait_mass(&self, id: PersonId) -> [f64; 2] {
        self.people[id.index()].traits.map(|s| s.value())
    }

    /// Total mass of every hypothesis folded in so far.
    pub fn evidence_mass(&self) -> f64 {
        self.total.value()
    }

    pub fn hypotheses(&self) -> u64 {
        self.hypotheses
    }

    /// Check that each individual's gene and trait masses agree with each
    /// other and with the overall total, within `tolerance` (relative).
    pub fn check_consistency(&self, tolerance: f64) -> Result<()> {
        let total = self.evidence_mass();
        for (i, _) in self.people.iter().enumerate() {
            let id = PersonId::from(i);
            let gene_total: f64 = self.gene_mass(id).iter().sum();
            let trait_total: f64 = self.trait_mass(id).iter().sum();
            if !approx_eq(gene_total, trait_total, tolerance, 0.0)
                || !approx_eq(gene_total, total, tolerance, 0.0)
            {
                return Err(Error::NumericalInstability(format!(
                    "mass mismatch for person {id}: gene {gene_total:e}, trait {trait_total:e}, total {total:e}"
                )));
            }
        }
        Ok(())
    }

    /// Rescale every distribution to sum to one.
    ///
    /// Fails with [`Error::EmptyHypothesisSpace`] when there is no mass to
    /// normalize.
    pub fn normalize(&self, pedigree: &Pedigree) -> Result<Posteriors> {
        debug_assert_eq!(pedigree.len(), self.people.len());
        let mut people = Vec::with_capacity(self.people.len());
        for (id, person) in pedigree.iter() {
            let genes = normalize_probs(&self.gene_mass(id)).ok_or(Error::EmptyHypothesisSpace)?;
            let traits =
                normalize_probs(&self.trait_mass(id)).ok_or(Error::EmptyHypothesisSpace)?;
            people.push(PersonPosterior {
                name: person.name().to_string(),
                genes: GeneDistribution::from_normalized(genes),
                traits: TraitDistribution::from_normalized(traits),
            });
        }
        Ok(Posteriors::new(people))
    }
}
