//! Hypothesis enumeration.
//!
//! A hypothesis pairs one trait assignment with one gene assignment. Trait
//! assignments are bitmasks over person indices and are tested against the
//! observed traits before any gene assignment is generated for them. Gene
//! assignments are produced by a base-3 odometer advanced in place, one
//! digit per individual, so no per-hypothesis allocation happens.
//!
//! Order: trait masks ascending (`0..2^n`), and for each admitted mask every
//! gene assignment in odometer order with person 0 as the fastest digit.
//! The order is deterministic and each hypothesis is visited exactly once.

use hd_common::{Error, GeneCount, PersonId, Result};
use tracing::debug;

use crate::pedigree::Pedigree;

/// Largest pedigree a 64-bit trait mask can enumerate.
pub const MAX_ENUMERABLE: usize = 63;

/// Trait assignment: bit `i` set means person `i` has the trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct TraitMask(pub u64);

impl TraitMask {
    #[inline]
    pub fn has_trait(self, id: PersonId) -> bool {
        self.0 & id.bit() != 0
    }

    /// Whether this assignment agrees with every observed trait.
    pub fn is_consistent(self, pedigree: &Pedigree) -> bool {
        TraitEvidence::from_pedigree(pedigree).admits(self)
    }
}

/// Observed traits packed as two bitmasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraitEvidence {
    /// Individuals whose trait is observed.
    observed: u64,
    /// Of those, the ones observed with the trait.
    present: u64,
}

impl TraitEvidence {
    pub fn from_pedigree(pedigree: &Pedigree) -> Self {
        let mut evidence = Self::default();
        for (id, person) in pedigree.iter().take(MAX_ENUMERABLE) {
            if let Some(has_trait) = person.observed_trait() {
                evidence.observed |= id.bit();
                if has_trait {
                    evidence.present |= id.bit();
                }
            }
        }
        evidence
    }

    #[inline]
    pub fn admits(&self, mask: TraitMask) -> bool {
        (mask.0 ^ self.present) & self.observed == 0
    }

    pub fn observed_count(&self) -> u32 {
        self.observed.count_ones()
    }
}

/// One complete gene assignment, advanced in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneAssignment {
    counts: Vec<GeneCount>,
    /// Indices whose gene count is not pinned by evidence.
    free: Vec<usize>,
}

impl GeneAssignment {
    /// The first assignment: observed gene counts pinned, everyone else 0.
    pub fn first(pedigree: &Pedigree) -> Self {
        let mut counts = Vec::with_capacity(pedigree.len());
        let mut free = Vec::new();
        for (i, person) in pedigree.people().iter().enumerate() {
            match person.observed_genes() {
                Some(observed) => counts.push(observed),
                None => {
                    counts.push(GeneCount::Zero);
                    free.push(i);
                }
            }
        }
        Self { counts, free }
    }

    #[inline]
    pub fn counts(&self) -> &[GeneCount] {
        &self.counts
    }

    #[inline]
    pub fn get(&self, id: PersonId) -> GeneCount {
        self.counts[id.index()]
    }

    /// Number of individuals whose count varies.
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Step to the next assignment. Returns `false` once every assignment
    /// has been produced; the state is then back at [`GeneAssignment::first`].
    pub fn advance(&mut self) -> bool {
        for &i in &self.free {
            let (next, carry) = self.counts[i].increment();
            self.counts[i] = next;
            if !carry {
                return true;
            }
        }
        false
    }
}

/// The full hypothesis space of a pedigree.
#[derive(Debug, Clone)]
pub struct HypothesisSpace<'a> {
    pedigree: &'a Pedigree,
    evidence: TraitEvidence,
}

impl<'a> HypothesisSpace<'a> {
    pub fn new(pedigree: &'a Pedigree) -> Result<Self> {
        if pedigree.len() > MAX_ENUMERABLE {
            return Err(Error::PedigreeTooLarge {
                count: pedigree.len(),
                max: MAX_ENUMERABLE,
            });
        }
        Ok(Self {
            pedigree,
            evidence: TraitEvidence::from_pedigree(pedigree),
        })
    }

    pub fn pedigree(&self) -> &'a Pedigree {
        self.pedigree
    }

    /// Number of candidate trait masks before the evidence filter.
    pub fn trait_mask_count(&self) -> u64 {
        1u64 << self.pedigree.len()
    }

    /// Number of trait masks that survive the evidence filter.
    pub fn valid_trait_mask_count(&self) -> u64 {
        1u64 << (self.pedigree.len() as u32 - self.evidence.observed_count())
    }

    /// Trait masks that survive the evidence filter, ascending.
    pub fn valid_trait_masks(&self) -> Vec<TraitMask> {
        let masks: Vec<TraitMask> = (0..self.trait_mask_count())
            .map(TraitMask)
            .filter(|m| self.evidence.admits(*m))
            .collect();
        debug!(
            candidates = self.trait_mask_count(),
            admitted = masks.len(),
            "trait masks filtered against evidence"
        );
        masks
    }

    /// Number of gene assignments per admitted trait mask.
    pub fn gene_assignment_count(&self) -> u128 {
        let free = self.pedigree.len() - self.pedigree.gene_evidence_count();
        3u128.pow(free as u32)
    }

    /// Total number of hypotheses that will be visited, or `None` when the
    /// count does not fit in a `u128`.
    pub fn hypothesis_count(&self) -> Option<u128> {
        (self.valid_trait_mask_count() as u128).checked_mul(self.gene_assignment_count())
    }

    /// Visit every gene assignment paired with one trait mask.
    ///
    /// The mask is not checked against evidence here.
    pub fn visit_trait_mask<F>(&self, mask: TraitMask, mut visit: F)
    where
        F: FnMut(&GeneAssignment, TraitMask),
    {
        let mut genes = GeneAssignment::first(self.pedigree);
        loop {
            visit(&genes, mask);
            if !genes.advance() {
                break;
            }
        }
    }

    /// Visit every admissible hypothesis.
    pub fn visit<F>(&self, mut visit: F)
    where
        F: FnMut(&GeneAssignment, TraitMask),
    {
        let mut rejected = 0u64;
        for mask in (0..self.trait_mask_count()).map(TraitMask) {
            if !self.evidence.admits(mask) {
                rejected += 1;
                continue;
            }
            self.visit_trait_mask(mask, &mut visit);
        }
        debug!(rejected, "trait masks rejected by evidence");
    }
}
