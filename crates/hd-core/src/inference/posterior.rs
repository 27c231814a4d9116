//! Normalized per-individual posterior distributions.

use hd_common::GeneCount;
use hd_math::max_divergence;

/// Posterior over gene counts, indexed by [`GeneCount::index`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneDistribution([f64; 3]);

impl GeneDistribution {
    pub(crate) fn from_normalized(probs: [f64; 3]) -> Self {
        Self(probs)
    }

    #[inline]
    pub fn get(&self, count: GeneCount) -> f64 {
        self.0[count.index()]
    }

    pub fn as_array(&self) -> &[f64; 3] {
        &self.0
    }

    /// Most probable gene count; ties resolve to the smaller count.
    pub fn most_likely(&self) -> GeneCount {
        GeneCount::ALL
            .into_iter()
            .fold(GeneCount::Zero, |best, c| if self.get(c) > self.get(best) { c } else { best })
    }
}

/// Posterior over trait presence. Slot 0 is absent, slot 1 is present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraitDistribution([f64; 2]);

impl TraitDistribution {
    pub(crate) fn from_normalized(probs: [f64; 2]) -> Self {
        Self(probs)
    }

    #[inline]
    pub fn get(&self, has_trait: bool) -> f64 {
        self.0[has_trait as usize]
    }

    pub fn present(&self) -> f64 {
        self.0[1]
    }

    pub fn absent(&self) -> f64 {
        self.0[0]
    }

    pub fn as_array(&self) -> &[f64; 2] {
        &self.0
    }
}

/// Final distributions for one individual.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonPosterior {
    pub name: String,
    pub genes: GeneDistribution,
    pub traits: TraitDistribution,
}

/// Posteriors for a whole pedigree, in pedigree order.
#[derive(Debug, Clone, PartialEq)]
pub struct Posteriors {
    people: Vec<PersonPosterior>,
}

impl Posteriors {
    pub(crate) fn new(people: Vec<PersonPosterior>) -> Self {
        Self { people }
    }

    pub fn get(&self, name: &str) -> Option<&PersonPosterior> {
        self.people.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PersonPosterior> {
        self.people.iter()
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Largest absolute difference across every distribution entry (L∞).
    ///
    /// Infinite when the two results do not cover the same individuals.
    pub fn max_divergence(&self, other: &Posteriors) -> f64 {
        if self.people.len() != other.people.len() {
            return f64::INFINITY;
        }
        self.people
            .iter()
            .zip(other.people.iter())
            .map(|(a, b)| {
                if a.name != b.name {
                    return f64::INFINITY;
                }
                max_divergence(a.genes.as_array(), b.genes.as_array())
                    .max(max_divergence(a.traits.as_array(), b.traits.as_array()))
            })
            .fold(0.0f64, f64::max)
    }
}

impl<'a> IntoIterator for &'a Posteriors {
    type Item = &'a PersonPosterior;
    type IntoIter = std::slice::Iter<'a, PersonPosterior>;

    fn into_iter(self) -> Self::IntoIter {
        self.people.iter()
    }
}
