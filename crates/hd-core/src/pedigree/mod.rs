//! Pedigree model.
//!
//! Individuals live in an arena (`Vec<Person>`) and refer to their parents by
//! [`PersonId`]. Parent names are resolved exactly once, when the pedigree is
//! built, and the structure is validated up front:
//!
//! - parentage is all-or-nothing (both parents or neither)
//! - every parent must be a known individual, distinct from the child
//! - parent links must be acyclic
//!
//! After construction a `Pedigree` is immutable.

pub mod loader;

use std::collections::{HashMap, VecDeque};

use hd_common::{Error, GeneCount, PersonId, Result};
use tracing::debug;

pub use loader::{load_pedigree, read_pedigree, read_records};

/// Loader-facing description of one individual, parents still by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRecord {
    pub name: String,
    pub mother: Option<String>,
    pub father: Option<String>,
    pub observed_trait: Option<bool>,
    pub observed_genes: Option<GeneCount>,
}

impl PersonRecord {
    /// An individual with no recorded parents.
    pub fn founder(name: &str) -> Self {
        Self {
            name: name.to_string(),
            mother: None,
            father: None,
            observed_trait: None,
            observed_genes: None,
        }
    }

    /// An individual with both parents recorded.
    pub fn child(name: &str, mother: &str, father: &str) -> Self {
        Self {
            mother: Some(mother.to_string()),
            father: Some(father.to_string()),
            ..Self::founder(name)
        }
    }

    pub fn with_trait(mut self, has_trait: bool) -> Self {
        self.observed_trait = Some(has_trait);
        self
    }

    pub fn with_genes(mut self, genes: GeneCount) -> Self {
        self.observed_genes = Some(genes);
        self
    }
}

/// Resolved parent pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parents {
    pub mother: PersonId,
    pub father: PersonId,
}

/// One individual in the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    name: String,
    parents: Option<Parents>,
    observed_trait: Option<bool>,
    observed_genes: Option<GeneCount>,
}

impl Person {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parents(&self) -> Option<Parents> {
        self.parents
    }

    pub fn is_founder(&self) -> bool {
        self.parents.is_none()
    }

    /// Observed trait value, `None` when unobserved.
    pub fn observed_trait(&self) -> Option<bool> {
        self.observed_trait
    }

    /// Observed gene count, `None` when unobserved.
    pub fn observed_genes(&self) -> Option<GeneCount> {
        self.observed_genes
    }
}

/// A validated, acyclic pedigree.
#[derive(Debug, Clone)]
pub struct Pedigree {
    people: Vec<Person>,
    index: HashMap<String, PersonId>,
}

/// Trimmed name, or `None` when blank.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl Pedigree {
    /// Build and validate a pedigree. Record order defines [`PersonId`]s.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = PersonRecord>,
    {
        let records: Vec<PersonRecord> = records
            .into_iter()
            .map(|mut r| {
                r.name = r.name.trim().to_string();
                r
            })
            .collect();
        if records.is_empty() {
            return Err(Error::EmptyPedigree);
        }

        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if record.name.is_empty() {
                return Err(Error::Pedigree(format!(
                    "record {} has an empty name",
                    i + 1
                )));
            }
            if index.insert(record.name.clone(), PersonId::from(i)).is_some() {
                return Err(Error::DuplicateIndividual {
                    name: record.name.clone(),
                });
            }
        }

        let resolve = |child: &str, parent: &str| -> Result<PersonId> {
            if parent == child {
                return Err(Error::SelfParent {
                    name: child.to_string(),
                });
            }
            index.get(parent).copied().ok_or_else(|| Error::UnknownParent {
                name: child.to_string(),
                parent: parent.to_string(),
            })
        };

        let mut people = Vec::with_capacity(records.len());
        for record in records {
            let parents = match (non_empty(record.mother), non_empty(record.father)) {
                (None, None) => None,
                (Some(mother), Some(father)) => {
                    let mother = resolve(&record.name, &mother)?;
                    let father = resolve(&record.name, &father)?;
                    if mother == father {
                        return Err(Error::SameParents { name: record.name });
                    }
                    Some(Parents { mother, father })
                }
                _ => return Err(Error::IncompleteParentage { name: record.name }),
            };
            people.push(Person {
                name: record.name,
                parents,
                observed_trait: record.observed_trait,
                observed_genes: record.observed_genes,
            });
        }

        let pedigree = Self { people, index };
        pedigree.check_acyclic()?;
        debug!(
            individuals = pedigree.len(),
            founders = pedigree.founders().count(),
            "pedigree validated"
        );
        Ok(pedigree)
    }

    /// Kahn's algorithm over parent → child edges; anything left unvisited
    /// sits on or below a cycle.
    fn check_acyclic(&self) -> Result<()> {
        let n = self.people.len();
        let mut pending_parents = vec![0u8; n];
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (child, person) in self.people.iter().enumerate() {
            if let Some(p) = person.parents {
                pending_parents[child] = 2;
                children[p.mother.index()].push(child);
                children[p.father.index()].push(child);
            }
        }

        let mut queue: VecDeque<usize> = (0..n).filter(|&i| pending_parents[i] == 0).collect();
        let mut visited = 0usize;
        while let Some(i) = queue.pop_front() {
            visited += 1;
            for &child in &children[i] {
                pending_parents[child] -= 1;
                if pending_parents[child] == 0 {
                    queue.push_back(child);
                }
            }
        }

        if visited == n {
            return Ok(());
        }
        let stuck = pending_parents
            .iter()
            .position(|&p| p > 0)
            .unwrap_or_default();
        Err(Error::ParentageCycle {
            name: self.people[stuck].name.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn get(&self, id: PersonId) -> &Person {
        &self.people[id.index()]
    }

    pub fn id_of(&self, name: &str) -> Option<PersonId> {
        self.index.get(name).copied()
    }

    /// `(id, person)` pairs in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (PersonId, &Person)> {
        self.people
            .iter()
            .enumerate()
            .map(|(i, p)| (PersonId::from(i), p))
    }

    pub fn founders(&self) -> impl Iterator<Item = (PersonId, &Person)> {
        self.iter().filter(|(_, p)| p.is_founder())
    }

    /// Number of individuals with an observed trait.
    pub fn trait_evidence_count(&self) -> usize {
        self.people
            .iter()
            .filter(|p| p.observed_trait.is_some())
            .count()
    }

    /// Number of individuals with an observed gene count.
    pub fn gene_evidence_count(&self) -> usize {
        self.people
            .iter()
            .filter(|p| p.observed_genes.is_some())
            .count()
    }
}
