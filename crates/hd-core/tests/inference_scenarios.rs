//! End-to-end inference scenarios against known posteriors.
//!
//! Validates:
//! - Reference family output to four decimals
//! - Founder prior recovery with no evidence
//! - Observed traits come back as certainties
//! - Mutation-only inheritance at the 2 × 0 boundary
//! - Evidence-free founders stay at the prior in a larger pedigree
//! - Unsatisfiable evidence is an error, not NaN
//! - Repeat runs are identical

use hd_common::{Error, GeneCount};
use hd_config::ProbabilityTables;
use hd_core::inference::{infer, InferenceConfig, Posteriors};
use hd_core::pedigree::{read_pedigree, Pedigree, PersonRecord};

const FAMILY0: &str = "\
name,mother,father,trait
Harry,Lily,James,
James,,,1
Lily,,,0
";

fn sequential() -> InferenceConfig {
    InferenceConfig {
        parallel: false,
        ..Default::default()
    }
}

fn run(pedigree: &Pedigree) -> Posteriors {
    infer(pedigree, &ProbabilityTables::default(), &sequential())
        .expect("inference failed")
        .posteriors
}

fn assert_close(actual: f64, expected: f64, tol: f64, what: &str) {
    assert!(
        (actual - expected).abs() < tol,
        "{what}: expected {expected}, got {actual}"
    );
}

fn assert_gene(posteriors: &Posteriors, name: &str, expected: [f64; 3], tol: f64) {
    let person = posteriors.get(name).expect("missing individual");
    for count in GeneCount::ALL {
        assert_close(
            person.genes.get(count),
            expected[count.index()],
            tol,
            &format!("{name} gene {count}"),
        );
    }
}

// ============================================================================
// Reference family
// ============================================================================

#[test]
fn reference_family_from_csv() {
    let pedigree = read_pedigree(FAMILY0.as_bytes()).unwrap();
    let posteriors = run(&pedigree);

    assert_gene(&posteriors, "Harry", [0.5351, 0.4557, 0.0092], 5e-5);
    assert_gene(&posteriors, "James", [0.2918, 0.5106, 0.1976], 5e-5);
    assert_gene(&posteriors, "Lily", [0.9827, 0.0136, 0.0036], 5e-5);

    let harry = posteriors.get("Harry").unwrap();
    assert_close(harry.traits.present(), 0.2665, 5e-5, "Harry trait");
    assert_close(harry.traits.absent(), 0.7335, 5e-5, "Harry no trait");
}

#[test]
fn output_order_follows_input_order() {
    let pedigree = read_pedigree(FAMILY0.as_bytes()).unwrap();
    let posteriors = run(&pedigree);
    let names: Vec<&str> = posteriors.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Harry", "James", "Lily"]);
}

// ============================================================================
// Evidence handling
// ============================================================================

#[test]
fn founder_without_evidence_recovers_prior() {
    let pedigree = Pedigree::from_records(vec![PersonRecord::founder("Solo")]).unwrap();
    let posteriors = run(&pedigree);
    assert_gene(&posteriors, "Solo", [0.96, 0.03, 0.01], 1e-12);
    let solo = posteriors.get("Solo").unwrap();
    assert_close(solo.traits.present(), 0.0329, 1e-12, "marginal trait");
}

#[test]
fn observed_traits_are_certain() {
    let pedigree = read_pedigree(FAMILY0.as_bytes()).unwrap();
    let posteriors = run(&pedigree);
    let james = posteriors.get("James").unwrap();
    let lily = posteriors.get("Lily").unwrap();
    assert_eq!(james.traits.present(), 1.0);
    assert_eq!(james.traits.absent(), 0.0);
    assert_eq!(lily.traits.present(), 0.0);
    assert_eq!(lily.traits.absent(), 1.0);
}

#[test]
fn mutation_boundary_two_by_zero() {
    let pedigree = Pedigree::from_records(vec![
        PersonRecord::founder("Mother").with_genes(GeneCount::Two),
        PersonRecord::founder("Father").with_genes(GeneCount::Zero),
        PersonRecord::child("Child", "Mother", "Father"),
    ])
    .unwrap();
    let posteriors = run(&pedigree);
    assert_gene(&posteriors, "Child", [0.0099, 0.9802, 0.0099], 1e-12);
    assert_gene(&posteriors, "Mother", [0.0, 0.0, 1.0], 1e-12);
}

#[test]
fn unrelated_founder_keeps_prior() {
    let pedigree = Pedigree::from_records(vec![
        PersonRecord::founder("Lily"),
        PersonRecord::founder("Mum"),
        PersonRecord::founder("Dad"),
        PersonRecord::child("James", "Mum", "Dad"),
        PersonRecord::child("Harry", "Mum", "Dad"),
    ])
    .unwrap();
    let posteriors = run(&pedigree);

    assert_gene(&posteriors, "Lily", [0.96, 0.03, 0.01], 1e-12);
    for person in &posteriors {
        let genes: f64 = person.genes.as_array().iter().sum();
        let traits: f64 = person.traits.as_array().iter().sum();
        assert_close(genes, 1.0, 1e-9, &person.name);
        assert_close(traits, 1.0, 1e-9, &person.name);
    }
}

#[test]
fn trait_evidence_shifts_sibling() {
    let base = Pedigree::from_records(vec![
        PersonRecord::founder("Mum"),
        PersonRecord::founder("Dad"),
        PersonRecord::child("A", "Mum", "Dad"),
        PersonRecord::child("B", "Mum", "Dad"),
    ])
    .unwrap();
    let affected = Pedigree::from_records(vec![
        PersonRecord::founder("Mum"),
        PersonRecord::founder("Dad"),
        PersonRecord::child("A", "Mum", "Dad").with_trait(true),
        PersonRecord::child("B", "Mum", "Dad"),
    ])
    .unwrap();
    let before = run(&base).get("B").unwrap().traits.present();
    let after = run(&affected).get("B").unwrap().traits.present();
    assert!(after > before, "{after} should exceed {before}");
}

// ============================================================================
// Degenerate inputs
// ============================================================================

#[test]
fn impossible_trait_evidence_is_error() {
    let mut tables = ProbabilityTables::default();
    for count in GeneCount::ALL {
        let row = match count {
            GeneCount::Zero => &mut tables.trait_given_genes.zero,
            GeneCount::One => &mut tables.trait_given_genes.one,
            GeneCount::Two => &mut tables.trait_given_genes.two,
        };
        row.present = 0.0;
        row.absent = 1.0;
    }
    let pedigree = read_pedigree(FAMILY0.as_bytes()).unwrap();
    let err = infer(&pedigree, &tables, &sequential()).unwrap_err();
    assert!(matches!(err, Error::EmptyHypothesisSpace), "got {err:?}");
}

#[test]
fn oversized_pedigree_is_rejected_before_enumeration() {
    let records: Vec<PersonRecord> = (0..20)
        .map(|i| PersonRecord::founder(&format!("p{i}")))
        .collect();
    let pedigree = Pedigree::from_records(records).unwrap();
    let err = infer(&pedigree, &ProbabilityTables::default(), &sequential()).unwrap_err();
    assert!(matches!(err, Error::PedigreeTooLarge { count: 20, max: 18 }));
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn repeated_runs_are_identical() {
    let pedigree = read_pedigree(FAMILY0.as_bytes()).unwrap();
    assert_eq!(run(&pedigree), run(&pedigree));
}

#[test]
fn parallel_agrees_with_sequential() {
    let pedigree = Pedigree::from_records(vec![
        PersonRecord::founder("Mum").with_trait(false),
        PersonRecord::founder("Dad"),
        PersonRecord::child("A", "Mum", "Dad").with_trait(true),
        PersonRecord::child("B", "Mum", "Dad"),
        PersonRecord::founder("Partner"),
        PersonRecord::child("C", "A", "Partner"),
    ])
    .unwrap();
    let tables = ProbabilityTables::default();
    let seq = infer(&pedigree, &tables, &sequential()).unwrap();
    let par = infer(
        &pedigree,
        &tables,
        &InferenceConfig {
            parallel: true,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(seq.posteriors.max_divergence(&par.posteriors) < 1e-12);
    assert_close(
        seq.stats.evidence_mass,
        par.stats.evidence_mass,
        1e-15,
        "evidence mass",
    );
}
