use pretty_assertions::assert_eq;

use proptab::error::Result;
use proptab::subformula::{canonicalize, collect_subformulas};

#[test]
fn test_negation_canonical_form() -> Result<()> {
    assert_eq!(
        collect_subformulas("¬(p ∧ q)")?,
        vec!["p", "q", "p ∧ q", "¬(p ∧ q)"]
    );

    Ok(())
}

#[test]
fn test_first_seen_order() -> Result<()> {
    assert_eq!(
        collect_subformulas("((p → q) ∧ (p → r)) → (q ∧ r)")?,
        vec![
            "p",
            "q",
            "p → q",
            "r",
            "p → r",
            "(p → q) ∧ (p → r)",
            "q ∧ r",
            "((p → q) ∧ (p → r)) → (q ∧ r)",
        ]
    );

    Ok(())
}

#[test]
fn test_duplicates_share_one_entry() -> Result<()> {
    assert_eq!(
        collect_subformulas("(p ∧ q) ∨ (p & q)")?,
        vec!["p", "q", "p ∧ q", "(p ∧ q) ∨ (p ∧ q)"]
    );
    assert_eq!(collect_subformulas("p ∧ p")?, vec!["p", "p ∧ p"]);
    assert_eq!(collect_subformulas("p")?, vec!["p"]);

    Ok(())
}

#[test]
fn test_canonical_rendering() -> Result<()> {
    let cases = [
        ("p->q", "p → q"),
        ("p⇔q", "p ↔ q"),
        ("p<->q", "p ↔ q"),
        ("p&q|r", "(p ∧ q) ∨ r"),
        ("p | q & r", "p ∨ (q ∧ r)"),
        ("~~p", "¬¬p"),
        ("!(p|q)<->r", "¬(p ∨ q) ↔ r"),
        ("¬p ∧ q", "¬p ∧ q"),
        ("p → q → r", "p → (q → r)"),
        ("(p → q) → r", "(p → q) → r"),
        ("p ∧ q ∧ r", "(p ∧ q) ∧ r"),
        ("((p))", "p"),
    ];

    for (formula, expected) in cases {
        assert_eq!(canonicalize(formula)?, expected, "{formula}");
    }

    Ok(())
}

#[test]
fn test_canonicalize_is_idempotent() -> Result<()> {
    let formulas = [
        "p",
        "¬¬p",
        "p&q|r",
        "p -> q -> r",
        "!(p & (q | ~r)) <-> (s → t)",
        "((p → q) ∧ (p → r)) → (q ∧ r)",
    ];

    for formula in formulas {
        let once = canonicalize(formula)?;
        assert_eq!(canonicalize(&once)?, once, "{formula}");
    }

    Ok(())
}

#[test]
fn test_every_subformula_is_canonical() -> Result<()> {
    for subformula in collect_subformulas("!(p & (q | ~r)) <-> (s -> p)")? {
        assert_eq!(canonicalize(&subformula)?, subformula);
    }

    Ok(())
}

#[test]
fn test_syntax_errors_propagate() {
    assert!(collect_subformulas("p ∧ (q")
        .expect_err("unclosed parenthesis")
        .is_syntax_error());
    assert!(canonicalize("p ∧ q)")
        .expect_err("stray parenthesis")
        .is_syntax_error());
}
