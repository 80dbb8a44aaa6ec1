use crate::error::{FormulaError, Result};
use crate::interpret::{interpret, Interpretation};
use crate::parser::{compile_with, Postfix};
use crate::symbols::{Connective, Syntax};
use rustc_hash::FxHashMap;

/// A truth value for each variable of a formula.
pub type Assignment = FxHashMap<char, bool>;

/// Evaluates postfix programs under a fixed assignment.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    assignment: &'a Assignment,
}

impl<'a> Evaluator<'a> {
    pub const fn new(assignment: &'a Assignment) -> Self {
        Self { assignment }
    }

    pub fn eval(mut self, program: &Postfix) -> Result<bool> {
        interpret(program, &mut self)
    }
}

impl Interpretation for Evaluator<'_> {
    type Value = bool;

    fn variable(&mut self, name: char) -> Result<bool> {
        self.assignment
            .get(&name)
            .copied()
            .ok_or(FormulaError::UnboundVariable(name))
    }

    fn unary(&mut self, connective: Connective, operand: bool) -> bool {
        match connective {
            Connective::Not => !operand,
            other => unreachable!("{other:?} is not unary"),
        }
    }

    fn binary(&mut self, connective: Connective, lhs: bool, rhs: bool) -> bool {
        match connective {
            Connective::And => lhs && rhs,
            Connective::Or => lhs || rhs,
            Connective::Implies => !lhs || rhs,
            Connective::Iff => lhs == rhs,
            Connective::Not => unreachable!("negation is not binary"),
        }
    }
}

pub fn evaluate_with(syntax: &Syntax, formula: &str, assignment: &Assignment) -> Result<bool> {
    Evaluator::new(assignment).eval(&compile_with(syntax, formula)?)
}

pub fn evaluate(formula: &str, assignment: &Assignment) -> Result<bool> {
    evaluate_with(Syntax::standard(), formula, assignment)
}

/// Builds an assignment from `(variable, value)` pairs.
pub fn assignment<I: IntoIterator<Item = (char, bool)>>(values: I) -> Assignment {
    values.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_connectives() {
        let cases: [(&str, [bool; 4]); 4] = [
            ("p ∧ q", [true, false, false, false]),
            ("p ∨ q", [true, true, true, false]),
            ("p → q", [true, false, true, true]),
            ("p ↔ q", [true, false, false, true]),
        ];

        for (formula, expected) in cases {
            let results: Vec<bool> = [(true, true), (true, false), (false, true), (false, false)]
                .iter()
                .map(|&(p, q)| evaluate(formula, &assignment([('p', p), ('q', q)])))
                .collect::<Result<_>>()
                .expect("formula evaluates");

            assert_eq!(results, expected.to_vec(), "{formula}");
        }
    }

    #[test]
    fn test_negation() {
        assert_eq!(evaluate("¬p", &assignment([('p', true)])), Ok(false));
        assert_eq!(evaluate("¬¬p", &assignment([('p', true)])), Ok(true));
    }

    #[test]
    fn test_operands_keep_their_order() {
        // implication is not symmetric: a swapped pop order would give true
        assert_eq!(
            evaluate("p → q", &assignment([('p', true), ('q', false)])),
            Ok(false)
        );
    }

    #[test]
    fn test_missing_variable() {
        assert_eq!(
            evaluate("p ∧ q", &assignment([('p', true)])),
            Err(FormulaError::UnboundVariable('q'))
        );
    }
}
