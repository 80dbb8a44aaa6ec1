use crate::error::Result;
use crate::eval::{Assignment, Evaluator};
use crate::parser::{compile_with, Postfix};
use crate::subformula::{collect_with, Subformula};
use crate::symbols::Syntax;
use itertools::Itertools;
use log::{debug, trace};
use std::{
    fmt::{self, Display},
    str::FromStr,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// A single cell of a truth table.
///
/// Displayed as `V` ([`True`], *verdadero*) or `F` ([`False`]).
///
/// [`True`]: TruthValue::True
/// [`False`]: TruthValue::False
pub enum TruthValue {
    True,
    False,
}

impl TruthValue {
    const fn variants<'a>() -> &'a [Self] {
        &[Self::True, Self::False]
    }

    fn matches(&self, s: &str) -> bool {
        match self {
            Self::True => matches!(s, "V" | "v" | "T" | "t" | "true" | "True" | "1"),
            Self::False => matches!(s, "F" | "f" | "false" | "False" | "0"),
        }
    }

    pub const fn is_true(self) -> bool {
        matches!(self, Self::True)
    }

    pub const fn is_false(self) -> bool {
        matches!(self, Self::False)
    }
}

impl From<bool> for TruthValue {
    fn from(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }
}

impl From<TruthValue> for bool {
    fn from(value: TruthValue) -> Self {
        value.is_true()
    }
}

impl Display for TruthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::True => "V",
            Self::False => "F",
        })
    }
}

impl FromStr for TruthValue {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::variants()
            .iter()
            .find(|variant| variant.matches(s))
            .ok_or_else(|| anyhow::anyhow!("cannot parse {s} as truth value"))
            .copied()
    }
}

/// Every subformula of one formula, evaluated under every assignment.
///
/// Columns are the variables in alphabetical order followed by the compound
/// subformulas in the order they are first encountered; the last column is
/// the formula itself (unless the formula is a lone variable). Rows count
/// down from all-true to all-false, the first variable changing slowest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    headers: Vec<String>,
    variable_count: usize,
    rows: Vec<Vec<TruthValue>>,
}

impl TruthTable {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<TruthValue>] {
        &self.rows
    }

    pub const fn variable_count(&self) -> usize {
        self.variable_count
    }

    pub fn variables(&self) -> &[String] {
        &self.headers[..self.variable_count]
    }

    /// Values of the column labelled `header`, if there is one.
    pub fn column(&self, header: &str) -> Option<Vec<TruthValue>> {
        let index = self.headers.iter().position(|h| h == header)?;
        Some(self.rows.iter().map(|row| row[index]).collect())
    }

    /// Values of the last column, i.e. of the whole formula.
    pub fn result(&self) -> Vec<TruthValue> {
        self.rows
            .iter()
            .filter_map(|row| row.last().copied())
            .collect()
    }

    pub fn is_tautology(&self) -> bool {
        self.result().iter().all(|v| v.is_true())
    }

    pub fn is_contradiction(&self) -> bool {
        self.result().iter().all(|v| v.is_false())
    }

    pub fn is_satisfiable(&self) -> bool {
        !self.is_contradiction()
    }

    /// Rows in which the whole formula is true.
    pub fn models(&self) -> impl Iterator<Item = &[TruthValue]> + '_ {
        self.rows
            .iter()
            .filter(|row| row.last().is_some_and(|v| v.is_true()))
            .map(|row| row.as_slice())
    }
}

/// Splits collected subformulas into the sorted variables and the compound
/// subformulas in first-seen order.
fn partition(subformulas: Vec<Subformula>) -> (Vec<Subformula>, Vec<Subformula>) {
    let (variables, compounds): (Vec<Subformula>, Vec<Subformula>) = subformulas
        .into_iter()
        .partition(|s| s.variable().is_some());

    (
        variables.into_iter().sorted_by_key(|s| s.variable()).collect(),
        compounds,
    )
}

/// The column headers of the truth table of `formula` and the number of
/// leading variable columns, without evaluating anything.
pub fn parse_and_collect_with(syntax: &Syntax, formula: &str) -> Result<(Vec<String>, usize)> {
    let program = compile_with(syntax, formula)?;
    let (variables, compounds) = partition(collect_with(syntax, &program)?);
    let variable_count = variables.len();

    Ok((
        variables.into_iter().chain(compounds).map(|s| s.text).collect(),
        variable_count,
    ))
}

pub fn parse_and_collect(formula: &str) -> Result<(Vec<String>, usize)> {
    parse_and_collect_with(Syntax::standard(), formula)
}

/// The `index`-th assignment: the first variable is the most significant bit
/// and a zero bit means true, so index 0 is all-true.
fn nth_assignment(variables: &[char], index: usize) -> Assignment {
    let n = variables.len();

    variables
        .iter()
        .enumerate()
        .map(|(i, &v)| (v, (index >> (n - 1 - i)) & 1 == 0))
        .collect()
}

/// Tabulates an already compiled formula. Each compound column is evaluated
/// with the slice of `program` that produced it, never by re-reading its label.
pub fn tabulate_with(syntax: &Syntax, program: &Postfix) -> Result<TruthTable> {
    let (variables, compounds) = partition(collect_with(syntax, program)?);

    let names: Vec<char> = variables.iter().filter_map(Subformula::variable).collect();
    let variable_count = names.len();

    let row_count = 1usize << variable_count;
    debug!(
        "building truth table: {} columns, {row_count} rows",
        variable_count + compounds.len()
    );

    let mut rows = Vec::with_capacity(row_count);

    for index in 0..row_count {
        let assignment = nth_assignment(&names, index);
        let evaluator = Evaluator::new(&assignment);

        let mut row: Vec<TruthValue> = names
            .iter()
            .map(|v| TruthValue::from(assignment[v]))
            .collect();

        for subformula in &compounds {
            row.push(evaluator.eval(&subformula.program)?.into());
        }

        trace!("row {index}: {}", row.iter().join(" "));
        rows.push(row);
    }

    Ok(TruthTable {
        headers: variables
            .into_iter()
            .chain(compounds)
            .map(|s| s.text)
            .collect(),
        variable_count,
        rows,
    })
}

pub fn build_truth_table_with(syntax: &Syntax, formula: &str) -> Result<TruthTable> {
    debug!("tabulating {formula:?}");
    tabulate_with(syntax, &compile_with(syntax, formula)?)
}

pub fn build_truth_table(formula: &str) -> Result<TruthTable> {
    build_truth_table_with(Syntax::standard(), formula)
}
