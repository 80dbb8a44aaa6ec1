use crate::error::{FormulaError, Result};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use rustc_hash::FxHashMap;
use std::fmt::{self, Display};

lazy_static! {
    static ref STANDARD: Syntax =
        Syntax::new(standard_operators()).expect("the standard operator table is consistent");
}

/// The logical connectives understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Connective {
    Not,
    And,
    Or,
    Implies,
    Iff,
}

impl Connective {
    pub const ALL: [Self; 5] = [Self::Not, Self::And, Self::Or, Self::Implies, Self::Iff];

    pub const fn arity(self) -> Arity {
        match self {
            Self::Not => Arity::Unary,
            _ => Arity::Binary,
        }
    }

    /// The symbol of this connective in the standard table.
    pub const fn default_symbol(self) -> char {
        match self {
            Self::Not => '¬',
            Self::And => '∧',
            Self::Or => '∨',
            Self::Implies => '→',
            Self::Iff => '↔',
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Unary,
    Binary,
}

impl Arity {
    pub const fn operands(self) -> usize {
        match self {
            Self::Unary => 1,
            Self::Binary => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// A single row of the operator table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    pub connective: Connective,
    /// Canonical one-character rendering, used in subformula headers.
    pub symbol: char,
    pub precedence: u8,
    pub arity: Arity,
    pub associativity: Associativity,
    /// Alternate spellings. The canonical symbol is always accepted as well.
    pub aliases: Vec<String>,
}

impl Operator {
    pub fn new(
        connective: Connective,
        symbol: char,
        precedence: u8,
        associativity: Associativity,
        aliases: &[&str],
    ) -> Self {
        Self {
            connective,
            symbol,
            precedence,
            arity: connective.arity(),
            associativity,
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// True when `self`, sitting on the operator stack, has to be emitted
    /// before `incoming` can be pushed.
    pub const fn yields_to(&self, incoming: &Self) -> bool {
        match incoming.associativity {
            Associativity::Left => incoming.precedence <= self.precedence,
            Associativity::Right => incoming.precedence < self.precedence,
        }
    }

    fn spellings(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(self.symbol.to_string()).chain(self.aliases.iter().cloned())
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Negation, conjunction, disjunction, implication and biconditional,
/// from the tightest to the loosest binding.
pub fn standard_operators() -> Vec<Operator> {
    use Associativity::{Left, Right};
    use Connective::{And, Iff, Implies, Not, Or};

    vec![
        Operator::new(Not, '¬', 5, Right, &["!", "~"]),
        Operator::new(And, '∧', 4, Left, &["&"]),
        Operator::new(Or, '∨', 3, Left, &["|"]),
        Operator::new(Implies, '→', 2, Right, &["->"]),
        Operator::new(Iff, '↔', 1, Left, &["⇔", "<->"]),
    ]
}

/// An immutable operator table together with the tokenizer pattern derived from it.
///
/// A `Syntax` is passed explicitly through every stage of the pipeline, so
/// differently configured tables can be used side by side.
#[derive(Debug, Clone)]
pub struct Syntax {
    /// Indexed by [`Connective`].
    operators: Vec<Operator>,
    spellings: FxHashMap<String, Connective>,
    pattern: Regex,
}

impl Syntax {
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    pub fn new(operators: Vec<Operator>) -> Result<Self> {
        let mut ordered: Vec<Option<Operator>> = vec![None; Connective::ALL.len()];
        let mut spellings = FxHashMap::default();

        for op in operators {
            if op.arity != op.connective.arity() {
                return Err(FormulaError::InvalidOperatorTable(format!(
                    "{:?} declared with {} operand(s)",
                    op.connective,
                    op.arity.operands()
                )));
            }

            for spelling in op.spellings() {
                if spelling.is_empty()
                    || spelling
                        .chars()
                        .any(|c| c.is_whitespace() || c == '(' || c == ')')
                {
                    return Err(FormulaError::InvalidOperatorTable(format!(
                        "alias {spelling:?} cannot be tokenized"
                    )));
                }

                match spellings.insert(spelling.clone(), op.connective) {
                    Some(previous) if previous != op.connective => {
                        return Err(FormulaError::InvalidOperatorTable(format!(
                            "alias {spelling:?} refers to both {previous:?} and {:?}",
                            op.connective
                        )))
                    }
                    _ => {}
                }
            }

            let slot = &mut ordered[op.connective.index()];
            if slot.is_some() {
                return Err(FormulaError::InvalidOperatorTable(format!(
                    "{:?} is defined more than once",
                    op.connective
                )));
            }
            *slot = Some(op);
        }

        let operators = ordered
            .into_iter()
            .zip(Connective::ALL)
            .map(|(op, connective)| {
                op.ok_or_else(|| {
                    FormulaError::InvalidOperatorTable(format!("{connective:?} is not defined"))
                })
            })
            .collect::<Result<Vec<Operator>>>()?;

        let pattern = Self::compile_pattern(&spellings)?;

        Ok(Self {
            operators,
            spellings,
            pattern,
        })
    }

    /// Word-like spellings (`v`, `and`) are matched as whole words and resolved
    /// afterwards; symbolic ones go into the pattern longest first, so that
    /// `<->` is never split into `<` and `->`.
    fn compile_pattern(spellings: &FxHashMap<String, Connective>) -> Result<Regex> {
        let symbolic = spellings
            .keys()
            .filter(|s| !s.chars().all(|c| c.is_alphanumeric() || c == '_'))
            .sorted_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)))
            .map(|s| regex::escape(s))
            .join("|");

        let operator_group = if symbolic.is_empty() {
            String::new()
        } else {
            format!("|(?P<operator>{symbolic})")
        };

        Regex::new(&format!(
            r"(?P<space>\s+)|(?P<word>\w+){operator_group}|(?P<open>\()|(?P<close>\))|(?P<other>.)"
        ))
        .map_err(|e| FormulaError::InvalidOperatorTable(e.to_string()))
    }

    pub fn operator(&self, connective: Connective) -> &Operator {
        &self.operators[connective.index()]
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// Resolves a canonical symbol or alias to its connective.
    pub fn lookup(&self, spelling: &str) -> Option<Connective> {
        self.spellings.get(spelling).copied()
    }

    /// Resolves a canonical symbol or alias to the canonical symbol.
    pub fn canonical(&self, spelling: &str) -> Option<char> {
        self.lookup(spelling).map(|c| self.operator(c).symbol)
    }

    pub fn symbol(&self, connective: Connective) -> char {
        self.operator(connective).symbol
    }

    pub(crate) const fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

impl Default for Syntax {
    fn default() -> Self {
        Self::standard().clone()
    }
}
