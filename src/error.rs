use std::fmt;

/// Reasons a formula cannot be turned into a postfix program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// The formula, or a parenthesized group within it, contains nothing.
    Empty,
    /// A character or word with no meaning in the operator table.
    /// `position` is the character offset of the token in the input.
    UnknownToken { token: String, position: usize },
    /// A `)` without a matching `(`; `position` is the token index.
    UnmatchedClose { position: usize },
    /// A `(` that is never closed; `position` is the token index.
    UnclosedOpen { position: usize },
    /// An operator without enough operands, e.g. `p ∧` or `∨ q`.
    MissingOperand { operator: char },
    /// Two operands without an operator between them, e.g. `p (q)`.
    MissingOperator,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty formula"),
            Self::UnknownToken { token, position } => {
                write!(f, "unknown token {token:?} at position {position}")
            }
            Self::UnmatchedClose { position } => {
                write!(f, "unmatched ')' at token {position}")
            }
            Self::UnclosedOpen { position } => write!(f, "unclosed '(' at token {position}"),
            Self::MissingOperand { operator } => {
                write!(f, "operator '{operator}' is missing an operand")
            }
            Self::MissingOperator => write!(f, "expected an operator between two operands"),
        }
    }
}

impl std::error::Error for SyntaxError {}

/// Top-level error for every fallible operation in this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormulaError {
    /// The formula text is malformed. Aborts the parse.
    Syntax(SyntaxError),
    /// An evaluation referenced a variable that has no value in the assignment.
    UnboundVariable(char),
    /// An operator table is unusable: an alias refers to more than one operator,
    /// or a connective is missing, duplicated or declared with the wrong arity.
    InvalidOperatorTable(String),
}

impl FormulaError {
    pub const fn is_syntax_error(&self) -> bool {
        matches!(self, Self::Syntax(_))
    }
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(e) => write!(f, "syntax error: {e}"),
            Self::UnboundVariable(v) => write!(f, "variable '{v}' has no assigned value"),
            Self::InvalidOperatorTable(reason) => write!(f, "invalid operator table: {reason}"),
        }
    }
}

impl std::error::Error for FormulaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Syntax(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SyntaxError> for FormulaError {
    fn from(err: SyntaxError) -> Self {
        Self::Syntax(err)
    }
}

pub type Result<T, E = FormulaError> = std::result::Result<T, E>;
