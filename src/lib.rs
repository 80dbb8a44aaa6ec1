#![warn(clippy::disallowed_types)]

pub use error::{FormulaError, SyntaxError};
pub use symbols::*;
pub use truth_table::{
    build_truth_table, build_truth_table_with, parse_and_collect, parse_and_collect_with,
    tabulate_with, TruthTable, TruthValue,
};

pub mod error;
pub mod eval;
pub mod interpret;
pub mod parser;
pub mod subformula;
pub mod table_io;

mod truth_table;

mod symbols;
