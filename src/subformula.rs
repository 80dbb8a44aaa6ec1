use crate::error::Result;
use crate::interpret::{interpret, Interpretation};
use crate::parser::{compile_with, Postfix, Token};
use crate::symbols::{Connective, Syntax};
use log::debug;
use rustc_hash::FxHashSet;
use std::borrow::Cow;

/// Canonical text of a subexpression, together with the postfix tokens that
/// compute it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// Whether the top-level connective is binary. Only such operands are
    /// wrapped in parentheses when they appear inside a larger expression.
    pub compound: bool,
    pub tokens: Vec<Token>,
}

impl Rendered {
    fn as_operand(&self) -> Cow<'_, str> {
        if self.compound {
            Cow::Owned(format!("({})", self.text))
        } else {
            Cow::Borrowed(&self.text)
        }
    }
}

/// One distinct subformula: its canonical text and the program evaluating it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subformula {
    pub text: String,
    pub program: Postfix,
}

impl Subformula {
    /// The variable name, if this subformula is a lone variable.
    pub fn variable(&self) -> Option<char> {
        match self.program.tokens() {
            [Token::Variable(v)] => Some(*v),
            _ => None,
        }
    }
}

/// Renders every intermediate value of a postfix program and records each
/// distinct rendering once, in the order it is first produced.
#[derive(Debug)]
pub struct Collector<'a> {
    syntax: &'a Syntax,
    subformulas: Vec<Subformula>,
    seen: FxHashSet<String>,
}

impl<'a> Collector<'a> {
    pub fn new(syntax: &'a Syntax) -> Self {
        Self {
            syntax,
            subformulas: Vec::new(),
            seen: FxHashSet::default(),
        }
    }

    fn register(&mut self, rendered: &Rendered) {
        if self.seen.insert(rendered.text.clone()) {
            self.subformulas.push(Subformula {
                text: rendered.text.clone(),
                program: Postfix::new(rendered.tokens.clone()),
            });
        }
    }

    pub fn subformulas(&self) -> &[Subformula] {
        &self.subformulas
    }

    pub fn into_subformulas(self) -> Vec<Subformula> {
        self.subformulas
    }
}

impl Interpretation for Collector<'_> {
    type Value = Rendered;

    fn variable(&mut self, name: char) -> Result<Rendered> {
        let rendered = Rendered {
            text: name.to_string(),
            compound: false,
            tokens: vec![Token::Variable(name)],
        };
        self.register(&rendered);

        Ok(rendered)
    }

    fn unary(&mut self, connective: Connective, operand: Rendered) -> Rendered {
        let text = format!("{}{}", self.syntax.symbol(connective), operand.as_operand());
        let mut tokens = operand.tokens;
        tokens.push(Token::Operator(connective));

        let rendered = Rendered {
            text,
            compound: false,
            tokens,
        };
        self.register(&rendered);

        rendered
    }

    fn binary(&mut self, connective: Connective, lhs: Rendered, rhs: Rendered) -> Rendered {
        let text = format!(
            "{} {} {}",
            lhs.as_operand(),
            self.syntax.symbol(connective),
            rhs.as_operand()
        );
        let mut tokens = lhs.tokens;
        tokens.extend(rhs.tokens);
        tokens.push(Token::Operator(connective));

        let rendered = Rendered {
            text,
            compound: true,
            tokens,
        };
        self.register(&rendered);

        rendered
    }
}

/// All distinct subformulas of `program`, leaves included, in first-seen
/// order, each with the slice of `program` that computes it.
pub fn collect_with(syntax: &Syntax, program: &Postfix) -> Result<Vec<Subformula>> {
    let mut collector = Collector::new(syntax);
    interpret(program, &mut collector)?;

    let subformulas = collector.into_subformulas();
    debug!(
        "collected {} subformulas: {:?}",
        subformulas.len(),
        subformulas.iter().map(|s| &s.text).collect::<Vec<_>>()
    );

    Ok(subformulas)
}

/// All distinct subformulas of `program`, leaves included, in first-seen order.
/// The whole formula is always the last entry.
pub fn collect_subformulas_with(syntax: &Syntax, program: &Postfix) -> Result<Vec<String>> {
    Ok(collect_with(syntax, program)?
        .into_iter()
        .map(|s| s.text)
        .collect())
}

pub fn collect_subformulas(formula: &str) -> Result<Vec<String>> {
    let syntax = Syntax::standard();
    collect_subformulas_with(syntax, &compile_with(syntax, formula)?)
}

/// The canonical rendering of `formula`: canonical operator symbols, single
/// spaces around binary operators and parentheses only around binary operands.
pub fn canonicalize_with(syntax: &Syntax, formula: &str) -> Result<String> {
    let program = compile_with(syntax, formula)?;
    let rendered = interpret(&program, &mut Collector::new(syntax))?;

    Ok(rendered.text)
}

pub fn canonicalize(formula: &str) -> Result<String> {
    canonicalize_with(Syntax::standard(), formula)
}
