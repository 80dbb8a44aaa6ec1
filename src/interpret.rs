use crate::error::{Result, SyntaxError};
use crate::parser::{Postfix, Token};
use crate::symbols::{Arity, Connective};

/// A value domain for replaying a [`Postfix`] program.
///
/// The same program is run over rendered strings to enumerate subformulas
/// and over booleans to evaluate them; only the combinators differ.
pub trait Interpretation {
    type Value;

    fn variable(&mut self, name: char) -> Result<Self::Value>;

    fn unary(&mut self, connective: Connective, operand: Self::Value) -> Self::Value;

    fn binary(&mut self, connective: Connective, lhs: Self::Value, rhs: Self::Value)
        -> Self::Value;
}

/// Runs `program` on a value stack. Operators pop their operands (right
/// operand first) and push one result; exactly one value must remain.
pub fn interpret<I: Interpretation>(program: &Postfix, interpretation: &mut I) -> Result<I::Value> {
    let mut stack: Vec<I::Value> = Vec::with_capacity(program.len());

    for (position, token) in program.tokens().iter().enumerate() {
        match *token {
            Token::Variable(name) => stack.push(interpretation.variable(name)?),
            Token::Operator(connective) => {
                let result = match connective.arity() {
                    Arity::Unary => {
                        let operand = pop_operand(&mut stack, connective)?;
                        interpretation.unary(connective, operand)
                    }
                    Arity::Binary => {
                        let rhs = pop_operand(&mut stack, connective)?;
                        let lhs = pop_operand(&mut stack, connective)?;
                        interpretation.binary(connective, lhs, rhs)
                    }
                };
                stack.push(result);
            }
            // parentheses never survive `to_postfix`
            Token::LeftParen => return Err(SyntaxError::UnclosedOpen { position }.into()),
            Token::RightParen => return Err(SyntaxError::UnmatchedClose { position }.into()),
        }
    }

    let result = stack.pop().ok_or(SyntaxError::Empty)?;

    if stack.is_empty() {
        Ok(result)
    } else {
        Err(SyntaxError::MissingOperator.into())
    }
}

fn pop_operand<V>(stack: &mut Vec<V>, connective: Connective) -> Result<V> {
    stack.pop().ok_or_else(|| {
        SyntaxError::MissingOperand {
            operator: connective.default_symbol(),
        }
        .into()
    })
}
