use crate::error::{FormulaError, Result, SyntaxError};
use crate::symbols::{Arity, Connective, Syntax};
use itertools::Itertools;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Variable(char),
    Operator(Connective),
    LeftParen,
    RightParen,
}

/// A formula in reverse-polish order: operands first, then their operator.
/// Contains only [`Token::Variable`] and [`Token::Operator`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Postfix {
    tokens: Vec<Token>,
}

impl Postfix {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Distinct variables in alphabetical order.
    pub fn variables(&self) -> Vec<char> {
        self.tokens
            .iter()
            .filter_map(|t| match t {
                Token::Variable(v) => Some(*v),
                _ => None,
            })
            .unique()
            .sorted()
            .collect()
    }

    pub fn render(&self, syntax: &Syntax) -> String {
        self.tokens
            .iter()
            .map(|t| match t {
                Token::Variable(v) => v.to_string(),
                Token::Operator(c) => syntax.symbol(*c).to_string(),
                Token::LeftParen => "(".to_string(),
                Token::RightParen => ")".to_string(),
            })
            .join(" ")
    }
}

pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    tokenize_with(Syntax::standard(), input)
}

/// Splits `input` into tokens. Whitespace is optional between tokens, aliases
/// are resolved to their connective, and only single lowercase letters are
/// accepted as variables.
pub fn tokenize_with(syntax: &Syntax, input: &str) -> Result<Vec<Token>> {
    let mut result = Vec::new();

    for c in syntax.pattern().captures_iter(input) {
        if c.name("space").is_some() {
            continue;
        } else if let Some(word) = c.name("word") {
            let text = word.as_str();
            let mut chars = text.chars();

            if let Some(connective) = syntax.lookup(text) {
                result.push(Token::Operator(connective));
            } else if let (Some(v), None) = (chars.next(), chars.next()) {
                if !v.is_ascii_lowercase() {
                    return Err(unknown(input, word.start(), text));
                }
                result.push(Token::Variable(v));
            } else {
                return Err(unknown(input, word.start(), text));
            }
        } else if let Some(op) = c.name("operator") {
            match syntax.lookup(op.as_str()) {
                Some(connective) => result.push(Token::Operator(connective)),
                None => return Err(unknown(input, op.start(), op.as_str())),
            }
        } else if c.name("open").is_some() {
            result.push(Token::LeftParen);
        } else if c.name("close").is_some() {
            result.push(Token::RightParen);
        } else if let Some(other) = c.name("other") {
            return Err(unknown(input, other.start(), other.as_str()));
        }
    }

    debug!("tokenized {input:?} into {result:?}");

    Ok(result)
}

fn unknown(input: &str, byte_offset: usize, token: &str) -> FormulaError {
    SyntaxError::UnknownToken {
        token: token.to_string(),
        position: input[..byte_offset].chars().count(),
    }
    .into()
}

#[derive(Debug, Clone, Copy)]
enum Pending {
    Open(usize),
    Operator(Connective),
}

/// Shunting-yard conversion from infix tokens to a postfix program.
///
/// Besides reordering, this checks that every operator has its operands and
/// every parenthesis its partner, so that the resulting program always
/// reduces to exactly one value.
pub fn to_postfix(syntax: &Syntax, tokens: &[Token]) -> Result<Postfix> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Pending> = Vec::new();
    let mut expect_operand = true;

    for (position, &token) in tokens.iter().enumerate() {
        match token {
            Token::Variable(_) => {
                if !expect_operand {
                    return Err(SyntaxError::MissingOperator.into());
                }
                output.push(token);
                expect_operand = false;
            }
            Token::LeftParen => {
                if !expect_operand {
                    return Err(SyntaxError::MissingOperator.into());
                }
                stack.push(Pending::Open(position));
            }
            Token::RightParen => {
                if !stack.iter().any(|p| matches!(p, Pending::Open(_))) {
                    return Err(SyntaxError::UnmatchedClose { position }.into());
                }
                if expect_operand {
                    return Err(missing_operand(syntax, tokens, position));
                }
                loop {
                    match stack.pop() {
                        Some(Pending::Operator(c)) => output.push(Token::Operator(c)),
                        Some(Pending::Open(_)) | None => break,
                    }
                }
            }
            Token::Operator(connective) => {
                let incoming = syntax.operator(connective);

                match incoming.arity {
                    Arity::Unary => {
                        if !expect_operand {
                            return Err(SyntaxError::MissingOperator.into());
                        }
                    }
                    Arity::Binary => {
                        if expect_operand {
                            return Err(SyntaxError::MissingOperand {
                                operator: incoming.symbol,
                            }
                            .into());
                        }
                        while let Some(&Pending::Operator(top)) = stack.last() {
                            if !syntax.operator(top).yields_to(incoming) {
                                break;
                            }
                            output.push(Token::Operator(top));
                            stack.pop();
                        }
                        expect_operand = true;
                    }
                }

                stack.push(Pending::Operator(connective));
            }
        }
    }

    if expect_operand {
        return Err(match tokens.last() {
            None => SyntaxError::Empty.into(),
            Some(Token::LeftParen) => SyntaxError::UnclosedOpen {
                position: tokens.len() - 1,
            }
            .into(),
            Some(_) => missing_operand(syntax, tokens, tokens.len()),
        });
    }

    while let Some(pending) = stack.pop() {
        match pending {
            Pending::Operator(c) => output.push(Token::Operator(c)),
            Pending::Open(position) => return Err(SyntaxError::UnclosedOpen { position }.into()),
        }
    }

    let postfix = Postfix::new(output);
    debug!("postfix: {}", postfix.render(syntax));

    Ok(postfix)
}

/// Error for a position where an operand was expected but `tokens[position]`
/// (or the end of input) was found instead.
fn missing_operand(syntax: &Syntax, tokens: &[Token], position: usize) -> FormulaError {
    match position.checked_sub(1).and_then(|i| tokens.get(i)) {
        Some(Token::Operator(c)) => SyntaxError::MissingOperand {
            operator: syntax.symbol(*c),
        }
        .into(),
        _ => SyntaxError::Empty.into(),
    }
}

pub fn compile(formula: &str) -> Result<Postfix> {
    compile_with(Syntax::standard(), formula)
}

/// Tokenizes and converts `formula` in one step.
pub fn compile_with(syntax: &Syntax, formula: &str) -> Result<Postfix> {
    let tokens = tokenize_with(syntax, formula)?;
    to_postfix(syntax, &tokens)
}
