use pretty_assertions::assert_eq;

use proptab::error::{FormulaError, Result};
use proptab::parser::*;
use proptab::{Connective, Syntax, SyntaxError};

fn postfix(formula: &str) -> Result<String> {
    Ok(compile(formula)?.render(Syntax::standard()))
}

fn syntax_error(formula: &str) -> SyntaxError {
    match compile(formula) {
        Err(FormulaError::Syntax(e)) => e,
        other => panic!("expected a syntax error for {formula:?}, got {other:?}"),
    }
}

#[test]
fn test_basic_tokens() -> Result<()> {
    let test_strs: Vec<&str> = vec![
        "p",
        "p ∧ q",
        "p∧q",
        "  p   &q ",
        "(p ∨ q)",
        "( p|q )",
        "¬p",
        "~~p",
        "!(p)",
        "p -> q",
        "p->q",
        "p<->q",
        "p ⇔ q",
        "((p → q) ∧ (p → r)) → (q ∧ r)",
    ];

    for test_str in test_strs {
        dbg!(test_str);
        dbg!(tokenize(test_str)?);
    }

    Ok(())
}

#[test]
fn test_adjacent_tokens() -> Result<()> {
    assert_eq!(
        tokenize("¬p∧q")?,
        vec![
            Token::Operator(Connective::Not),
            Token::Variable('p'),
            Token::Operator(Connective::And),
            Token::Variable('q'),
        ]
    );

    assert_eq!(
        tokenize("(p|q)")?,
        vec![
            Token::LeftParen,
            Token::Variable('p'),
            Token::Operator(Connective::Or),
            Token::Variable('q'),
            Token::RightParen,
        ]
    );

    Ok(())
}

#[test]
fn test_multi_character_aliases() -> Result<()> {
    let implies = vec![
        Token::Variable('p'),
        Token::Operator(Connective::Implies),
        Token::Variable('q'),
    ];
    let iff = vec![
        Token::Variable('p'),
        Token::Operator(Connective::Iff),
        Token::Variable('q'),
    ];

    assert_eq!(tokenize("p->q")?, implies);
    assert_eq!(tokenize("p → q")?, implies);
    assert_eq!(tokenize("p<->q")?, iff);
    assert_eq!(tokenize("p <-> q")?, iff);
    assert_eq!(tokenize("p⇔q")?, iff);
    assert_eq!(tokenize("p ↔ q")?, iff);

    Ok(())
}

#[test]
fn test_unknown_tokens() {
    let cases = [
        ("pq", "pq", 0),
        ("p ∧ Q", "Q", 4),
        ("p # q", "#", 2),
        ("p - > q", "-", 2),
        ("p > q", ">", 2),
        ("p <- q", "<", 2),
        ("p1 ∨ q", "p1", 0),
        ("¬p ∧ true", "true", 5),
    ];

    for (formula, token, position) in cases {
        assert_eq!(
            tokenize(formula),
            Err(FormulaError::Syntax(SyntaxError::UnknownToken {
                token: token.to_string(),
                position,
            })),
            "{formula}"
        );
    }
}

#[test]
fn test_precedence() -> Result<()> {
    assert_eq!(postfix("p ∨ q ∧ r")?, "p q r ∧ ∨");
    assert_eq!(postfix("p ∧ q ∨ r")?, "p q ∧ r ∨");
    assert_eq!(postfix("¬p ∧ q")?, "p ¬ q ∧");
    assert_eq!(postfix("¬(p ∧ q)")?, "p q ∧ ¬");
    assert_eq!(postfix("p → q ↔ r")?, "p q → r ↔");
    assert_eq!(postfix("p ∧ q → r ∨ s")?, "p q ∧ r s ∨ →");
    assert_eq!(postfix("(p ∨ q) ∧ r")?, "p q ∨ r ∧");
    assert_eq!(postfix("((p))")?, "p");

    Ok(())
}

#[test]
fn test_associativity() -> Result<()> {
    assert_eq!(postfix("p ∧ q ∧ r")?, "p q ∧ r ∧");
    assert_eq!(postfix("p ∨ q ∨ r")?, "p q ∨ r ∨");
    assert_eq!(postfix("p → q → r")?, "p q r → →");
    assert_eq!(postfix("p ↔ q ↔ r")?, "p q ↔ r ↔");
    assert_eq!(postfix("¬¬p")?, "p ¬ ¬");

    Ok(())
}

#[test]
fn test_unbalanced_parentheses() {
    assert_eq!(
        syntax_error("p ∧ q)"),
        SyntaxError::UnmatchedClose { position: 3 }
    );
    assert_eq!(syntax_error(")p"), SyntaxError::UnmatchedClose { position: 0 });
    assert_eq!(
        syntax_error("(p → q)) ∧ r"),
        SyntaxError::UnmatchedClose { position: 5 }
    );
    assert_eq!(syntax_error("(p ∧ q"), SyntaxError::UnclosedOpen { position: 0 });
    assert_eq!(syntax_error("p ∧ ("), SyntaxError::UnclosedOpen { position: 2 });
}

#[test]
fn test_missing_operands_and_operators() {
    assert_eq!(syntax_error(""), SyntaxError::Empty);
    assert_eq!(syntax_error("   "), SyntaxError::Empty);
    assert_eq!(syntax_error("()"), SyntaxError::Empty);
    assert_eq!(syntax_error("p ∧"), SyntaxError::MissingOperand { operator: '∧' });
    assert_eq!(syntax_error("∨ q"), SyntaxError::MissingOperand { operator: '∨' });
    assert_eq!(syntax_error("p -> "), SyntaxError::MissingOperand { operator: '→' });
    assert_eq!(syntax_error("¬"), SyntaxError::MissingOperand { operator: '¬' });
    assert_eq!(syntax_error("(p ∧)"), SyntaxError::MissingOperand { operator: '∧' });
    assert_eq!(syntax_error("p q"), SyntaxError::MissingOperator);
    assert_eq!(syntax_error("p (q)"), SyntaxError::MissingOperator);
    assert_eq!(syntax_error("p ¬q"), SyntaxError::MissingOperator);
}

#[test]
fn test_postfix_variables() -> Result<()> {
    assert_eq!(compile("r ∧ (p ∨ r) → q")?.variables(), vec!['p', 'q', 'r']);

    Ok(())
}

#[test]
fn test_custom_word_aliases() -> Result<()> {
    let mut operators = proptab::standard_operators();
    for op in operators.iter_mut() {
        match op.connective {
            Connective::And => op.aliases.push("and".to_string()),
            Connective::Or => op.aliases.push("or".to_string()),
            Connective::Not => op.aliases.push("not".to_string()),
            _ => {}
        }
    }
    let syntax = Syntax::new(operators)?;

    assert_eq!(
        compile_with(&syntax, "not p and q or r")?.render(&syntax),
        "p ¬ q ∧ r ∨"
    );
    // whole words only
    assert!(tokenize_with(&syntax, "p band q").is_err());
    // the standard syntax is unaffected
    assert!(tokenize("p and q").is_err());

    Ok(())
}
