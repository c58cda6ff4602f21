//! # Operand lexer
//!
//! Classifies a single operand token that is neither a known register nor a
//! known label.

use logos::Logos;

/// Operand token class
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum OperandToken {
    /// Decimal integer, optionally signed
    #[regex(r"[+-]?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Integer(i64),

    /// Identifier (register or label lookalike)
    #[regex(r"[A-Za-z_.$][A-Za-z0-9_.$]*", |lex| lex.slice().to_string())]
    Symbol(String),
}

/// Classify a whole token. Returns `None` unless the token lexes to exactly
/// one operand covering the entire input.
pub fn classify(token: &str) -> Option<OperandToken> {
    let mut lex = OperandToken::lexer(token);
    let first = lex.next()?.ok()?;
    if lex.span().end != token.len() || lex.next().is_some() {
        return None;
    }
    Some(first)
}

/// Parse a token as an integer literal
pub fn integer(token: &str) -> Option<i64> {
    match classify(token)? {
        OperandToken::Integer(value) => Some(value),
        OperandToken::Symbol(_) => None,
    }
}
