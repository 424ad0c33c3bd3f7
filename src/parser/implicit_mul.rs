//! Implicit multiplication insertion for natural notation
//!
//! Inserts `*` operators between tokens where multiplication is implied,
//! e.g. `2x` → `2 * x`, `(a)(b)` → `(a) * (b)`.

use crate::functions::Registry;
use crate::parser::tokens::{Operator, Token, TokenKind};

/// Check if implicit multiplication should be inserted between two tokens
fn should_insert_mul(current: &Token, next: &Token) -> bool {
    match (&current.kind, &next.kind) {
        // Identifier * ( — unless the identifier is a built-in function,
        // in which case `(` opens its argument list
        (TokenKind::Identifier(name), TokenKind::LeftParen) => Registry::get(name).is_none(),

        // Number * Identifier: 2x
        // Identifier * Identifier: hp mult (whitespace-separated)
        // ) * Identifier: (a)x
        // Number * (: 2(x)
        // ) * (: (a)(b)
        // Identifier * Number: x2 never lexes as two tokens, but ) * Number does
        (
            TokenKind::Number(_) | TokenKind::Identifier(_) | TokenKind::RightParen,
            TokenKind::Identifier(_),
        )
        | (TokenKind::Number(_) | TokenKind::RightParen, TokenKind::LeftParen)
        | (TokenKind::RightParen, TokenKind::Number(_)) => true,

        _ => false,
    }
}

/// Insert implicit multiplication operators between appropriate tokens.
///
/// The inserted operator carries the span of the token to its left so any
/// downstream error still points somewhere sensible.
pub(crate) fn insert_implicit_multiplication(tokens: Vec<Token>) -> Vec<Token> {
    if tokens.is_empty() {
        return tokens;
    }

    // Check whether any insertion is needed before allocating a new vector
    let needs_insertion = tokens.windows(2).any(|w| should_insert_mul(&w[0], &w[1]));

    if !needs_insertion {
        return tokens;
    }

    let mut result = Vec::with_capacity(tokens.len() * 3 / 2);
    let mut it = tokens.into_iter().peekable();

    while let Some(current) = it.next() {
        let needs_mul = it
            .peek()
            .map_or(false, |next| should_insert_mul(&current, next));

        let span = current.span;
        result.push(current);
        if needs_mul {
            result.push(Token::new(TokenKind::Operator(Operator::Mul), span));
        }
    }

    result
}
