//! Lexer - converts a raw formula string into tokens with source spans

use crate::error::{FormulaError, Span};
use crate::parser::tokens::{Operator, Token, TokenKind};

/// Tokenize a formula string.
///
/// Numbers support integer, decimal, and scientific notation (`1`, `2.5`,
/// `.5`, `1e-3`). Identifiers are case-sensitive `[A-Za-z_][A-Za-z0-9_]*`.
pub(crate) fn lex(input: &str) -> Result<Vec<Token>, FormulaError> {
    let bytes = input.as_bytes();
    // Rough capacity heuristic: one token per two bytes of input
    let mut tokens = Vec::with_capacity(input.len() / 2 + 1);
    let mut pos = 0;

    while pos < bytes.len() {
        let b = bytes[pos];
        match b {
            b' ' | b'\t' | b'\r' | b'\n' => {
                pos += 1;
            }
            b'0'..=b'9' => {
                let (token, next) = lex_number(input, pos)?;
                tokens.push(token);
                pos = next;
            }
            // A leading dot starts a number only when followed by a digit
            b'.' if pos + 1 < bytes.len() && bytes[pos + 1].is_ascii_digit() => {
                let (token, next) = lex_number(input, pos)?;
                tokens.push(token);
                pos = next;
            }
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                let start = pos;
                while pos < bytes.len()
                    && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_')
                {
                    pos += 1;
                }
                tokens.push(Token::new(
                    TokenKind::Identifier(input[start..pos].to_string()),
                    Span::new(start, pos),
                ));
            }
            b'+' => {
                tokens.push(Token::new(
                    TokenKind::Operator(Operator::Add),
                    Span::at(pos),
                ));
                pos += 1;
            }
            b'-' => {
                tokens.push(Token::new(
                    TokenKind::Operator(Operator::Sub),
                    Span::at(pos),
                ));
                pos += 1;
            }
            b'*' => {
                tokens.push(Token::new(
                    TokenKind::Operator(Operator::Mul),
                    Span::at(pos),
                ));
                pos += 1;
            }
            b'/' => {
                tokens.push(Token::new(
                    TokenKind::Operator(Operator::Div),
                    Span::at(pos),
                ));
                pos += 1;
            }
            b'^' => {
                tokens.push(Token::new(
                    TokenKind::Operator(Operator::Pow),
                    Span::at(pos),
                ));
                pos += 1;
            }
            b'(' => {
                tokens.push(Token::new(TokenKind::LeftParen, Span::at(pos)));
                pos += 1;
            }
            b')' => {
                tokens.push(Token::new(TokenKind::RightParen, Span::at(pos)));
                pos += 1;
            }
            b',' => {
                tokens.push(Token::new(TokenKind::Comma, Span::at(pos)));
                pos += 1;
            }
            _ => {
                // Report the whole (possibly multi-byte) character
                let ch = input[pos..].chars().next().unwrap_or('\u{FFFD}');
                let end = pos + ch.len_utf8();
                return Err(FormulaError::invalid_token(
                    ch.to_string(),
                    Span::new(pos, end),
                ));
            }
        }
    }

    Ok(tokens)
}

/// Lex a numeric literal starting at `start`. Returns the token and the
/// position just past the literal.
fn lex_number(input: &str, start: usize) -> Result<(Token, usize), FormulaError> {
    let bytes = input.as_bytes();
    let mut pos = start;

    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }

    // Fractional part
    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
    }

    // Exponent part: e/E, optional sign, at least one digit
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp_pos = pos + 1;
        if exp_pos < bytes.len() && (bytes[exp_pos] == b'+' || bytes[exp_pos] == b'-') {
            exp_pos += 1;
        }
        if exp_pos < bytes.len() && bytes[exp_pos].is_ascii_digit() {
            pos = exp_pos;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
        }
        // No digits after the exponent marker: leave the 'e' for the
        // identifier lexer (it's implicit multiplication like `2e` = 2 * e)
    }

    let text = &input[start..pos];
    let span = Span::new(start, pos);
    match text.parse::<f64>() {
        Ok(value) => Ok((Token::new(TokenKind::Number(value), span), pos)),
        Err(_) => Err(FormulaError::invalid_number(text, span)),
    }
}
