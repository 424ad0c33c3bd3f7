use crate::Expr;
use crate::error::FormulaError;
use crate::functions::Registry;
use crate::parser::tokens::{Operator, Token, TokenKind};

/// Parse tokens into an AST using the Pratt parsing algorithm
pub(crate) fn parse_expression(tokens: &[Token]) -> Result<Expr, FormulaError> {
    if tokens.is_empty() {
        return Err(FormulaError::UnexpectedEndOfInput);
    }

    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_expr(0)?;

    // The whole token stream must be consumed; anything left over is a
    // stray token (e.g. an unmatched `)`)
    if let Some(token) = parser.current() {
        return Err(FormulaError::unexpected_token(
            "end of expression",
            token.kind.describe(),
            Some(token.span),
        ));
    }

    Ok(expr)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn parse_expr(&mut self, min_precedence: u8) -> Result<Expr, FormulaError> {
        // Parse left side (prefix)
        let mut left = self.parse_prefix()?;

        // Parse operators and right side (infix)
        while let Some(token) = self.current() {
            let precedence = match &token.kind {
                TokenKind::Operator(op) => op.precedence(),
                _ => break,
            };

            if precedence < min_precedence {
                break;
            }

            left = self.parse_infix(left, precedence)?;
        }

        Ok(left)
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expr>, FormulaError> {
        let mut args = Vec::new();

        if matches!(self.current().map(|t| &t.kind), Some(TokenKind::RightParen)) {
            return Ok(args); // Empty argument list
        }

        loop {
            args.push(self.parse_expr(0)?);

            match self.current().map(|t| &t.kind) {
                Some(TokenKind::Comma) => {
                    self.advance(); // consume ,
                }
                Some(TokenKind::RightParen) => {
                    break;
                }
                _ => {
                    return Err(self.unexpected(", or )"));
                }
            }
        }

        Ok(args)
    }

    fn expect_right_paren(&mut self) -> Result<(), FormulaError> {
        if matches!(self.current().map(|t| &t.kind), Some(TokenKind::RightParen)) {
            self.advance(); // consume )
            Ok(())
        } else {
            Err(self.unexpected(")"))
        }
    }

    fn unexpected(&self, expected: &str) -> FormulaError {
        match self.current() {
            Some(token) => FormulaError::unexpected_token(
                expected,
                token.kind.describe(),
                Some(token.span),
            ),
            None => FormulaError::UnexpectedEndOfInput,
        }
    }

    fn parse_prefix(&mut self) -> Result<Expr, FormulaError> {
        let token = self
            .tokens
            .get(self.pos)
            .ok_or(FormulaError::UnexpectedEndOfInput)?;

        match &token.kind {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Expr::number(*n))
            }

            TokenKind::Identifier(name) => {
                self.advance();

                // An identifier followed by `(` is a function call
                if matches!(self.current().map(|t| &t.kind), Some(TokenKind::LeftParen)) {
                    let def = Registry::get(name).ok_or_else(|| FormulaError::UnknownFunction {
                        name: name.clone(),
                        span: Some(token.span),
                    })?;

                    self.advance(); // consume (
                    let args = self.parse_arguments()?;
                    self.expect_right_paren()?;

                    if !def.validate_arity(args.len()) {
                        return Err(FormulaError::WrongArity {
                            name: name.clone(),
                            min: *def.arity.start(),
                            max: *def.arity.end(),
                            got: args.len(),
                        });
                    }

                    Ok(Expr::func(def.name, args))
                } else {
                    Ok(Expr::symbol(name.clone()))
                }
            }

            // Unary minus: precedence between Mul (20) and Pow (30).
            // This ensures -x^2 parses as -(x^2), not (-x)^2.
            TokenKind::Operator(Operator::Sub) => {
                self.advance();
                let expr = self.parse_expr(25)?;
                Ok(Expr::mul_expr(Expr::number(-1.0), expr))
            }

            // Unary plus: same precedence as unary minus, just returns the expression
            TokenKind::Operator(Operator::Add) => {
                self.advance();
                self.parse_expr(25)
            }

            TokenKind::LeftParen => {
                self.advance(); // consume (
                let expr = self.parse_expr(0)?;
                self.expect_right_paren()?;
                Ok(expr)
            }

            _ => Err(FormulaError::invalid_token(
                token.kind.describe(),
                token.span,
            )),
        }
    }

    fn parse_infix(&mut self, left: Expr, precedence: u8) -> Result<Expr, FormulaError> {
        let token = self
            .tokens
            .get(self.pos)
            .ok_or(FormulaError::UnexpectedEndOfInput)?;

        match &token.kind {
            TokenKind::Operator(op) => {
                let op = *op;
                self.advance();

                // Right associative for power, left for others
                let next_precedence = if matches!(op, Operator::Pow) {
                    precedence // Right associative
                } else {
                    precedence + 1 // Left associative
                };

                let right = self.parse_expr(next_precedence)?;

                let result = match op {
                    Operator::Add => Expr::add_expr(left, right),
                    Operator::Sub => Expr::sub_expr(left, right),
                    Operator::Mul => Expr::mul_expr(left, right),
                    Operator::Div => Expr::div_expr(left, right),
                    Operator::Pow => Expr::pow(left, right),
                };

                Ok(result)
            }

            _ => Err(FormulaError::invalid_token(
                token.kind.describe(),
                token.span,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Span;

    fn tok(kind: TokenKind) -> Token {
        Token::new(kind, Span::default())
    }

    fn op(operator: Operator) -> Token {
        tok(TokenKind::Operator(operator))
    }

    fn ident(name: &str) -> Token {
        tok(TokenKind::Identifier(name.to_string()))
    }

    fn num(n: f64) -> Token {
        tok(TokenKind::Number(n))
    }

    #[test]
    fn test_parse_number() {
        let ast = parse_expression(&[num(3.5)]).unwrap();
        assert_eq!(ast, Expr::number(3.5));
    }

    #[test]
    fn test_parse_symbol() {
        let ast = parse_expression(&[ident("armor")]).unwrap();
        assert_eq!(ast, Expr::symbol("armor"));
    }

    #[test]
    fn test_precedence() {
        // x + 2 * 3 should be x + (2 * 3)
        let tokens = vec![ident("x"), op(Operator::Add), num(2.0), op(Operator::Mul), num(3.0)];
        let ast = parse_expression(&tokens).unwrap();

        match ast {
            Expr::Add(left, right) => {
                assert!(matches!(*left, Expr::Symbol(_)));
                assert!(matches!(*right, Expr::Mul(_, _)));
            }
            _ => panic!("Expected Add at top level"),
        }
    }

    #[test]
    fn test_pow_right_associative() {
        // 2 ^ 3 ^ 2 should be 2 ^ (3 ^ 2)
        let tokens = vec![num(2.0), op(Operator::Pow), num(3.0), op(Operator::Pow), num(2.0)];
        let ast = parse_expression(&tokens).unwrap();

        match ast {
            Expr::Pow(base, exp) => {
                assert_eq!(base.as_number(), Some(2.0));
                assert!(matches!(*exp, Expr::Pow(_, _)));
            }
            _ => panic!("Expected Pow at top level"),
        }
    }

    #[test]
    fn test_unary_minus_binds_below_pow() {
        // -x^2 should be -(x^2)
        let tokens = vec![op(Operator::Sub), ident("x"), op(Operator::Pow), num(2.0)];
        let ast = parse_expression(&tokens).unwrap();

        match ast {
            Expr::Mul(neg, inner) => {
                assert_eq!(neg.as_number(), Some(-1.0));
                assert!(matches!(*inner, Expr::Pow(_, _)));
            }
            _ => panic!("Expected Mul(-1, Pow) at top level"),
        }
    }

    #[test]
    fn test_parentheses() {
        // (x + 1) * 2
        let tokens = vec![
            tok(TokenKind::LeftParen),
            ident("x"),
            op(Operator::Add),
            num(1.0),
            tok(TokenKind::RightParen),
            op(Operator::Mul),
            num(2.0),
        ];
        let ast = parse_expression(&tokens).unwrap();

        match ast {
            Expr::Mul(left, right) => {
                assert!(matches!(*left, Expr::Add(_, _)));
                assert_eq!(right.as_number(), Some(2.0));
            }
            _ => panic!("Expected Mul at top level"),
        }
    }

    #[test]
    fn test_function_call() {
        let tokens = vec![
            ident("max"),
            tok(TokenKind::LeftParen),
            ident("a"),
            tok(TokenKind::Comma),
            ident("b"),
            tok(TokenKind::RightParen),
        ];
        let ast = parse_expression(&tokens).unwrap();
        assert!(matches!(ast, Expr::FunctionCall { .. }));
    }

    #[test]
    fn test_unknown_function() {
        let tokens = vec![
            ident("frobnicate"),
            tok(TokenKind::LeftParen),
            num(1.0),
            tok(TokenKind::RightParen),
        ];
        let result = parse_expression(&tokens);
        assert!(matches!(
            result,
            Err(FormulaError::UnknownFunction { .. })
        ));
    }

    #[test]
    fn test_wrong_arity() {
        let tokens = vec![
            ident("min"),
            tok(TokenKind::LeftParen),
            num(1.0),
            tok(TokenKind::RightParen),
        ];
        let result = parse_expression(&tokens);
        assert!(matches!(result, Err(FormulaError::WrongArity { .. })));
    }

    #[test]
    fn test_empty_parentheses() {
        // () should be an error
        let tokens = vec![tok(TokenKind::LeftParen), tok(TokenKind::RightParen)];
        assert!(parse_expression(&tokens).is_err());
    }

    #[test]
    fn test_unbalanced_open_paren() {
        // (1 + 2 without the closing paren
        let tokens = vec![
            tok(TokenKind::LeftParen),
            num(1.0),
            op(Operator::Add),
            num(2.0),
        ];
        let result = parse_expression(&tokens);
        assert_eq!(result, Err(FormulaError::UnexpectedEndOfInput));
    }

    #[test]
    fn test_trailing_token() {
        // 1 + 2) has a stray closing paren
        let tokens = vec![
            num(1.0),
            op(Operator::Add),
            num(2.0),
            tok(TokenKind::RightParen),
        ];
        let result = parse_expression(&tokens);
        assert!(matches!(
            result,
            Err(FormulaError::UnexpectedToken { .. })
        ));
    }
}
