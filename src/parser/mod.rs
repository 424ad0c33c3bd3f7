//! Parser module - converts formula strings to AST
mod implicit_mul;
mod lexer;
mod pratt;
mod tokens;

use crate::Expr;
use crate::error::FormulaError;

/// Parse a formula string into an expression AST.
///
/// The grammar supports numeric literals (integer, decimal, scientific),
/// the operators `+ - * / ^` with conventional precedence (`^` is
/// right-associative), parentheses, implicit multiplication (`2x`,
/// `(a)(b)`), case-sensitive identifiers, and calls to the built-in
/// functions listed by [`crate::functions::builtin_names`].
///
/// # Example
/// ```
/// use stat_formula::parse;
///
/// let expr = parse("base * multiplier - armor").unwrap();
/// assert_eq!(expr.symbols_in_order(), vec!["base", "multiplier", "armor"]);
/// ```
///
/// # Errors
/// Returns `FormulaError` if:
/// - The input is empty or whitespace-only
/// - The input contains invalid tokens or malformed numbers
/// - Parentheses are unbalanced
/// - A function call names an unknown function or has the wrong arity
pub fn parse(input: &str) -> Result<Expr, FormulaError> {
    // Pipeline: validate -> lex -> implicit_mul -> parse

    if input.trim().is_empty() {
        return Err(FormulaError::EmptyFormula);
    }

    let tokens = lexer::lex(input)?;
    let tokens_with_mul = implicit_mul::insert_implicit_multiplication(tokens);
    pratt::parse_expression(&tokens_with_mul)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pipeline() {
        let expr = parse("2x + 1").unwrap();
        assert_eq!(format!("{}", expr), "2 * x + 1");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse(""), Err(FormulaError::EmptyFormula));
        assert_eq!(parse("   "), Err(FormulaError::EmptyFormula));
    }

    #[test]
    fn test_parse_unbalanced() {
        assert!(parse("(1 + 2").is_err());
        assert!(parse("1 + 2)").is_err());
    }

    #[test]
    fn test_parse_function_call() {
        let expr = parse("clamp(hp, 0, hp_max)").unwrap();
        assert_eq!(
            expr.symbols_in_order(),
            vec!["hp".to_string(), "hp_max".to_string()]
        );
    }

    #[test]
    fn test_parse_case_sensitive() {
        let expr = parse("Damage + damage").unwrap();
        assert_eq!(expr.symbols_in_order(), vec!["Damage", "damage"]);
    }
}
