//! Arithmetic formula engine for character stats.
//!
//! Parses infix expressions like `base * multiplier + sqrt(level) - c0`
//! into an AST, compiles them to bytecode, and evaluates them repeatedly
//! against named `f64` bindings. Built for game stat systems where
//! designers author formulas as text and the engine runs them every frame.
//!
//! # Quick start
//!
//! One-shot evaluation:
//! ```
//! use stat_formula::eval_str;
//!
//! let damage = eval_str("base * (1 + crit)", &[("base", 40.0), ("crit", 0.5)]).unwrap();
//! assert_eq!(damage, 60.0);
//! ```
//!
//! Stateful, with parameter table and constant slots:
//! ```
//! use stat_formula::Formula;
//!
//! let mut formula = Formula::new("clamp(hp + c0, 0, maxhp)");
//! formula.parse().unwrap();
//! assert_eq!(formula.free_variables(), vec!["hp", "maxhp"]);
//!
//! formula.set_constants(&[25.0]).unwrap();
//! formula.set_parameter("hp", 90.0).unwrap();
//! formula.set_parameter("maxhp", 100.0).unwrap();
//! assert_eq!(formula.evaluate().unwrap(), 100.0);
//! ```
//!
//! # Semantics
//!
//! - `+ - * /` with standard precedence, `^` right-associative, unary
//!   minus binds tighter than `^`'s base (`-x^2` is `-(x^2)`)
//! - Implicit multiplication: `2x`, `(a)(b)`, `3(x + 1)`
//! - Identifiers are case-sensitive; unknown identifiers become free
//!   variables, reported in first-encounter order
//! - `c0`..`c9` are reserved constant slots, never free variables, and
//!   always win over same-named bindings
//! - Arithmetic is plain IEEE-754: division by zero gives infinity,
//!   domain violations give NaN, evaluation itself never fails

mod ast;
mod attribute;
mod display;
mod error;
mod evaluator;
mod formula;
pub mod functions;
mod parser;
mod reserved;

#[cfg(test)]
mod tests;

pub use ast::Expr;
pub use attribute::Attribute;
pub use error::{FormulaError, Span, Warning};
pub use evaluator::CompiledFormula;
pub use formula::{Formula, Parameter};
pub use parser::parse;
pub use reserved::{CONSTANT_SLOT_COUNT, CONSTANT_SLOT_NAMES, ReservedNames};

/// Parse and evaluate an expression in one call.
///
/// Every name in the expression, constant slots included, is resolved from
/// `bindings`. For the stateful API with constant-slot precedence and a
/// persistent parameter table, use [`Formula`].
///
/// # Example
/// ```
/// use stat_formula::eval_str;
///
/// assert_eq!(eval_str("x^2 + 1", &[("x", 3.0)]).unwrap(), 10.0);
/// ```
///
/// # Errors
/// Any parse error, or `UnboundVariable` if a name in the expression is
/// missing from `bindings`.
pub fn eval_str(input: &str, bindings: &[(&str, f64)]) -> Result<f64, FormulaError> {
    let expr = parse(input)?;
    let compiled = CompiledFormula::compile(&expr)?;

    let mut values = Vec::with_capacity(compiled.param_count());
    for name in compiled.param_names() {
        let value = bindings
            .iter()
            .find(|(binding, _)| binding == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| FormulaError::UnboundVariable { name: name.clone() })?;
        values.push(value);
    }

    Ok(compiled.evaluate(&values))
}
