//! Compiled formula evaluator
//!
//! Converts an expression tree into flat bytecode that is executed on a
//! small stack machine, so repeated evaluation (once per game frame, per
//! actor) never re-traverses the tree.
//!
//! ```text
//! ┌────────────┐    ┌────────────┐    ┌─────────────────┐
//! │    Expr    │ -> │  Compiler  │ -> │ CompiledFormula │
//! │ (AST tree) │    │ (bytecode) │    │ (stack machine) │
//! └────────────┘    └────────────┘    └─────────────────┘
//! ```
//!
//! A `CompiledFormula` is immutable after construction: evaluation takes
//! `&self` and a value slice, and every call with the same inputs produces
//! the same output.

mod compiler;
mod execution;

use crate::Expr;
use crate::error::FormulaError;
use crate::functions::FunctionDefinition;

/// Bytecode instruction for the formula stack machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Instruction {
    /// Push a value from the constant pool
    LoadConst(u16),
    /// Push a parameter value by index
    LoadParam(u16),
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    /// Negate the top of the stack (emitted for `-1 * expr` patterns)
    Neg,
    /// Call built-in function `func` with the top `argc` stack values
    Call { func: u16, argc: u8 },
}

/// A parsed formula compiled to bytecode, ready for repeated evaluation.
///
/// Parameter order is the first-encounter order of symbols in the source
/// expression; [`CompiledFormula::param_names`] exposes it so callers can
/// build the value slice for [`CompiledFormula::evaluate`].
#[derive(Clone)]
pub struct CompiledFormula {
    /// Bytecode instructions (immutable after compilation)
    pub(crate) instructions: Box<[Instruction]>,
    /// Constant pool for numeric literals
    pub(crate) constants: Box<[f64]>,
    /// Built-in functions referenced by `Call` instructions
    pub(crate) functions: Box<[&'static FunctionDefinition]>,
    /// Parameter names in first-encounter order
    pub(crate) param_names: Box<[String]>,
    /// Exact stack depth required for evaluation
    pub(crate) stack_size: usize,
}

impl CompiledFormula {
    /// Compile an expression to bytecode.
    ///
    /// # Example
    /// ```
    /// use stat_formula::{parse, CompiledFormula};
    ///
    /// let expr = parse("base * multiplier").unwrap();
    /// let compiled = CompiledFormula::compile(&expr).unwrap();
    /// assert_eq!(compiled.param_names(), &["base", "multiplier"]);
    /// assert_eq!(compiled.evaluate(&[10.0, 1.5]), 15.0);
    /// ```
    ///
    /// # Errors
    /// Returns `FormulaError` if the expression calls an unknown function
    /// or a known function with the wrong argument count. (Expressions
    /// coming out of [`crate::parse`] were already validated; this re-checks
    /// trees built directly through the `Expr` constructors.)
    pub fn compile(expr: &Expr) -> Result<Self, FormulaError> {
        compiler::Compiler::new().compile(expr)
    }

    /// Parameter names in first-encounter order
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Number of parameter values `evaluate` expects
    pub fn param_count(&self) -> usize {
        self.param_names.len()
    }
}

impl std::fmt::Debug for CompiledFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledFormula")
            .field("instructions", &self.instructions.len())
            .field("params", &self.param_names)
            .field("stack_size", &self.stack_size)
            .finish()
    }
}
