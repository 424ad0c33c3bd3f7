//! Expression-to-bytecode compilation
//!
//! Single post-order walk over the AST. Numeric literals are interned into
//! the constant pool, symbols are assigned parameter indices in
//! first-encounter order, and the exact evaluation stack depth is tracked
//! so execution can pre-allocate.

use rustc_hash::FxHashMap;

use super::{CompiledFormula, Instruction};
use crate::Expr;
use crate::error::FormulaError;
use crate::functions::{FunctionDefinition, Registry};

pub(crate) struct Compiler {
    instructions: Vec<Instruction>,
    constants: Vec<f64>,
    functions: Vec<&'static FunctionDefinition>,
    param_names: Vec<String>,
    param_index: FxHashMap<String, u16>,
    stack: usize,
    max_stack: usize,
}

impl Compiler {
    pub(crate) fn new() -> Self {
        Compiler {
            instructions: Vec::new(),
            constants: Vec::new(),
            functions: Vec::new(),
            param_names: Vec::new(),
            param_index: FxHashMap::default(),
            stack: 0,
            max_stack: 0,
        }
    }

    pub(crate) fn compile(mut self, expr: &Expr) -> Result<CompiledFormula, FormulaError> {
        self.compile_expr(expr)?;

        debug_assert_eq!(self.stack, 1, "bytecode must leave exactly one value");

        Ok(CompiledFormula {
            instructions: self.instructions.into_boxed_slice(),
            constants: self.constants.into_boxed_slice(),
            functions: self.functions.into_boxed_slice(),
            param_names: self.param_names.into_boxed_slice(),
            stack_size: self.max_stack,
        })
    }

    fn compile_expr(&mut self, expr: &Expr) -> Result<(), FormulaError> {
        match expr {
            Expr::Number(n) => {
                let idx = self.intern_constant(*n);
                self.instructions.push(Instruction::LoadConst(idx));
                self.push();
            }

            Expr::Symbol(name) => {
                let idx = self.param_slot(name);
                self.instructions.push(Instruction::LoadParam(idx));
                self.push();
            }

            // Peephole: `-1 * expr` (the parser's unary minus) becomes Neg
            Expr::Mul(l, r) if l.as_number() == Some(-1.0) => {
                self.compile_expr(r)?;
                self.instructions.push(Instruction::Neg);
            }

            Expr::Add(l, r) => self.compile_binary(l, r, Instruction::Add)?,
            Expr::Sub(l, r) => self.compile_binary(l, r, Instruction::Sub)?,
            Expr::Mul(l, r) => self.compile_binary(l, r, Instruction::Mul)?,
            Expr::Div(l, r) => self.compile_binary(l, r, Instruction::Div)?,
            Expr::Pow(l, r) => self.compile_binary(l, r, Instruction::Pow)?,

            Expr::FunctionCall { name, args } => {
                let def = Registry::get(name).ok_or_else(|| FormulaError::UnknownFunction {
                    name: name.clone(),
                    span: None,
                })?;

                if !def.validate_arity(args.len()) {
                    return Err(FormulaError::WrongArity {
                        name: name.clone(),
                        min: *def.arity.start(),
                        max: *def.arity.end(),
                        got: args.len(),
                    });
                }

                for arg in args {
                    self.compile_expr(arg)?;
                }

                let func = self.intern_function(def);
                self.instructions.push(Instruction::Call {
                    func,
                    argc: args.len() as u8,
                });

                // The call consumes argc values and pushes one result
                self.stack = self.stack + 1 - args.len();
            }
        }

        Ok(())
    }

    fn compile_binary(
        &mut self,
        left: &Expr,
        right: &Expr,
        op: Instruction,
    ) -> Result<(), FormulaError> {
        self.compile_expr(left)?;
        self.compile_expr(right)?;
        self.instructions.push(op);
        self.stack -= 1;
        Ok(())
    }

    fn push(&mut self) {
        self.stack += 1;
        self.max_stack = self.max_stack.max(self.stack);
    }

    /// Intern a constant, deduplicating by bit pattern (so 0.0 and -0.0
    /// stay distinct and NaN still dedups against itself)
    fn intern_constant(&mut self, value: f64) -> u16 {
        let bits = value.to_bits();
        if let Some(idx) = self.constants.iter().position(|c| c.to_bits() == bits) {
            return idx as u16;
        }
        self.constants.push(value);
        (self.constants.len() - 1) as u16
    }

    fn intern_function(&mut self, def: &'static FunctionDefinition) -> u16 {
        if let Some(idx) = self
            .functions
            .iter()
            .position(|f| std::ptr::eq(*f, def))
        {
            return idx as u16;
        }
        self.functions.push(def);
        (self.functions.len() - 1) as u16
    }

    fn param_slot(&mut self, name: &str) -> u16 {
        if let Some(idx) = self.param_index.get(name) {
            return *idx;
        }
        let idx = self.param_names.len() as u16;
        self.param_names.push(name.to_string());
        self.param_index.insert(name.to_string(), idx);
        idx
    }
}
