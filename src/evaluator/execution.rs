//! Stack-machine evaluation of compiled bytecode
//!
//! One evaluation is a single pass over the instruction slice with a
//! pre-sized value stack. No allocation happens after the initial stack
//! reservation, and the compiled form is never mutated.

use super::{CompiledFormula, Instruction};

impl CompiledFormula {
    /// Evaluate the compiled formula against parameter values.
    ///
    /// `params` must contain one value per entry of
    /// [`param_names`](CompiledFormula::param_names), in the same order.
    /// Missing values read as NaN rather than panicking; higher layers
    /// ([`crate::Formula`]) guarantee the slice is complete before calling.
    ///
    /// Numeric semantics are plain IEEE-754: `1/0` is `inf`, `0/0` and
    /// out-of-domain function inputs are NaN, and both propagate through
    /// the remaining arithmetic.
    ///
    /// # Example
    /// ```
    /// use stat_formula::{parse, CompiledFormula};
    ///
    /// let compiled = CompiledFormula::compile(&parse("x / y").unwrap()).unwrap();
    /// assert_eq!(compiled.evaluate(&[1.0, 0.0]), f64::INFINITY);
    /// ```
    #[must_use]
    pub fn evaluate(&self, params: &[f64]) -> f64 {
        debug_assert_eq!(params.len(), self.param_names.len());

        let mut stack: Vec<f64> = Vec::with_capacity(self.stack_size);

        for instr in self.instructions.iter() {
            match *instr {
                Instruction::LoadConst(idx) => {
                    stack.push(self.constants.get(idx as usize).copied().unwrap_or(f64::NAN));
                }
                Instruction::LoadParam(idx) => {
                    stack.push(params.get(idx as usize).copied().unwrap_or(f64::NAN));
                }
                Instruction::Add => {
                    let b = stack.pop().unwrap_or(f64::NAN);
                    binary(&mut stack, |a| a + b);
                }
                Instruction::Sub => {
                    let b = stack.pop().unwrap_or(f64::NAN);
                    binary(&mut stack, |a| a - b);
                }
                Instruction::Mul => {
                    let b = stack.pop().unwrap_or(f64::NAN);
                    binary(&mut stack, |a| a * b);
                }
                Instruction::Div => {
                    let b = stack.pop().unwrap_or(f64::NAN);
                    binary(&mut stack, |a| a / b);
                }
                Instruction::Pow => {
                    let b = stack.pop().unwrap_or(f64::NAN);
                    binary(&mut stack, |a| a.powf(b));
                }
                Instruction::Neg => {
                    binary(&mut stack, |a| -a);
                }
                Instruction::Call { func, argc } => {
                    let argc = argc as usize;
                    let at = stack.len().saturating_sub(argc);
                    let result = match self.functions.get(func as usize) {
                        Some(def) => (def.eval)(&stack[at..]),
                        None => f64::NAN,
                    };
                    stack.truncate(at);
                    stack.push(result);
                }
            }
        }

        // The compiler guarantees well-formed bytecode leaves exactly one
        // value; NaN here would indicate a compiler bug
        stack.pop().unwrap_or(f64::NAN)
    }
}

/// Apply `f` to the top of the stack in place
#[inline]
fn binary(stack: &mut Vec<f64>, f: impl FnOnce(f64) -> f64) {
    match stack.last_mut() {
        Some(top) => *top = f(*top),
        None => stack.push(f64::NAN),
    }
}
