//! The `Formula` type: raw expression text, parse state, parameter table,
//! constant slots, and the cached result.
//!
//! This is the caller-facing surface of the engine. A host (a stat system,
//! an editor inspector) owns the raw text and the current parameter values;
//! the formula owns the compiled form and keeps the parameter table in sync
//! with the free variables of the last successful parse.

use tracing::{debug, warn};

use crate::error::{FormulaError, Warning};
use crate::evaluator::CompiledFormula;
use crate::parser;
use crate::reserved::{CONSTANT_SLOT_COUNT, ReservedNames};

/// A named input to a formula, discovered from the expression's free
/// variables at parse time
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: f64,
}

/// Parse state of a [`Formula`].
///
/// Three states are deliberately distinct: "never parsed" (evaluation is a
/// contract error), "parsed an empty expression" (evaluation is the neutral
/// 0.0), and "ready". A failed parse never transitions the state - the last
/// good compiled form stays live.
#[derive(Debug, Clone, Default)]
enum FormulaState {
    #[default]
    Unparsed,
    Empty,
    Ready(CompiledFormula),
}

/// An editable stat formula: expression text plus current inputs.
///
/// # Example
/// ```
/// use stat_formula::Formula;
///
/// let mut formula = Formula::new("base * multiplier - armor");
/// formula.parse().unwrap();
///
/// formula.set_parameter("base", 50.0).unwrap();
/// formula.set_parameter("multiplier", 2.0).unwrap();
/// formula.set_parameter("armor", 30.0).unwrap();
///
/// assert_eq!(formula.evaluate().unwrap(), 70.0);
/// ```
///
/// Constant slots `c0`..`c9` are bound positionally and take precedence
/// over any same-named binding:
/// ```
/// use stat_formula::Formula;
///
/// let mut formula = Formula::new("c0 * level");
/// formula.parse().unwrap();
/// formula.set_constants(&[1.5]).unwrap();
/// formula.set_parameter("level", 10.0).unwrap();
/// assert_eq!(formula.evaluate().unwrap(), 15.0);
/// ```
#[derive(Debug, Clone)]
pub struct Formula {
    raw_expression: String,
    parsed_expression: String,
    state: FormulaState,
    parameters: Vec<Parameter>,
    constants: [f64; CONSTANT_SLOT_COUNT],
    result: f64,
    warnings: Vec<Warning>,
    reserved: ReservedNames,
}

impl Formula {
    /// Create a formula from raw expression text. The text is not parsed
    /// until [`parse`](Formula::parse) is called.
    pub fn new(raw_expression: impl Into<String>) -> Self {
        Self::with_reserved(raw_expression, ReservedNames::new())
    }

    /// Create a formula with a host-specific reserved-name configuration
    pub fn with_reserved(raw_expression: impl Into<String>, reserved: ReservedNames) -> Self {
        Formula {
            raw_expression: raw_expression.into(),
            parsed_expression: String::new(),
            state: FormulaState::default(),
            parameters: Vec::new(),
            constants: [0.0; CONSTANT_SLOT_COUNT],
            result: 0.0,
            warnings: Vec::new(),
            reserved,
        }
    }

    /// The raw expression text
    pub fn raw_expression(&self) -> &str {
        &self.raw_expression
    }

    /// Replace the raw expression text.
    ///
    /// Does not re-parse: the previously compiled form (if any) stays live
    /// until the next successful [`parse`](Formula::parse).
    pub fn set_raw_expression(&mut self, raw: impl Into<String>) {
        self.raw_expression = raw.into();
    }

    /// Canonical re-printed form of the last successfully parsed
    /// expression; empty before the first successful parse
    pub fn parsed_expression(&self) -> &str {
        &self.parsed_expression
    }

    /// The last computed result (0.0 before the first evaluation)
    pub fn result(&self) -> f64 {
        self.result
    }

    /// Reserved-name collision warnings from the last successful parse
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Current parameter table: one entry per free variable of the last
    /// successful parse, in first-encounter order
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Free variable names of the last successful parse, in first-encounter
    /// order. Empty before one. Constant slots are not free variables.
    pub fn free_variables(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.name.as_str()).collect()
    }

    /// Set the value of one parameter.
    ///
    /// # Errors
    /// `UnboundVariable` if `name` is not a free variable of the current
    /// compiled expression. Unknown names are rejected rather than stored
    /// so typos surface instead of silently defaulting a stat to 0.
    pub fn set_parameter(&mut self, name: &str, value: f64) -> Result<(), FormulaError> {
        match self.parameters.iter_mut().find(|p| p.name == name) {
            Some(param) => {
                param.value = value;
                Ok(())
            }
            None => Err(FormulaError::UnboundVariable {
                name: name.to_string(),
            }),
        }
    }

    /// Bind the constant slots `c0`..`c9` positionally. Slots beyond
    /// `values.len()` reset to 0.0.
    ///
    /// # Errors
    /// `TooManyConstants` if more than 10 values are supplied.
    pub fn set_constants(&mut self, values: &[f64]) -> Result<(), FormulaError> {
        if values.len() > CONSTANT_SLOT_COUNT {
            return Err(FormulaError::TooManyConstants {
                count: values.len(),
            });
        }
        self.constants = [0.0; CONSTANT_SLOT_COUNT];
        self.constants[..values.len()].copy_from_slice(values);
        Ok(())
    }

    /// Parse the raw expression and replace the compiled form.
    ///
    /// - Empty/whitespace text is a no-op: a previously compiled form is
    ///   left untouched (a formula that was never parsed moves to the
    ///   explicit "empty" state, where evaluation yields 0.0).
    /// - On success the parameter table is rebuilt from the expression's
    ///   free variables (constant slots excluded), every value reset to
    ///   0.0, and reserved-name collisions are recorded as warnings.
    /// - On error the previous compiled form, parameter table, and
    ///   canonical text are all preserved.
    pub fn parse(&mut self) -> Result<(), FormulaError> {
        if self.raw_expression.trim().is_empty() {
            if matches!(self.state, FormulaState::Unparsed) {
                self.state = FormulaState::Empty;
            }
            return Ok(());
        }

        let expr = parser::parse(&self.raw_expression)?;
        let compiled = CompiledFormula::compile(&expr)?;

        self.parameters = compiled
            .param_names()
            .iter()
            .filter(|name| ReservedNames::constant_slot(name).is_none())
            .map(|name| Parameter {
                name: name.clone(),
                value: 0.0,
            })
            .collect();

        self.warnings = self
            .reserved
            .collisions(self.parameters.iter().map(|p| p.name.as_str()));
        for warning in &self.warnings {
            warn!(formula = %self.raw_expression, "{}", warning);
        }

        self.parsed_expression = expr.to_string();
        debug!(
            formula = %self.parsed_expression,
            parameters = self.parameters.len(),
            "formula parsed"
        );
        self.state = FormulaState::Ready(compiled);
        Ok(())
    }

    /// Evaluate with the current parameter table and constants.
    ///
    /// Requires a prior [`parse`](Formula::parse): evaluation never parses
    /// implicitly, so it is read-only over the compiled form (the cached
    /// result is the only thing written).
    ///
    /// # Errors
    /// `NotParsed` if `parse` has never been called.
    pub fn evaluate(&mut self) -> Result<f64, FormulaError> {
        let value = match &self.state {
            FormulaState::Unparsed => return Err(FormulaError::NotParsed),
            FormulaState::Empty => 0.0,
            FormulaState::Ready(compiled) => {
                let mut values = Vec::with_capacity(compiled.param_count());
                for name in compiled.param_names() {
                    values.push(self.resolve(name)?);
                }
                compiled.evaluate(&values)
            }
        };

        self.result = value;
        Ok(value)
    }

    /// Evaluate against caller-supplied bindings, updating the stored
    /// parameter table.
    ///
    /// Every free variable must appear in `bindings`; constant slots are
    /// merged afterwards and override any same-named binding (constants
    /// win, matching their reserved status).
    ///
    /// # Errors
    /// `NotParsed` before the first parse; `UnboundVariable` if a free
    /// variable is missing from `bindings`.
    pub fn evaluate_with(&mut self, bindings: &[(&str, f64)]) -> Result<f64, FormulaError> {
        if matches!(self.state, FormulaState::Unparsed) {
            return Err(FormulaError::NotParsed);
        }

        // Bind free variables first so a missing one is reported before
        // any work happens
        let mut updated = Vec::with_capacity(self.parameters.len());
        for param in &self.parameters {
            let value = bindings
                .iter()
                .find(|(name, _)| *name == param.name)
                .map(|(_, value)| *value)
                .ok_or_else(|| FormulaError::UnboundVariable {
                    name: param.name.clone(),
                })?;
            updated.push(Parameter {
                name: param.name.clone(),
                value,
            });
        }
        self.parameters = updated;

        self.evaluate()
    }

    /// Resolve one compiled parameter name: constant slots read from the
    /// constants block (overriding everything else), free variables from
    /// the parameter table
    fn resolve(&self, name: &str) -> Result<f64, FormulaError> {
        if let Some(slot) = ReservedNames::constant_slot(name) {
            return Ok(self.constants[slot]);
        }
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value)
            .ok_or_else(|| FormulaError::UnboundVariable {
                name: name.to_string(),
            })
    }
}
