//! Named stat attributes
//!
//! An attribute pairs a human-facing display name ("Attack Speed") with the
//! identifier used inside formulas ("attackspeed"). Hosts define attributes
//! once and reference them from any number of formulas.

use tracing::warn;

use crate::error::Warning;
use crate::reserved::ReservedNames;

/// A stat attribute: display name plus formula variable name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    defined_name: String,
    variable_name: String,
}

impl Attribute {
    /// Create an attribute with explicit display and variable names
    pub fn new(defined_name: impl Into<String>, variable_name: impl Into<String>) -> Self {
        Attribute {
            defined_name: defined_name.into(),
            variable_name: variable_name.into(),
        }
    }

    /// Create an attribute whose variable name is derived from the display
    /// name via [`suggest_variable_name`](Attribute::suggest_variable_name)
    pub fn with_suggested_name(defined_name: impl Into<String>) -> Self {
        let defined_name = defined_name.into();
        let variable_name = Self::suggest_variable_name(&defined_name);
        Attribute {
            defined_name,
            variable_name,
        }
    }

    /// Display name for editors and UI
    pub fn defined_name(&self) -> &str {
        &self.defined_name
    }

    /// Identifier this attribute binds to inside formulas
    pub fn variable_name(&self) -> &str {
        &self.variable_name
    }

    /// Derive a formula-safe identifier from a display name: lowercased
    /// with spaces removed ("Attack Speed" becomes "attackspeed")
    pub fn suggest_variable_name(defined_name: &str) -> String {
        defined_name
            .chars()
            .filter(|c| *c != ' ')
            .flat_map(char::to_lowercase)
            .collect()
    }

    /// Check the variable name against the reserved set. Collisions are
    /// logged and returned as warnings; the attribute stays usable.
    pub fn validate(&self, reserved: &ReservedNames) -> Vec<Warning> {
        let warnings = reserved.collisions([self.variable_name.as_str()]);
        for warning in &warnings {
            warn!(attribute = %self.defined_name, "{}", warning);
        }
        warnings
    }
}
