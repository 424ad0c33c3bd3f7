//! Built-in function definitions and registry

mod definitions;
mod registry;

pub(crate) use registry::{FunctionDefinition, Registry};

/// Names of all built-in functions, sorted alphabetically.
///
/// These names are reserved: a variable with one of these names would
/// shadow the built-in in ambiguous ways, so choosing one is reported as a
/// [`crate::Warning::ReservedNameCollision`].
pub fn builtin_names() -> Vec<&'static str> {
    Registry::names()
}
