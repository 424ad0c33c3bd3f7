use rustc_hash::FxHashMap;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

/// Definition of a built-in function: its canonical name, acceptable
/// argument count, and numerical evaluation
#[derive(Clone)]
pub(crate) struct FunctionDefinition {
    /// Canonical name of the function (e.g., "sqrt", "clamp")
    pub name: &'static str,

    /// Acceptable argument count (arity)
    pub arity: RangeInclusive<usize>,

    /// Numerical evaluation. IEEE-754 semantics throughout: domain
    /// violations produce NaN/Infinity rather than errors.
    pub eval: fn(&[f64]) -> f64,
}

impl FunctionDefinition {
    /// Helper to check if argument count is valid
    pub(crate) fn validate_arity(&self, args: usize) -> bool {
        self.arity.contains(&args)
    }
}

/// Static registry storing all function definitions
static REGISTRY: OnceLock<FxHashMap<&'static str, FunctionDefinition>> = OnceLock::new();

/// Initialize the registry with all function definitions
fn init_registry() -> FxHashMap<&'static str, FunctionDefinition> {
    let mut map =
        FxHashMap::with_capacity_and_hasher(32, rustc_hash::FxBuildHasher::default());

    for def in crate::functions::definitions::all_definitions() {
        map.insert(def.name, def);
    }

    map
}

/// Central registry for looking up function definitions
pub(crate) struct Registry;

impl Registry {
    /// Get a function definition by name - O(1) lookup
    pub(crate) fn get(name: &str) -> Option<&'static FunctionDefinition> {
        REGISTRY.get_or_init(init_registry).get(name)
    }

    /// All built-in function names, sorted for stable output
    pub(crate) fn names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> =
            REGISTRY.get_or_init(init_registry).keys().copied().collect();
        names.sort_unstable();
        names
    }
}
