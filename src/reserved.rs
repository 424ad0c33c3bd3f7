//! Reserved-name configuration
//!
//! Built-in function names and the ten constant slot names `c0`..`c9` are
//! reserved: a formula variable with one of those names would shadow the
//! built-in meaning. The set is an explicit, immutable value held by each
//! [`crate::Formula`] rather than process-wide state, so hosts that embed
//! several engines with different extra keywords stay independent.

use rustc_hash::FxHashSet;

use crate::error::Warning;
use crate::functions::Registry;

/// Number of reserved constant slots (`c0`..`c9`)
pub const CONSTANT_SLOT_COUNT: usize = 10;

/// The reserved constant slot names, in positional order
pub const CONSTANT_SLOT_NAMES: [&str; CONSTANT_SLOT_COUNT] =
    ["c0", "c1", "c2", "c3", "c4", "c5", "c6", "c7", "c8", "c9"];

/// Immutable reserved-word set for one engine instance
#[derive(Debug, Clone)]
pub struct ReservedNames {
    names: FxHashSet<&'static str>,
    extra: FxHashSet<String>,
}

impl Default for ReservedNames {
    fn default() -> Self {
        let mut names: FxHashSet<&'static str> = Registry::names().into_iter().collect();
        names.extend(CONSTANT_SLOT_NAMES);
        ReservedNames {
            names,
            extra: FxHashSet::default(),
        }
    }
}

impl ReservedNames {
    /// The standard set: built-in function names plus `c0`..`c9`
    pub fn new() -> Self {
        Self::default()
    }

    /// Add host-specific reserved words on top of the standard set
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut reserved = Self::default();
        reserved.extra.extend(extra.into_iter().map(Into::into));
        reserved
    }

    /// Check whether a name is reserved
    pub fn is_reserved(&self, name: &str) -> bool {
        self.names.contains(name) || self.extra.contains(name)
    }

    /// If `name` is a constant slot (`c0`..`c9`), return its index
    pub fn constant_slot(name: &str) -> Option<usize> {
        let bytes = name.as_bytes();
        if bytes.len() == 2 && bytes[0] == b'c' && bytes[1].is_ascii_digit() {
            Some((bytes[1] - b'0') as usize)
        } else {
            None
        }
    }

    /// Collect collision warnings for a sequence of user-chosen names
    pub fn collisions<'a, I>(&self, names: I) -> Vec<Warning>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .filter(|name| self.is_reserved(name))
            .map(|name| Warning::ReservedNameCollision {
                name: name.to_string(),
            })
            .collect()
    }
}
