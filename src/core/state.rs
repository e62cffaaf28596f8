//! State names and the per-state record stored in the graph.
//!
//! A state is nothing more than a unique name. Everything the engine knows
//! about it (outgoing transitions, entry callbacks, acceptance) lives in a
//! [`StateRecord`] owned by the graph.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Error type returned by fallible entry callbacks.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Entry callback attached to a state.
///
/// Callbacks take no arguments. Any context they need (a node stack, the
/// current token text, a counter) is captured by the closure itself.
pub type EntryCallback = Arc<dyn Fn() -> Result<(), CallbackError> + Send + Sync>;

/// Name of a state in the transition graph.
///
/// # Example
///
/// ```rust
/// use lexdfa::core::StateName;
///
/// let name = StateName::from("let-identifier");
/// assert_eq!(name.as_str(), "let-identifier");
/// assert_eq!(name.to_string(), "let-identifier");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateName(String);

impl StateName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StateName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for StateName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for StateName {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl Borrow<str> for StateName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the graph knows about a single state.
#[derive(Default)]
pub(crate) struct StateRecord {
    pub(crate) transitions: BTreeMap<String, StateName>,
    pub(crate) callbacks: Vec<EntryCallback>,
    pub(crate) accepting: bool,
}

impl StateRecord {
    /// Target of the transition taken on `label`, if one is declared.
    pub(crate) fn target(&self, label: &str) -> Option<&StateName> {
        self.transitions.get(label)
    }
}
