//! Options shared by every machine started from a builder.

use crate::core::RunHistory;
use serde::{Deserialize, Serialize};

/// Machine options.
///
/// Missing fields fall back to their defaults when deserializing, so a
/// partial document is enough:
///
/// ```rust
/// use lexdfa::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "record_history": true }"#).unwrap();
/// assert!(config.record_history);
/// assert_eq!(config.history_limit, None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Record a [`Step`](crate::core::Step) for every successful transition.
    pub record_history: bool,

    /// Keep only this many of the most recent steps.
    pub history_limit: Option<usize>,
}

impl MachineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub(crate) fn new_history(&self) -> RunHistory {
        match self.history_limit {
            Some(limit) => RunHistory::with_limit(limit),
            None => RunHistory::new(),
        }
    }
}
