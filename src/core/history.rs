//! Step-by-step history of a machine run.
//!
//! Recording is opt-in through [`MachineConfig`](crate::config::MachineConfig).
//! When it is on, every successful transition appends a [`Step`].

use super::state::StateName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single transition taken by a machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// The state being left
    pub from: StateName,
    /// The label that selected the transition
    pub label: String,
    /// The state being entered
    pub to: StateName,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of the steps taken during one run.
///
/// With a limit set, only the most recent steps are kept.
///
/// # Example
///
/// ```rust
/// use lexdfa::{MachineBuilder, MachineConfig};
///
/// let mut builder = MachineBuilder::with_config(MachineConfig {
///     record_history: true,
///     ..MachineConfig::default()
/// });
/// builder.path("one", "via", "two");
/// builder.path("two", "back", "one");
///
/// let mut machine = builder.start("one").unwrap();
/// machine.transition("via").unwrap();
/// machine.transition("back").unwrap();
///
/// let history = machine.history();
/// assert_eq!(history.labels(), vec!["via", "back"]);
/// assert_eq!(history.path().len(), 3); // one -> two -> one
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunHistory {
    steps: VecDeque<Step>,
    limit: Option<usize>,
}

impl RunHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// History that keeps at most `limit` of the most recent steps.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            steps: VecDeque::new(),
            limit: Some(limit),
        }
    }

    pub(crate) fn record(&mut self, step: Step) {
        if let Some(limit) = self.limit {
            if limit == 0 {
                return;
            }
            while self.steps.len() >= limit {
                self.steps.pop_front();
            }
        }
        self.steps.push_back(step);
    }

    /// All retained steps, oldest first.
    pub fn steps(&self) -> impl ExactSizeIterator<Item = &Step> + '_ {
        self.steps.iter()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Labels in the order they were consumed.
    pub fn labels(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.label.as_str()).collect()
    }

    /// States traversed: the source of the first retained step, then the
    /// target of every step.
    pub fn path(&self) -> Vec<&StateName> {
        let mut path = Vec::with_capacity(self.steps.len() + 1);
        if let Some(first) = self.steps.front() {
            path.push(&first.from);
        }
        for step in &self.steps {
            path.push(&step.to);
        }
        path
    }

    /// Time elapsed between the first and last retained step.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.steps.front(), self.steps.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }
}
