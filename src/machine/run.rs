//! Machine that walks a compiled graph one label at a time.

use crate::config::MachineConfig;
use crate::core::graph::Graph;
use crate::core::{RunHistory, StateName, Step};
use crate::machine::error::MachineError;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a machine run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Accepting labels
    Active,

    /// Finished in an accepting state; every further call fails
    Finished,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Active => f.write_str("active"),
            RunState::Finished => f.write_str("finished"),
        }
    }
}

/// One independent run over a builder's graph.
///
/// The graph is shared by reference; the cursor, run state and history are
/// private to this machine.
pub struct Machine<'g> {
    graph: &'g Graph,
    initial: &'g StateName,
    current: &'g StateName,
    run_state: RunState,
    recording: bool,
    history: RunHistory,
}

impl<'g> Machine<'g> {
    pub(crate) fn new(graph: &'g Graph, initial: &'g StateName, config: &MachineConfig) -> Self {
        Self {
            graph,
            initial,
            current: initial,
            run_state: RunState::Active,
            recording: config.record_history,
            history: config.new_history(),
        }
    }

    pub(crate) fn restore(
        graph: &'g Graph,
        initial: &'g StateName,
        current: &'g StateName,
        run_state: RunState,
        recording: bool,
        history: RunHistory,
    ) -> Self {
        Self {
            graph,
            initial,
            current,
            run_state,
            recording,
            history,
        }
    }

    pub fn current_state(&self) -> &'g StateName {
        self.current
    }

    /// The state this run was started at.
    pub fn initial_state(&self) -> &'g StateName {
        self.initial
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_finished(&self) -> bool {
        self.run_state == RunState::Finished
    }

    /// Whether [`finish`](Self::finish) would succeed right now.
    pub fn is_accepting(&self) -> bool {
        !self.is_finished() && self.graph.is_accepting(self.current.as_str())
    }

    /// Steps recorded so far. Empty unless history recording is enabled.
    pub fn history(&self) -> &RunHistory {
        &self.history
    }

    /// Whether successful transitions are appended to the history.
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Follow the transition for `label` from the current state, then run
    /// the new state's entry callbacks in registration order.
    ///
    /// On [`MachineError::InvalidTransition`] the current state is unchanged.
    /// On [`MachineError::Callback`] the machine has already moved and the
    /// remaining callbacks of that state are skipped.
    pub fn transition(&mut self, label: &str) -> Result<(), MachineError> {
        self.ensure_active()?;

        let graph = self.graph;
        let Some(next) = graph.target(self.current.as_str(), label) else {
            tracing::trace!("No transition from '{}' on '{}'", self.current, label);
            return Err(MachineError::InvalidTransition {
                state: self.current.clone(),
                label: label.to_string(),
            });
        };

        tracing::trace!("Transition '{}' --{}--> '{}'", self.current, label, next);
        let from = std::mem::replace(&mut self.current, next);

        if self.recording {
            self.history.record(Step {
                from: from.clone(),
                label: label.to_string(),
                to: next.clone(),
                timestamp: Utc::now(),
            });
        }

        for callback in graph.callbacks(next.as_str()) {
            if let Err(source) = callback() {
                tracing::warn!("Entry callback for state '{}' failed: {}", next, source);
                return Err(MachineError::Callback {
                    state: next.clone(),
                    source,
                });
            }
        }

        Ok(())
    }

    /// Validate that the run ended in an accepting state.
    ///
    /// On success the machine is finished for good. On
    /// [`MachineError::UnacceptableFinishState`] it stays active.
    pub fn finish(&mut self) -> Result<(), MachineError> {
        self.ensure_active()?;

        if !self.graph.is_accepting(self.current.as_str()) {
            return Err(MachineError::UnacceptableFinishState {
                state: self.current.clone(),
            });
        }

        self.run_state = RunState::Finished;
        tracing::debug!("Machine finished in state '{}'", self.current);
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), MachineError> {
        match self.run_state {
            RunState::Active => Ok(()),
            RunState::Finished => Err(MachineError::Unusable),
        }
    }
}

impl fmt::Debug for Machine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("initial", self.initial)
            .field("current", self.current)
            .field("run_state", &self.run_state)
            .field("steps", &self.history.len())
            .finish()
    }
}
