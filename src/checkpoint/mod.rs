//! Checkpoint and resume for machine runs.
//!
//! A checkpoint captures the cursor of a machine (initial state, current
//! state, run state and recorded history) so a long token stream can be
//! parked and picked up later against the same grammar. The graph itself,
//! and in particular its callbacks, is never serialized; resuming needs the
//! builder that declared it.

use crate::builder::MachineBuilder;
use crate::core::{RunHistory, StateName};
use crate::machine::{Machine, RunState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a machine cursor.
///
/// # Example
///
/// ```rust
/// use lexdfa::MachineBuilder;
/// use lexdfa::checkpoint::Checkpoint;
///
/// let mut builder = MachineBuilder::new();
/// builder.path("one", "via", "two");
/// builder.accept("two").unwrap();
///
/// let mut machine = builder.start("one").unwrap();
/// machine.transition("via").unwrap();
/// let json = machine.checkpoint().to_json().unwrap();
///
/// let checkpoint = Checkpoint::from_json(&json).unwrap();
/// let mut resumed = builder.resume(&checkpoint).unwrap();
/// assert_eq!(resumed.current_state().as_str(), "two");
/// resumed.finish().unwrap();
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// State the run was started at
    pub initial_state: StateName,

    /// State the run is currently in
    pub current_state: StateName,

    /// Whether the run was still active or already finished
    pub run_state: RunState,

    /// Steps recorded up to the checkpoint
    pub history: RunHistory,
}

impl Checkpoint {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}

impl Machine<'_> {
    /// Capture the current cursor.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            initial_state: self.initial_state().clone(),
            current_state: self.current_state().clone(),
            run_state: self.run_state(),
            history: self.history().clone(),
        }
    }
}

impl MachineBuilder {
    /// Rebuild a machine from `checkpoint` over this builder's graph.
    ///
    /// Both states named by the checkpoint must exist. Callbacks are not
    /// replayed; the machine simply continues from the saved cursor.
    /// Recording and the history limit follow this builder's config, so
    /// saved steps beyond the limit are dropped oldest first.
    pub fn resume(&self, checkpoint: &Checkpoint) -> Result<Machine<'_>, CheckpointError> {
        checkpoint.check_version()?;

        let graph = self.graph();
        let resolve = move |state: &StateName| {
            graph
                .resolve(state.as_str())
                .ok_or_else(|| CheckpointError::UnknownState {
                    state: state.clone(),
                })
        };
        let initial = resolve(&checkpoint.initial_state)?;
        let current = resolve(&checkpoint.current_state)?;

        let mut history = self.config().new_history();
        for step in checkpoint.history.steps() {
            history.record(step.clone());
        }

        tracing::debug!(
            "Resuming checkpoint {} at state '{}' ({})",
            checkpoint.id,
            current,
            checkpoint.run_state
        );

        Ok(Machine::restore(
            graph,
            initial,
            current,
            checkpoint.run_state,
            self.config().record_history,
            history,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::MachineError;
    use crate::MachineConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn cycle_builder(config: MachineConfig) -> MachineBuilder {
        let mut builder = MachineBuilder::with_config(config);
        builder.path("a", "l", "b");
        builder.path("b", "l2", "a");
        builder.accept("a").unwrap();
        builder
    }

    #[test]
    fn checkpoint_captures_cursor() {
        let builder = cycle_builder(MachineConfig::default());
        let mut machine = builder.start("a").unwrap();
        machine.transition("l").unwrap();

        let checkpoint = machine.checkpoint();

        assert_eq!(checkpoint.version, CHECKPOINT_VERSION);
        assert_eq!(checkpoint.initial_state.as_str(), "a");
        assert_eq!(checkpoint.current_state.as_str(), "b");
        assert_eq!(checkpoint.run_state, RunState::Active);
        assert!(Uuid::parse_str(&checkpoint.id).is_ok());
    }

    #[test]
    fn binary_roundtrip_preserves_history() {
        let builder = cycle_builder(MachineConfig {
            record_history: true,
            history_limit: None,
        });
        let mut machine = builder.start("a").unwrap();
        machine.transition("l").unwrap();
        machine.transition("l2").unwrap();

        let checkpoint = machine.checkpoint();
        let bytes = checkpoint.to_binary().unwrap();
        let restored = Checkpoint::from_binary(&bytes).unwrap();

        assert_eq!(restored, checkpoint);
        assert_eq!(restored.history.labels(), vec!["l", "l2"]);
    }

    #[test]
    fn resumed_machine_keeps_recording() {
        let builder = cycle_builder(MachineConfig {
            record_history: true,
            history_limit: None,
        });
        let mut machine = builder.start("a").unwrap();
        machine.transition("l").unwrap();
        let checkpoint = machine.checkpoint();

        let mut resumed = builder.resume(&checkpoint).unwrap();
        resumed.transition("l2").unwrap();

        assert!(resumed.is_recording());
        assert_eq!(resumed.history().labels(), vec!["l", "l2"]);
        assert_eq!(resumed.initial_state().as_str(), "a");
        resumed.finish().unwrap();
    }

    #[test]
    fn resume_applies_the_builders_history_limit() {
        let plain = cycle_builder(MachineConfig::default());
        let checkpoint = plain.start("a").unwrap().checkpoint();

        let limited = cycle_builder(MachineConfig {
            record_history: true,
            history_limit: Some(2),
        });
        let mut resumed = limited.resume(&checkpoint).unwrap();
        for _ in 0..5 {
            resumed.transition("l").unwrap();
            resumed.transition("l2").unwrap();
        }

        assert_eq!(resumed.history().len(), 2);
        assert_eq!(resumed.history().labels(), vec!["l", "l2"]);
    }

    #[test]
    fn resume_trims_saved_history_to_the_limit() {
        let unbounded = cycle_builder(MachineConfig {
            record_history: true,
            history_limit: None,
        });
        let mut machine = unbounded.start("a").unwrap();
        for _ in 0..3 {
            machine.transition("l").unwrap();
            machine.transition("l2").unwrap();
        }
        let checkpoint = machine.checkpoint();
        assert_eq!(checkpoint.history.len(), 6);

        let limited = cycle_builder(MachineConfig {
            record_history: true,
            history_limit: Some(3),
        });
        let resumed = limited.resume(&checkpoint).unwrap();

        assert_eq!(resumed.history().labels(), vec!["l2", "l", "l2"]);
        assert_eq!(resumed.history().path()[0].as_str(), "b");
    }

    #[test]
    fn resume_does_not_run_callbacks() {
        let entered = Arc::new(AtomicUsize::new(0));
        let mut builder = cycle_builder(MachineConfig::default());
        let counter = Arc::clone(&entered);
        builder
            .when_entering("b", move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        let mut machine = builder.start("a").unwrap();
        machine.transition("l").unwrap();
        let checkpoint = machine.checkpoint();
        let _resumed = builder.resume(&checkpoint).unwrap();

        assert_eq!(entered.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn finished_checkpoint_resumes_unusable() {
        let builder = cycle_builder(MachineConfig::default());
        let mut machine = builder.start("a").unwrap();
        machine.finish().unwrap();

        let mut resumed = builder.resume(&machine.checkpoint()).unwrap();

        assert!(matches!(resumed.transition("l"), Err(MachineError::Unusable)));
    }

    #[test]
    fn resume_rejects_unknown_state() {
        let builder = cycle_builder(MachineConfig::default());
        let mut checkpoint = builder.start("a").unwrap().checkpoint();
        checkpoint.current_state = StateName::from("missing");

        let result = builder.resume(&checkpoint);

        assert!(matches!(
            result,
            Err(CheckpointError::UnknownState { ref state }) if state.as_str() == "missing"
        ));
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let builder = cycle_builder(MachineConfig::default());
        let mut checkpoint = builder.start("a").unwrap().checkpoint();
        checkpoint.version = CHECKPOINT_VERSION + 1;

        let json = checkpoint.to_json().unwrap();
        let result = Checkpoint::from_json(&json);

        assert!(matches!(
            result,
            Err(CheckpointError::UnsupportedVersion { found, supported })
                if found == CHECKPOINT_VERSION + 1 && supported == CHECKPOINT_VERSION
        ));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let result = Checkpoint::from_json("{ not json");

        assert!(matches!(result, Err(CheckpointError::DeserializationFailed(_))));
    }

    #[test]
    fn truncated_binary_is_rejected() {
        let builder = cycle_builder(MachineConfig::default());
        let bytes = builder.start("a").unwrap().checkpoint().to_binary().unwrap();

        let result = Checkpoint::from_binary(&bytes[..bytes.len() / 2]);

        assert!(matches!(result, Err(CheckpointError::DeserializationFailed(_))));
    }
}
