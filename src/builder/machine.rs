//! Builder that declares the transition graph and starts machines from it.

use crate::builder::error::BuildError;
use crate::config::MachineConfig;
use crate::core::graph::Graph;
use crate::core::{CallbackError, EntryCallback, GraphDescription, StateName};
use crate::machine::Machine;
use std::sync::Arc;

/// Mutable configuration surface for a DFA.
///
/// States come into existence the first time they appear in [`path`].
/// [`when_entering`], [`accept`] and [`start`] only accept names that already
/// exist, so a typo in a hand-written grammar fails at configuration time.
///
/// [`start`] borrows the builder, so the graph cannot change while any
/// machine started from it is alive.
///
/// [`path`]: MachineBuilder::path
/// [`when_entering`]: MachineBuilder::when_entering
/// [`accept`]: MachineBuilder::accept
/// [`start`]: MachineBuilder::start
///
/// # Example
///
/// ```rust
/// use lexdfa::MachineBuilder;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let entered = Arc::new(AtomicUsize::new(0));
///
/// let mut builder = MachineBuilder::new();
/// builder.path("one", "via", "two");
/// let counter = Arc::clone(&entered);
/// builder
///     .when_entering("two", move || {
///         counter.fetch_add(1, Ordering::SeqCst);
///     })
///     .unwrap();
/// builder.accept("two").unwrap();
///
/// let mut machine = builder.start("one").unwrap();
/// machine.transition("via").unwrap();
/// machine.finish().unwrap();
///
/// assert_eq!(entered.load(Ordering::SeqCst), 1);
/// ```
#[derive(Default)]
pub struct MachineBuilder {
    graph: Graph,
    config: MachineConfig,
}

impl MachineBuilder {
    /// Create an empty builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder whose machines use `config`.
    pub fn with_config(config: MachineConfig) -> Self {
        Self {
            graph: Graph::default(),
            config,
        }
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Declare `from --label--> to`, creating both states if needed.
    ///
    /// Declaring the same `from`/`label` pair again replaces its target.
    pub fn path(
        &mut self,
        from: impl Into<StateName>,
        label: impl Into<String>,
        to: impl Into<StateName>,
    ) -> &mut Self {
        let from = from.into();
        let label = label.into();
        let to = to.into();

        if let Some(previous) = self
            .graph
            .insert_path(from.clone(), label.clone(), to.clone())
        {
            if previous != to {
                tracing::debug!(
                    "Path '{}' --{}--> '{}' replaced previous target '{}'",
                    from,
                    label,
                    to,
                    previous
                );
            }
        }

        self
    }

    /// Run `callback` every time `state` is entered through a transition.
    ///
    /// Callbacks on the same state run in registration order.
    pub fn when_entering<F>(&mut self, state: &str, callback: F) -> Result<&mut Self, BuildError>
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.push_callback(
            state,
            Arc::new(move || -> Result<(), CallbackError> {
                callback();
                Ok(())
            }),
        )
    }

    /// Like [`when_entering`](Self::when_entering), for callbacks that can
    /// fail. A failure aborts the transition call that triggered it.
    pub fn try_when_entering<F, E>(
        &mut self,
        state: &str,
        callback: F,
    ) -> Result<&mut Self, BuildError>
    where
        F: Fn() -> Result<(), E> + Send + Sync + 'static,
        E: Into<CallbackError>,
    {
        self.push_callback(
            state,
            Arc::new(move || -> Result<(), CallbackError> { callback().map_err(Into::into) }),
        )
    }

    fn push_callback(
        &mut self,
        state: &str,
        callback: EntryCallback,
    ) -> Result<&mut Self, BuildError> {
        let record = self
            .graph
            .state_mut(state)
            .ok_or_else(|| unknown(state))?;
        record.callbacks.push(callback);
        Ok(self)
    }

    /// Mark `state` as accepting.
    pub fn accept(&mut self, state: &str) -> Result<&mut Self, BuildError> {
        let record = self
            .graph
            .state_mut(state)
            .ok_or_else(|| unknown(state))?;
        record.accepting = true;
        Ok(self)
    }

    /// Start a new machine positioned at `state`.
    ///
    /// The start state's entry callbacks are not run.
    pub fn start(&self, state: &str) -> Result<Machine<'_>, BuildError> {
        let initial = self.graph.resolve(state).ok_or_else(|| unknown(state))?;
        tracing::debug!("Starting machine at state '{}'", initial);
        Ok(Machine::new(&self.graph, initial, &self.config))
    }

    pub fn contains_state(&self, state: &str) -> bool {
        self.graph.contains(state)
    }

    pub fn is_accepting(&self, state: &str) -> bool {
        self.graph.is_accepting(state)
    }

    pub fn state_count(&self) -> usize {
        self.graph.len()
    }

    /// Serializable snapshot of the declared graph.
    pub fn describe(&self) -> GraphDescription {
        self.graph.describe()
    }

    pub(crate) fn graph(&self) -> &Graph {
        &self.graph
    }
}

fn unknown(state: &str) -> BuildError {
    BuildError::UnknownState {
        state: StateName::from(state),
    }
}
