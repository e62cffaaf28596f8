//! Serializable snapshot of a transition graph.

use super::state::StateName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One state as seen from the outside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDescription {
    pub name: StateName,
    pub accepting: bool,
    /// Number of registered entry callbacks.
    pub callbacks: usize,
    /// Outgoing transitions keyed by label.
    pub transitions: BTreeMap<String, StateName>,
}

/// Snapshot of every state, ordered by name.
///
/// Callbacks cannot be serialized, so only their count is kept.
///
/// # Example
///
/// ```rust
/// use lexdfa::MachineBuilder;
///
/// let mut builder = MachineBuilder::new();
/// builder.path("one", "via", "two");
/// builder.accept("two").unwrap();
///
/// let description = builder.describe();
/// assert_eq!(description.states.len(), 2);
/// assert_eq!(description.transition_count(), 1);
/// assert!(description.to_dot().contains("\"one\" -> \"two\" [label = \"via\"];"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDescription {
    pub states: Vec<StateDescription>,
}

impl GraphDescription {
    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|s| s.transitions.len()).sum()
    }

    pub fn accepting_states(&self) -> impl Iterator<Item = &StateName> + '_ {
        self.states.iter().filter(|s| s.accepting).map(|s| &s.name)
    }

    /// Renders the graph in the graphviz [dot](https://graphviz.org/docs/layouts/dot/)
    /// language. Accepting states are drawn as double circles.
    pub fn to_dot(&self) -> String {
        format!(
            "digraph dfa {{\n\
                \trankdir=LR;\n\
            \n\
                {}\
            \n\
                {}\
            }}\n",
            self.node_lines_dot()
                .map(|l| format!("\t{}\n", l))
                .collect::<String>(),
            self.transition_lines_dot()
                .map(|l| format!("\t{}\n", l))
                .collect::<String>(),
        )
    }

    fn node_lines_dot(&self) -> impl Iterator<Item = String> + '_ {
        self.states.iter().map(|state| {
            let shape = if state.accepting {
                "doublecircle"
            } else {
                "circle"
            };
            format!("{} [shape={}];", quote(state.name.as_str()), shape)
        })
    }

    fn transition_lines_dot(&self) -> impl Iterator<Item = String> + '_ {
        self.states.iter().flat_map(|state| {
            state.transitions.iter().map(move |(label, to)| {
                format!(
                    "{} -> {} [label = {}];",
                    quote(state.name.as_str()),
                    quote(to.as_str()),
                    quote(label)
                )
            })
        })
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}
