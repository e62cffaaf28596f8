//! State registry and transition lookup.

use super::description::{GraphDescription, StateDescription};
use super::state::{EntryCallback, StateName, StateRecord};
use std::collections::BTreeMap;

/// Compiled transition graph.
///
/// Ordered by state name so that descriptions and dot output are stable
/// between runs.
#[derive(Default)]
pub(crate) struct Graph {
    states: BTreeMap<StateName, StateRecord>,
}

impl Graph {
    /// Register `from --label--> to`, creating either endpoint on first sight.
    ///
    /// Returns the previous target when the pair was already declared.
    pub(crate) fn insert_path(
        &mut self,
        from: StateName,
        label: String,
        to: StateName,
    ) -> Option<StateName> {
        self.states.entry(to.clone()).or_default();
        self.states
            .entry(from)
            .or_default()
            .transitions
            .insert(label, to)
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    pub(crate) fn len(&self) -> usize {
        self.states.len()
    }

    pub(crate) fn state(&self, name: &str) -> Option<&StateRecord> {
        self.states.get(name)
    }

    pub(crate) fn state_mut(&mut self, name: &str) -> Option<&mut StateRecord> {
        self.states.get_mut(name)
    }

    /// The graph-owned key for `name`, so machines can hold it by reference.
    pub(crate) fn resolve(&self, name: &str) -> Option<&StateName> {
        self.states.get_key_value(name).map(|(key, _)| key)
    }

    pub(crate) fn target(&self, from: &str, label: &str) -> Option<&StateName> {
        self.state(from).and_then(|record| record.target(label))
    }

    pub(crate) fn callbacks(&self, name: &str) -> &[EntryCallback] {
        self.state(name)
            .map(|record| record.callbacks.as_slice())
            .unwrap_or_default()
    }

    pub(crate) fn is_accepting(&self, name: &str) -> bool {
        self.state(name).is_some_and(|record| record.accepting)
    }

    pub(crate) fn describe(&self) -> GraphDescription {
        let states = self
            .states
            .iter()
            .map(|(name, record)| StateDescription {
                name: name.clone(),
                accepting: record.accepting,
                callbacks: record.callbacks.len(),
                transitions: record.transitions.clone(),
            })
            .collect();

        GraphDescription { states }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn graph_with(paths: &[(&str, &str, &str)]) -> Graph {
        let mut graph = Graph::default();
        for (from, label, to) in paths {
            graph.insert_path((*from).into(), (*label).to_string(), (*to).into());
        }
        graph
    }

    #[test]
    fn insert_path_creates_both_endpoints() {
        let graph = graph_with(&[("from", "via", "to")]);

        assert!(graph.contains("from"));
        assert!(graph.contains("to"));
        assert!(!graph.contains("elsewhere"));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn insert_path_reports_overwritten_target() {
        let mut graph = graph_with(&[("one", "via", "two")]);

        let previous = graph.insert_path("one".into(), "via".to_string(), "three".into());

        assert_eq!(previous, Some(StateName::from("two")));
        assert_eq!(graph.target("one", "via"), Some(&StateName::from("three")));
        // The abandoned target stays registered.
        assert!(graph.contains("two"));
    }

    #[test]
    fn target_is_scoped_to_the_source_state() {
        let graph = graph_with(&[("one", "via", "two"), ("two", "back", "one")]);

        assert_eq!(graph.target("one", "via"), Some(&StateName::from("two")));
        assert!(graph.target("two", "via").is_none());
        assert!(graph.target("missing", "via").is_none());
    }

    #[test]
    fn resolve_returns_the_stored_key() {
        let graph = graph_with(&[("origin", "moveme", "origin")]);

        assert_eq!(graph.resolve("origin").map(StateName::as_str), Some("origin"));
        assert!(graph.resolve("nowhere").is_none());
    }

    #[test]
    fn callbacks_of_unknown_state_are_empty() {
        let mut graph = graph_with(&[("a", "x", "b")]);
        let callback: EntryCallback = Arc::new(|| Ok(()));
        graph.state_mut("b").unwrap().callbacks.push(callback);

        assert_eq!(graph.callbacks("b").len(), 1);
        assert!(graph.callbacks("a").is_empty());
        assert!(graph.callbacks("zzz").is_empty());
    }

    #[test]
    fn describe_is_ordered_by_name() {
        let mut graph = graph_with(&[("zeta", "go", "alpha"), ("alpha", "back", "zeta")]);
        graph.state_mut("alpha").unwrap().accepting = true;

        let description = graph.describe();
        let names: Vec<_> = description.states.iter().map(|s| s.name.as_str()).collect();

        assert_eq!(names, vec!["alpha", "zeta"]);
        assert!(description.states[0].accepting);
        assert!(!description.states[1].accepting);
    }
}
