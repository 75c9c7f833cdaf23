use std::collections::HashSet;

use super::graph::EvolutionGraph;

/// Which creatures currently show their evolutions. Everything is collapsed
/// by default. Session-local, never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Flips the flag for `id` and returns the new value.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_owned());
            true
        }
    }

    pub fn set_expanded(&mut self, id: &str, expanded: bool) {
        if expanded {
            self.expanded.insert(id.to_owned());
        } else {
            self.expanded.remove(id);
        }
    }

    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    pub fn expand_all(&mut self, graph: &EvolutionGraph) {
        self.expanded.extend(
            graph
                .iter()
                .filter(|creature| creature.has_evolutions())
                .map(|creature| creature.id.clone()),
        );
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExpansionState {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            expanded: iter.into_iter().map(Into::into).collect(),
        }
    }
}
