use std::collections::{HashMap, HashSet, VecDeque};

use super::graph::EvolutionGraph;

/// Reverse edges: creature id to the creatures that evolve into it.
#[derive(Clone, Debug, Default)]
pub struct AncestorIndex {
    parents: HashMap<String, Vec<String>>,
}

impl AncestorIndex {
    pub fn build(graph: &EvolutionGraph) -> Self {
        let mut parents: HashMap<String, Vec<String>> = HashMap::new();

        for creature in graph.iter() {
            for child in &creature.evolves_to {
                let entry = parents.entry(child.clone()).or_default();
                if !entry.contains(&creature.id) {
                    entry.push(creature.id.clone());
                }
            }
        }

        Self { parents }
    }

    /// Direct predecessors in dataset key order.
    pub fn parents_of(&self, id: &str) -> &[String] {
        self.parents.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every transitive predecessor of `id`, nearest first. `id` itself is
    /// only included when it sits on a cycle.
    pub fn ancestors_of(&self, id: &str) -> Vec<String> {
        let mut ancestors = Vec::new();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([id]);

        while let Some(current) = queue.pop_front() {
            for parent in self.parents_of(current) {
                if seen.insert(parent.as_str()) {
                    ancestors.push(parent.clone());
                    queue.push_back(parent.as_str());
                }
            }
        }

        ancestors
    }
}
