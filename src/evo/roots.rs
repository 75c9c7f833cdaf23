use std::collections::HashSet;

use super::graph::EvolutionGraph;

/// Creatures that no other creature evolves into, in dataset key order.
///
/// The order is the left-to-right order of the independent trees on screen.
/// Isolated creatures are roots too and render as single-card trees.
pub fn roots(graph: &EvolutionGraph) -> Vec<String> {
    let has_parent = graph
        .iter()
        .flat_map(|creature| creature.evolves_to.iter().map(String::as_str))
        .collect::<HashSet<_>>();

    graph
        .ids()
        .filter(|id| !has_parent.contains(id))
        .map(str::to_owned)
        .collect()
}
