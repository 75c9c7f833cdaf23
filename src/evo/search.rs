use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::ancestors::AncestorIndex;
use super::expansion::ExpansionState;
use super::graph::EvolutionGraph;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchHit {
    /// Creature to scroll to and select.
    pub focus: String,
    /// Replacement expansion state: the match and all of its ancestors.
    pub expansion: ExpansionState,
}

/// Exact, case-insensitive lookup by display name. Duplicate names resolve
/// to the first creature in dataset order.
///
/// A hit carries a fresh expansion state that opens the whole ancestor chain
/// of the match. A miss returns `None` and leaves the caller's state alone.
pub fn resolve(graph: &EvolutionGraph, ancestors: &AncestorIndex, query: &str) -> Option<SearchHit> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let creature = graph.find_by_name(query)?;
    let expansion = reveal(ancestors, &creature.id);

    log::debug!(
        "search `{query}` matched `{}` ({} creatures expanded)",
        creature.id,
        expansion.len()
    );

    Some(SearchHit {
        focus: creature.id.clone(),
        expansion,
    })
}

/// Expansion state that opens `id` and every creature leading to it, with
/// nothing else expanded.
pub fn reveal(ancestors: &AncestorIndex, id: &str) -> ExpansionState {
    let mut expansion = ExpansionState::new();
    expansion.set_expanded(id, true);
    for ancestor in ancestors.ancestors_of(id) {
        expansion.set_expanded(&ancestor, true);
    }
    expansion
}

/// Display names that fuzzily match `query`, best first, for "did you mean"
/// hints after a miss.
pub fn suggestions(graph: &EvolutionGraph, query: &str, limit: usize) -> Vec<String> {
    let query = query.trim();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored = graph
        .iter()
        .filter_map(|creature| {
            matcher
                .fuzzy_match(&creature.name, query)
                .map(|score| (score, creature.name.as_str()))
        })
        .collect::<Vec<_>>();

    // Stable sort keeps dataset order among equal scores.
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let mut names: Vec<String> = Vec::new();
    for (_score, name) in scored {
        if names.len() >= limit {
            break;
        }
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_owned());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evo::graph::test_graph;

    fn chain() -> (EvolutionGraph, AncestorIndex) {
        let graph = test_graph(&[("a", &["b"]), ("b", &["c"]), ("c", &["d"]), ("d", &[]), ("e", &[])]);
        let index = AncestorIndex::build(&graph);
        (graph, index)
    }

    #[test]
    fn hit_expands_match_and_every_ancestor() {
        let (graph, index) = chain();

        let hit = resolve(&graph, &index, "d").expect("D is in the dataset");

        assert_eq!(hit.focus, "d");
        for id in ["a", "b", "c", "d"] {
            assert!(hit.expansion.is_expanded(id), "{id} should be expanded");
        }
        assert!(!hit.expansion.is_expanded("e"));
        assert_eq!(hit.expansion.len(), 4);
    }

    #[test]
    fn hit_replaces_previous_flags() {
        let (graph, index) = chain();
        let mut state = ["e"].into_iter().collect::<ExpansionState>();

        if let Some(hit) = resolve(&graph, &index, "  B ") {
            state = hit.expansion;
        }

        assert!(!state.is_expanded("e"));
        assert!(state.is_expanded("a"));
        assert!(state.is_expanded("b"));
        assert!(!state.is_expanded("c"));
    }

    #[test]
    fn miss_leaves_state_untouched() {
        let (graph, index) = chain();
        let state = ["e", "b"].into_iter().collect::<ExpansionState>();
        let before = state.clone();

        assert!(resolve(&graph, &index, "nothing").is_none());
        assert!(resolve(&graph, &index, "   ").is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn matches_name_not_id() {
        let (graph, index) = chain();
        // test_graph names creatures with the upper-cased id
        assert!(resolve(&graph, &index, "A").is_some());

        let renamed = crate::evo::graph::EvolutionGraph::build([(
            "agumon".to_owned(),
            crate::evo::graph::CreatureData {
                name: "Agumon X".to_owned(),
                stage: crate::evo::graph::Stage::Rookie,
                evolves_to: Vec::new(),
                methods: Vec::new(),
                icon: None,
            },
        )]);
        let index = AncestorIndex::build(&renamed);
        assert!(resolve(&renamed, &index, "agumon").is_none());
        assert_eq!(
            resolve(&renamed, &index, "agumon x").map(|hit| hit.focus),
            Some("agumon".to_owned())
        );
    }

    #[test]
    fn suggestions_rank_fuzzy_names() {
        let graph = test_graph(&[("agumon", &[]), ("gabumon", &[]), ("patamon", &[])]);

        let names = suggestions(&graph, "agmon", 2);
        assert_eq!(names.first().map(String::as_str), Some("AGUMON"));
        assert!(names.len() <= 2);
        assert!(suggestions(&graph, "", 5).is_empty());
        assert!(suggestions(&graph, "zzz", 5).is_empty());
    }
}
