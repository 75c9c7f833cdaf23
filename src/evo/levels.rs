use std::collections::{HashMap, HashSet};

use super::expansion::ExpansionState;
use super::graph::EvolutionGraph;

/// An `evolves_to` entry that names a creature the dataset does not define.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingNode {
    /// `None` when the missing id was passed in as a root.
    pub parent: Option<String>,
    pub missing: String,
}

/// Position of one card: level and index within that level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Slot {
    pub depth: usize,
    pub index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
    pub parent: Slot,
    pub child: Slot,
}

/// Creatures grouped by depth, each level in first-discovery order.
///
/// Rebuilt from scratch on every recomputation; it has no identity across
/// calls to [`compute_levels`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelAssignment {
    levels: Vec<Vec<String>>,
    anchors: HashMap<String, usize>,
    missing: Vec<MissingNode>,
}

impl LevelAssignment {
    pub fn levels(&self) -> &[Vec<String>] {
        &self.levels
    }

    pub fn into_levels(self) -> Vec<Vec<String>> {
        self.levels
    }

    pub fn depth_count(&self) -> usize {
        self.levels.len()
    }

    /// Number of cards, counting a creature once per level it appears on.
    pub fn card_count(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.anchors.contains_key(id)
    }

    pub fn position(&self, depth: usize, id: &str) -> Option<usize> {
        self.levels
            .get(depth)?
            .iter()
            .position(|existing| existing == id)
    }

    /// Depth of the first visit, the only place where `id` can show children.
    pub fn anchor_depth(&self, id: &str) -> Option<usize> {
        self.anchors.get(id).copied()
    }

    /// Slot of the card that owns `id`'s children, used for focusing.
    pub fn anchor_slot(&self, id: &str) -> Option<Slot> {
        let depth = self.anchor_depth(id)?;
        let index = self.position(depth, id)?;
        Some(Slot { depth, index })
    }

    pub fn missing(&self) -> &[MissingNode] {
        &self.missing
    }

    /// Connections to draw: from each expanded creature at its anchor depth
    /// to every known child on the next level.
    pub fn links(&self, graph: &EvolutionGraph, expansion: &ExpansionState) -> Vec<Link> {
        let mut links = Vec::new();

        for (depth, level) in self.levels.iter().enumerate() {
            for (index, id) in level.iter().enumerate() {
                if self.anchor_depth(id) != Some(depth) || !expansion.is_expanded(id) {
                    continue;
                }

                let parent = Slot { depth, index };
                let mut linked = HashSet::new();
                for child in graph.children_of(id) {
                    let Some(child_index) = self.position(depth + 1, child) else {
                        continue;
                    };
                    if linked.insert(child_index) {
                        links.push(Link {
                            parent,
                            child: Slot {
                                depth: depth + 1,
                                index: child_index,
                            },
                        });
                    }
                }
            }
        }

        links
    }
}

/// Depth-first, expansion-gated assignment of creatures to levels.
///
/// Roots are walked in the given order. A creature reached again from
/// another branch still gets a card on that level, but its children are
/// only explored under the first visit. Edges back into the current path
/// are dropped so cycles keep their first depth. Unknown ids are reported in
/// [`LevelAssignment::missing`] and skipped.
pub fn compute_levels<'a>(
    graph: &'a EvolutionGraph,
    roots: &'a [String],
    expansion: &'a ExpansionState,
) -> LevelAssignment {
    let mut walk = Walk {
        graph,
        expansion,
        levels: Vec::new(),
        visited: HashSet::new(),
        on_path: HashSet::new(),
        anchors: HashMap::new(),
        missing: Vec::new(),
    };

    for root in roots {
        walk.visit(root, 0, None);
    }

    log::debug!(
        "computed {} levels with {} cards ({} missing references)",
        walk.levels.len(),
        walk.levels.iter().map(Vec::len).sum::<usize>(),
        walk.missing.len()
    );

    LevelAssignment {
        levels: walk.levels,
        anchors: walk.anchors,
        missing: walk.missing,
    }
}

struct Walk<'a> {
    graph: &'a EvolutionGraph,
    expansion: &'a ExpansionState,
    levels: Vec<Vec<String>>,
    visited: HashSet<&'a str>,
    on_path: HashSet<&'a str>,
    anchors: HashMap<String, usize>,
    missing: Vec<MissingNode>,
}

impl<'a> Walk<'a> {
    fn visit(&mut self, id: &'a str, depth: usize, parent: Option<&'a str>) {
        let graph = self.graph;
        let Some(creature) = graph.get(id) else {
            log::warn!(
                "creature `{id}` referenced by `{}` is missing from the dataset",
                parent.unwrap_or("<roots>")
            );
            self.missing.push(MissingNode {
                parent: parent.map(str::to_owned),
                missing: id.to_owned(),
            });
            return;
        };

        if self.on_path.contains(id) {
            return;
        }

        if self.levels.len() <= depth {
            self.levels.resize_with(depth + 1, Vec::new);
        }
        let level = &mut self.levels[depth];
        if !level.iter().any(|existing| existing == id) {
            level.push(id.to_owned());
        }

        if !self.visited.insert(id) {
            return;
        }
        self.anchors.insert(id.to_owned(), depth);

        if !self.expansion.is_expanded(id) {
            return;
        }

        self.on_path.insert(id);
        for child in &creature.evolves_to {
            self.visit(child, depth + 1, Some(id));
        }
        self.on_path.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evo::graph::test_graph;
    use crate::evo::roots::roots;

    fn levels_of(
        edges: &[(&str, &[&str])],
        expanded: &[&str],
    ) -> (EvolutionGraph, LevelAssignment) {
        let graph = test_graph(edges);
        let roots = roots(&graph);
        let expansion = expanded.iter().copied().collect::<ExpansionState>();
        let assignment = compute_levels(&graph, &roots, &expansion);
        (graph, assignment)
    }

    const BRANCHING: &[(&str, &[&str])] = &[("a", &["b"]), ("b", &["c", "d"]), ("c", &[]), ("d", &[])];

    #[test]
    fn expanded_chain_fills_levels_in_order() {
        let (_, assignment) = levels_of(BRANCHING, &["a", "b"]);

        assert_eq!(assignment.levels(), [vec!["a"], vec!["b"], vec!["c", "d"]]);
        assert!(assignment.missing().is_empty());
    }

    #[test]
    fn collapsed_root_shows_only_itself() {
        let (_, assignment) = levels_of(BRANCHING, &[]);
        assert_eq!(assignment.into_levels(), vec![vec!["a"]]);
    }

    #[test]
    fn collapsed_middle_cuts_the_branch() {
        let (_, assignment) = levels_of(BRANCHING, &["a"]);
        assert_eq!(assignment.levels(), [vec!["a"], vec!["b"]]);
    }

    #[test]
    fn missing_reference_is_reported_and_skipped() {
        let (_, assignment) = levels_of(&[("a", &["ghost"])], &["a"]);

        assert_eq!(assignment.levels(), [vec!["a"]]);
        assert_eq!(
            assignment.missing(),
            [MissingNode {
                parent: Some("a".to_owned()),
                missing: "ghost".to_owned(),
            }]
        );
    }

    #[test]
    fn missing_sibling_does_not_hide_known_ones() {
        let (_, assignment) = levels_of(&[("a", &["ghost", "b"]), ("b", &[])], &["a"]);

        assert_eq!(assignment.levels(), [vec!["a"], vec!["b"]]);
        assert_eq!(assignment.missing().len(), 1);
    }

    #[test]
    fn missing_root_is_reported() {
        let graph = test_graph(&[("a", &[])]);
        let roots = vec!["ghost".to_owned(), "a".to_owned()];
        let assignment = compute_levels(&graph, &roots, &ExpansionState::new());

        assert_eq!(assignment.levels(), [vec!["a"]]);
        assert_eq!(assignment.missing()[0].parent, None);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let graph = test_graph(&[
            ("r1", &["m", "c"]),
            ("m", &["c"]),
            ("r2", &["c"]),
            ("c", &["x"]),
            ("x", &[]),
        ]);
        let roots = roots(&graph);
        let expansion = ["r1", "m", "r2", "c"].into_iter().collect::<ExpansionState>();

        let first = compute_levels(&graph, &roots, &expansion);
        let second = compute_levels(&graph, &roots, &expansion);
        assert_eq!(first, second);
    }

    #[test]
    fn cycle_terminates_and_keeps_first_depth() {
        let graph = test_graph(&[("a", &["b"]), ("b", &["a"])]);
        let roots = vec!["a".to_owned()];
        let expansion = ["a", "b"].into_iter().collect::<ExpansionState>();

        let assignment = compute_levels(&graph, &roots, &expansion);

        assert_eq!(assignment.levels(), [vec!["a"], vec!["b"]]);
        assert_eq!(assignment.anchor_depth("a"), Some(0));
        assert_eq!(assignment.anchor_depth("b"), Some(1));
    }

    #[test]
    fn cycle_below_a_root_terminates() {
        let (_, assignment) = levels_of(&[("r", &["a"]), ("a", &["b"]), ("b", &["a"])], &["r", "a", "b"]);

        assert_eq!(assignment.levels(), [vec!["r"], vec!["a"], vec!["b"]]);
        assert_eq!(assignment.card_count(), 3);
    }

    #[test]
    fn self_loop_terminates() {
        let graph = test_graph(&[("a", &["a", "b"]), ("b", &[])]);
        let roots = vec!["a".to_owned()];
        let expansion = ["a"].into_iter().collect::<ExpansionState>();

        let assignment = compute_levels(&graph, &roots, &expansion);
        assert_eq!(assignment.levels(), [vec!["a"], vec!["b"]]);
    }

    #[test]
    fn shared_child_at_equal_depth_is_explored_once() {
        let (graph, assignment) = levels_of(
            &[("r1", &["c"]), ("r2", &["c"]), ("c", &["x"]), ("x", &[])],
            &["r1", "r2", "c"],
        );

        assert_eq!(assignment.levels(), [vec!["r1", "r2"], vec!["c"], vec!["x"]]);
        assert_eq!(assignment.anchor_depth("c"), Some(1));

        let expansion = ["r1", "r2", "c"].into_iter().collect::<ExpansionState>();
        let links = assignment.links(&graph, &expansion);
        let slot = |depth, index| Slot { depth, index };
        assert_eq!(
            links,
            vec![
                Link { parent: slot(0, 0), child: slot(1, 0) },
                Link { parent: slot(0, 1), child: slot(1, 0) },
                Link { parent: slot(1, 0), child: slot(2, 0) },
            ]
        );
    }

    #[test]
    fn shared_child_at_different_depth_keeps_children_under_first_branch() {
        let (_, assignment) = levels_of(
            &[("r1", &["m"]), ("m", &["c"]), ("r2", &["c"]), ("c", &["x"]), ("x", &[])],
            &["r1", "m", "r2", "c"],
        );

        // c is shown under r2 as well, but x only hangs off the first visit.
        assert_eq!(
            assignment.levels(),
            [vec!["r1", "r2"], vec!["m", "c"], vec!["c"], vec!["x"]]
        );
        assert_eq!(assignment.anchor_depth("c"), Some(2));
        assert_eq!(assignment.position(1, "c"), Some(1));
    }

    #[test]
    fn root_order_decides_which_branch_owns_shared_children() {
        let (_, assignment) = levels_of(
            &[("r2", &["c"]), ("r1", &["m"]), ("m", &["c"]), ("c", &["x"]), ("x", &[])],
            &["r1", "m", "r2", "c"],
        );

        assert_eq!(
            assignment.levels(),
            [vec!["r2", "r1"], vec!["c", "m"], vec!["x", "c"]]
        );
        assert_eq!(assignment.anchor_depth("c"), Some(1));
    }

    #[test]
    fn expanding_more_only_adds_cards() {
        let edges: &[(&str, &[&str])] = &[
            ("a", &["b", "e"]),
            ("b", &["c", "d"]),
            ("c", &[]),
            ("d", &[]),
            ("e", &["f"]),
            ("f", &[]),
        ];
        let configurations: [&[&str]; 4] = [&[], &["a"], &["a", "b"], &["a", "b", "e"]];

        let mut previous: Option<LevelAssignment> = None;
        for expanded in configurations {
            let (_, current) = levels_of(edges, expanded);
            if let Some(previous) = &previous {
                for (depth, level) in previous.levels().iter().enumerate() {
                    for id in level {
                        assert!(current.position(depth, id).is_some(), "{id} vanished");
                    }
                }
                assert!(current.card_count() > previous.card_count());
            }
            previous = Some(current);
        }
    }

    #[test]
    fn links_skip_collapsed_parents_and_missing_children() {
        let (graph, assignment) = levels_of(
            &[("a", &["b", "ghost"]), ("b", &["c"]), ("c", &[])],
            &["a"],
        );

        let expansion = ["a"].into_iter().collect::<ExpansionState>();
        let links = assignment.links(&graph, &expansion);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].child, Slot { depth: 1, index: 0 });
        assert_eq!(assignment.anchor_slot("b"), Some(Slot { depth: 1, index: 0 }));
        assert!(!assignment.contains("c"));
    }
}
