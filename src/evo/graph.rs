use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::util::fold_name;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Baby,
    InTraining,
    Rookie,
    Champion,
    Ultimate,
    Mega,
    Custom(String),
}

impl Stage {
    pub fn parse(value: &str) -> Self {
        let key = value
            .chars()
            .filter(|ch| !matches!(ch, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        match key.as_str() {
            "baby" => Self::Baby,
            "intraining" => Self::InTraining,
            "rookie" => Self::Rookie,
            "champion" => Self::Champion,
            "ultimate" => Self::Ultimate,
            "mega" => Self::Mega,
            _ => Self::Custom(value.trim().to_owned()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Baby => "Baby",
            Self::InTraining => "In-Training",
            Self::Rookie => "Rookie",
            Self::Champion => "Champion",
            Self::Ultimate => "Ultimate",
            Self::Mega => "Mega",
            Self::Custom(label) => label,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Record for one creature as handed to [`EvolutionGraph::build`].
#[derive(Clone, Debug)]
pub struct CreatureData {
    pub name: String,
    pub stage: Stage,
    pub evolves_to: Vec<String>,
    pub methods: Vec<String>,
    pub icon: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Creature {
    pub id: String,
    pub name: String,
    pub stage: Stage,
    pub evolves_to: Vec<String>,
    pub methods: Vec<String>,
    pub icon: Option<String>,
}

impl Creature {
    pub fn has_evolutions(&self) -> bool {
        !self.evolves_to.is_empty()
    }
}

/// Immutable evolution graph. Creatures live in an id-indexed arena that
/// keeps dataset key order; edges are the `evolves_to` lists.
///
/// Edges pointing at unknown ids are kept as-is. They are reported during
/// traversal, not rejected here.
#[derive(Clone, Debug, Default)]
pub struct EvolutionGraph {
    creatures: Vec<Creature>,
    index_by_id: HashMap<String, usize>,
    edge_count: usize,
}

impl EvolutionGraph {
    pub fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, CreatureData)>,
    {
        let mut creatures: Vec<Creature> = Vec::new();
        let mut index_by_id = HashMap::new();

        for (id, data) in entries {
            let creature = Creature {
                id: id.clone(),
                name: data.name,
                stage: data.stage,
                evolves_to: data.evolves_to,
                methods: data.methods,
                icon: data.icon,
            };

            // A repeated id replaces the earlier record but keeps its slot.
            if let Some(&index) = index_by_id.get(&id) {
                creatures[index] = creature;
            } else {
                index_by_id.insert(id, creatures.len());
                creatures.push(creature);
            }
        }

        let edge_count = creatures
            .iter()
            .map(|creature| creature.evolves_to.len())
            .sum();

        Self {
            creatures,
            index_by_id,
            edge_count,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Creature> {
        self.index_by_id
            .get(id)
            .and_then(|&index| self.creatures.get(index))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_by_id.contains_key(id)
    }

    pub fn all_ids(&self) -> HashSet<&str> {
        self.index_by_id.keys().map(String::as_str).collect()
    }

    /// Ids in dataset key order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.creatures.iter().map(|creature| creature.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.iter()
    }

    pub fn children_of(&self, id: &str) -> &[String] {
        self.get(id)
            .map(|creature| creature.evolves_to.as_slice())
            .unwrap_or(&[])
    }

    /// First creature, in key order, whose display name equals `name`
    /// ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&Creature> {
        let wanted = fold_name(name);
        self.creatures
            .iter()
            .find(|creature| fold_name(&creature.name) == wanted)
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

#[cfg(test)]
pub(crate) fn test_graph(edges: &[(&str, &[&str])]) -> EvolutionGraph {
    EvolutionGraph::build(edges.iter().map(|(id, children)| {
        (
            (*id).to_owned(),
            CreatureData {
                name: id.to_uppercase(),
                stage: Stage::Rookie,
                evolves_to: children.iter().map(|child| (*child).to_owned()).collect(),
                methods: Vec::new(),
                icon: None,
            },
        )
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_of_unknown_or_leaf_is_empty() {
        let graph = test_graph(&[("a", &["b"]), ("b", &[])]);

        assert_eq!(graph.children_of("a"), ["b".to_owned()]);
        assert!(graph.children_of("b").is_empty());
        assert!(graph.children_of("ghost").is_empty());
        assert!(graph.get("ghost").is_none());
    }

    #[test]
    fn ids_keep_insertion_order() {
        let graph = test_graph(&[("zeta", &[]), ("alpha", &[]), ("mid", &[])]);

        assert_eq!(graph.ids().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(graph.all_ids().len(), 3);
    }

    #[test]
    fn repeated_id_replaces_record_in_place() {
        let graph = test_graph(&[("a", &["x"]), ("b", &[]), ("a", &["b"])]);

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.ids().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(graph.children_of("a"), ["b".to_owned()]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn find_by_name_is_case_insensitive_and_first_wins() {
        let record = |name: &str| CreatureData {
            name: name.to_owned(),
            stage: Stage::Rookie,
            evolves_to: Vec::new(),
            methods: Vec::new(),
            icon: None,
        };
        let graph = EvolutionGraph::build([
            ("one".to_owned(), record("Agumon")),
            ("two".to_owned(), record("agumon")),
        ]);

        let found = graph.find_by_name("aGuMoN").map(|creature| creature.id.as_str());
        assert_eq!(found, Some("one"));
        assert!(graph.find_by_name("one").is_none());
    }

    #[test]
    fn stage_parsing_ignores_case_and_separators() {
        assert_eq!(Stage::parse("In-Training"), Stage::InTraining);
        assert_eq!(Stage::parse("in training"), Stage::InTraining);
        assert_eq!(Stage::parse("ROOKIE"), Stage::Rookie);
        assert_eq!(Stage::parse(" Armor "), Stage::Custom("Armor".to_owned()));
        assert!(Stage::Baby < Stage::Mega);
        assert_eq!(Stage::InTraining.to_string(), "In-Training");
    }
}
