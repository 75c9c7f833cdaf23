use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::graph::EvolutionGraph;
use super::parse::parse_dataset;

const BUILTIN_DATASET: &str = include_str!("../../data/digimon.json");

/// Reads the dataset at `path`, or the bundled one when `path` is `None`.
pub fn load_graph(path: Option<&Path>) -> Result<EvolutionGraph> {
    let entries = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read dataset {}", path.display()))?;
            parse_dataset(&raw)
                .with_context(|| format!("failed to parse dataset {}", path.display()))?
        }
        None => parse_dataset(BUILTIN_DATASET).context("bundled dataset is invalid")?,
    };

    let graph = EvolutionGraph::build(entries);
    log::info!(
        "loaded {} creatures with {} evolution edges from {}",
        graph.len(),
        graph.edge_count(),
        path.map(|path| path.display().to_string())
            .unwrap_or_else(|| "bundled dataset".to_owned())
    );
    Ok(graph)
}
