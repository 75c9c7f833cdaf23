use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

use super::graph::{CreatureData, Stage};

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawCreature {
    pub(super) name: String,
    pub(super) stage: String,
    #[serde(rename = "evolvesTo")]
    pub(super) evolves_to: Vec<String>,
    #[serde(default)]
    pub(super) method: Option<RawMethod>,
    #[serde(default)]
    pub(super) icon: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RawMethod {
    One(String),
    Many(Vec<String>),
}

impl RawMethod {
    fn into_descriptors(self) -> Vec<String> {
        let values = match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        };

        values
            .into_iter()
            .map(|value| value.trim().to_owned())
            .filter(|value| !is_placeholder(value))
            .collect()
    }
}

fn is_placeholder(value: &str) -> bool {
    matches!(value, "" | "-" | "—" | "–")
}

impl From<RawCreature> for CreatureData {
    fn from(raw: RawCreature) -> Self {
        Self {
            name: raw.name,
            stage: Stage::parse(&raw.stage),
            evolves_to: raw.evolves_to,
            methods: raw.method.map(RawMethod::into_descriptors).unwrap_or_default(),
            icon: raw.icon.filter(|icon| !icon.trim().is_empty()),
        }
    }
}

/// Parses the dataset object, keeping key order.
pub(super) fn parse_dataset(raw: &str) -> Result<Vec<(String, CreatureData)>> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in creature dataset")?;
    let object = parsed
        .as_object()
        .ok_or_else(|| anyhow!("creature dataset must be a JSON object keyed by id"))?;

    let mut entries = Vec::with_capacity(object.len());
    for (id, value) in object {
        let id = id.trim();
        if id.is_empty() {
            return Err(anyhow!("creature dataset contains an empty id"));
        }

        let creature = RawCreature::deserialize(value)
            .with_context(|| format!("invalid record for creature `{id}`"))?;
        entries.push((id.to_owned(), CreatureData::from(creature)));
    }

    if entries.is_empty() {
        Err(anyhow!("creature dataset contains no entries"))
    } else {
        Ok(entries)
    }
}
