use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::graph::EvolutionGraph;

/// File stem of the persisted completion map.
pub const STORAGE_KEY: &str = "digivolution-progress";

pub type Result<T> = std::result::Result<T, ProgressError>;

#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("failed to access progress file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("progress file {path} is not a valid completion map: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Key-value persistence for the completion map.
pub trait CompletionStore {
    fn load(&self) -> Result<BTreeMap<String, bool>>;
    fn save(&self, entries: &BTreeMap<String, bool>) -> Result<()>;
}

/// Completion map stored as a JSON object `{ "<id>": true, ... }`.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/evo-tree/digivolution-progress.json`, or the working
    /// directory when the platform has no data dir.
    pub fn default_path() -> PathBuf {
        let file_name = format!("{STORAGE_KEY}.json");
        match dirs::data_dir() {
            Some(dir) => dir.join("evo-tree").join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> ProgressError {
        ProgressError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CompletionStore for JsonFileStore {
    fn load(&self) -> Result<BTreeMap<String, bool>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(error) => return Err(self.io_error(error)),
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|source| ProgressError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, entries: &BTreeMap<String, bool>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|error| self.io_error(error))?;
        }

        let body = serde_json::to_string_pretty(entries).map_err(|source| ProgressError::Parse {
            path: self.path.clone(),
            source,
        })?;

        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, body).map_err(|error| self.io_error(error))?;
        fs::rename(&staging, &self.path).map_err(|error| self.io_error(error))
    }
}

/// In-memory store, used when persistence is unavailable and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, bool>>,
}

impl MemoryStore {
    pub fn snapshot(&self) -> BTreeMap<String, bool> {
        self.entries.borrow().clone()
    }
}

impl CompletionStore for MemoryStore {
    fn load(&self) -> Result<BTreeMap<String, bool>> {
        Ok(self.snapshot())
    }

    fn save(&self, entries: &BTreeMap<String, bool>) -> Result<()> {
        *self.entries.borrow_mut() = entries.clone();
        Ok(())
    }
}

/// Set of creatures marked as obtained.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Completion {
    completed: HashSet<String>,
}

impl Completion {
    pub fn from_entries(entries: BTreeMap<String, bool>) -> Self {
        Self {
            completed: entries
                .into_iter()
                .filter_map(|(id, done)| done.then_some(id))
                .collect(),
        }
    }

    pub fn to_entries(&self) -> BTreeMap<String, bool> {
        self.completed.iter().map(|id| (id.clone(), true)).collect()
    }

    pub fn is_complete(&self, id: &str) -> bool {
        self.completed.contains(id)
    }

    /// Flips `id` and returns the new value.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.completed.remove(id) {
            false
        } else {
            self.completed.insert(id.to_owned());
            true
        }
    }

    /// Completed creatures that exist in `graph`. Stale ids left in the
    /// store by an older dataset are ignored.
    pub fn completed_count(&self, graph: &EvolutionGraph) -> usize {
        self.completed
            .iter()
            .filter(|id| graph.contains(id))
            .count()
    }

    pub fn ratio(&self, graph: &EvolutionGraph) -> f32 {
        if graph.is_empty() {
            return 0.0;
        }
        self.completed_count(graph) as f32 / graph.len() as f32
    }

    /// Rounded percentage shown in the header.
    pub fn percent(&self, graph: &EvolutionGraph) -> u32 {
        (self.ratio(graph) * 100.0).round() as u32
    }
}

/// Completion state bound to its store: loaded once, saved on every toggle.
pub struct Progress {
    completion: Completion,
    store: Box<dyn CompletionStore>,
}

impl Progress {
    /// Loads the initial state. An unreadable or corrupt store starts empty
    /// and is overwritten by the next toggle.
    pub fn open(store: Box<dyn CompletionStore>) -> Self {
        let completion = match store.load() {
            Ok(entries) => {
                let completion = Completion::from_entries(entries);
                log::info!("loaded {} completed creatures", completion.completed.len());
                completion
            }
            Err(error) => {
                log::error!("{error}; starting with empty progress");
                Completion::default()
            }
        };

        Self { completion, store }
    }

    pub fn completion(&self) -> &Completion {
        &self.completion
    }

    pub fn is_complete(&self, id: &str) -> bool {
        self.completion.is_complete(id)
    }

    /// Flips `id` and persists the whole map. The in-memory flip is kept
    /// even when saving fails.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let done = self.completion.toggle(id);
        log::debug!("creature `{id}` marked {}", if done { "complete" } else { "incomplete" });
        self.store.save(&self.completion.to_entries())?;
        Ok(done)
    }
}
