mod ancestors;
mod expansion;
mod graph;
mod levels;
mod load;
mod parse;
mod progress;
mod roots;
mod search;

pub use ancestors::AncestorIndex;
pub use expansion::ExpansionState;
pub use graph::EvolutionGraph;
pub use levels::{LevelAssignment, Link, Slot, compute_levels};
pub use load::load_graph;
pub use progress::{JsonFileStore, MemoryStore, Progress};
pub use roots::roots;
pub use search::{resolve, reveal, suggestions};
