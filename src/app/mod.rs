use std::path::PathBuf;

use eframe::egui::{self, Context};

use crate::evo::{
    AncestorIndex, EvolutionGraph, ExpansionState, JsonFileStore, LevelAssignment, Link,
    MemoryStore, Progress, load_graph, roots,
};
use crate::layout::CardMetrics;

mod render_utils;
mod tree;
mod ui;

/// Where the viewer reads its dataset and keeps completion progress.
#[derive(Clone, Debug)]
pub struct LoadOptions {
    pub data_path: Option<PathBuf>,
    pub progress_path: PathBuf,
    pub persist_progress: bool,
}

pub struct EvoTreeApp {
    options: LoadOptions,
    state: AppState,
}

enum AppState {
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    graph: EvolutionGraph,
    roots: Vec<String>,
    ancestors: AncestorIndex,
    expansion: ExpansionState,
    progress: Progress,
    assignment: LevelAssignment,
    links: Vec<Link>,
    levels_dirty: bool,
    metrics: CardMetrics,
    search: String,
    notice: Option<Notice>,
    selected: Option<String>,
    pending_focus: Option<String>,
}

enum Notice {
    NotFound {
        query: String,
        suggestions: Vec<String>,
    },
    SaveFailed(String),
}

/// One discrete user gesture on a card, applied after the frame is drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
enum CardGesture {
    ToggleExpansion(String),
    ToggleCompletion(String),
}

impl EvoTreeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, options: LoadOptions) -> Self {
        let state = Self::load(&options);
        Self { options, state }
    }

    fn load(options: &LoadOptions) -> AppState {
        match load_graph(options.data_path.as_deref()) {
            Ok(graph) => {
                let progress = if options.persist_progress {
                    log::info!("progress file: {}", options.progress_path.display());
                    Progress::open(Box::new(JsonFileStore::new(&options.progress_path)))
                } else {
                    log::info!("progress is kept in memory only");
                    Progress::open(Box::new(MemoryStore::default()))
                };
                AppState::Ready(Box::new(ViewModel::new(graph, progress)))
            }
            Err(error) => {
                log::error!("{error:#}");
                AppState::Error(format!("{error:#}"))
            }
        }
    }
}

impl ViewModel {
    fn new(graph: EvolutionGraph, progress: Progress) -> Self {
        let roots = roots(&graph);
        let ancestors = AncestorIndex::build(&graph);
        log::debug!("{} independent trees", roots.len());

        Self {
            graph,
            roots,
            ancestors,
            expansion: ExpansionState::new(),
            progress,
            assignment: LevelAssignment::default(),
            links: Vec::new(),
            levels_dirty: true,
            metrics: CardMetrics::default(),
            search: String::new(),
            notice: None,
            selected: None,
            pending_focus: None,
        }
    }
}

impl eframe::App for EvoTreeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut reload_requested = false;

        match &mut self.state {
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the evolution dataset");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        reload_requested = true;
                    }
                });
            }
            AppState::Ready(model) => model.show(ctx),
        }

        if reload_requested {
            self.state = Self::load(&self.options);
        }
    }
}
