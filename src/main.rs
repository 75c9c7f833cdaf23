mod app;
mod evo;
mod layout;
mod util;

use std::path::PathBuf;

use clap::Parser;

use crate::evo::JsonFileStore;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Creature dataset (JSON object keyed by id). Uses the bundled one when omitted.
    #[arg(long)]
    data: Option<PathBuf>,

    /// File that stores which creatures are marked as obtained.
    #[arg(long)]
    progress: Option<PathBuf>,

    /// Keep progress in memory only.
    #[arg(long)]
    no_save: bool,

    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(args: &Args) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let options = app::LoadOptions {
        data_path: args.data.clone(),
        progress_path: args
            .progress
            .clone()
            .unwrap_or_else(JsonFileStore::default_path),
        persist_progress: !args.no_save,
    };

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "evo-tree",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::EvoTreeApp::new(cc, options)))),
    )
}
