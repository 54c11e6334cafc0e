#![warn(clippy::all)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use puck_view::{Arguments, DashboardApp, Dataset, SourceConfig};
use std::process::ExitCode;
use tracing::error;

/*
cargo fmt
cargo test -- --nocapture
cargo test -- --show-output tests_merge
cargo run -- --help
cargo run -- -b data/Bio.csv -s data/SS.csv
cargo doc --open
cargo b -r && cargo install --path=.
*/

fn main() -> ExitCode {
    // Initialize the tracing subscriber for logging.
    // Use RUST_LOG environment variable to set logging level.  eg `export RUST_LOG=info`
    tracing_subscriber::fmt::init();

    // Parse command-line arguments.
    let args = Arguments::build();
    let config = SourceConfig::new(&args);

    // RUST_LOG=debug cargo run
    tracing::debug!("main()\nSourceConfig: {config:#?}");

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            error!("Failed to build Tokio runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    // Both sources must load and merge before any page can be shown.
    let dataset = match runtime.block_on(Dataset::load(config)) {
        Ok(dataset) => dataset,
        Err(err) => {
            error!("Failed to load the dataset: {err}");
            return ExitCode::FAILURE;
        }
    };

    // Configure the native options for the eframe application.
    let native_options = eframe::NativeOptions {
        centered: true,
        persist_window: true,
        vsync: true,
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Puck View",
        native_options,
        Box::new(move |creation_context| {
            Ok(Box::new(DashboardApp::new(
                creation_context,
                dataset,
                runtime,
            )))
        }),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Puck View terminated with an error: {err}");
            ExitCode::FAILURE
        }
    }
}
