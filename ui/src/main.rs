#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use agora_ui::AdminApp;
use agora_ui::state::State;
use anyhow::Context as _;

fn main() -> anyhow::Result<()> {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("egui_winit::clipboard", log::LevelFilter::Off)
        .init();

    // Commands are spawned on this runtime from the UI thread.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the tokio runtime")?;
    let _guard = runtime.enter();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 760.0])
            .with_min_inner_size([800.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Agora Admin",
        native_options,
        Box::new(|_cc| {
            let state = State::default();
            Ok(Box::new(AdminApp::new(state)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("eframe exited with an error: {err}"))
}
