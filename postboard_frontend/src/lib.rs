pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod routes;

#[cfg(test)]
mod testing;

use anyhow::anyhow;
use eframe::{self, egui};

pub use app::{PostboardApp, Services};

use config::FrontendConfig;
use routes::Route;

/// Launches the egui application with default window options.
pub fn run_frontend(config: &FrontendConfig, route: Route) -> anyhow::Result<()> {
    run_frontend_with_options(config, route, default_native_options())
}

/// Launches the egui app with caller-provided options.
pub fn run_frontend_with_options(
    config: &FrontendConfig,
    route: Route,
    options: eframe::NativeOptions,
) -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(false).try_init();
    let services = Services::from_config(config)?;
    eframe::run_native(
        "Posts",
        options,
        Box::new(move |cc| Ok(Box::new(PostboardApp::new(cc, services, route)))),
    )
    .map_err(|err| anyhow!(err.to_string()))
}

fn default_native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Posts")
            .with_inner_size([1000.0, 720.0])
            .with_min_inner_size([800.0, 480.0]),
        ..Default::default()
    }
}
