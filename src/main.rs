// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! tilestrip - Main Entry Point
//!
//! Pick up to five catalog icons and copy them to the clipboard as a
//! spreadsheet-ready strip. Built with Rust and egui.

mod app;
mod catalog;
mod config;
mod engine;
mod error;
mod export;
mod ui;

use app::TilestripApp;
use catalog::load_catalog_or_empty;
use config::{load_config, Theme};
use engine::Engine;
use log::{error, info};
use ui::get_app_icon;

/// Application name constant.
const APP_NAME: &str = "tilestrip";

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting {}", APP_NAME);

    let settings = load_config();
    let window_size = settings.window_size;

    let catalog = load_catalog_or_empty(
        &settings.catalog_file,
        &settings.icon_dir,
        &settings.icon_extension,
    );

    let engine = match Engine::new(catalog, settings.render_parameters()) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Failed to start the strip engine: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Window configuration: {}x{}, maximized: {}",
        window_size.width, window_size.height, window_size.maximized
    );

    let mut viewport = eframe::egui::ViewportBuilder::default()
        .with_title(APP_NAME)
        .with_inner_size([window_size.width, window_size.height])
        .with_min_inner_size([520.0, 420.0]);

    if let Some(icon) = get_app_icon() {
        viewport = viewport.with_icon(icon);
    }

    if let (Some(x), Some(y)) = (window_size.x, window_size.y) {
        viewport = viewport.with_position([x, y]);
    }

    if window_size.maximized {
        viewport = viewport.with_maximized(true);
    }

    let native_options = eframe::NativeOptions {
        viewport,
        follow_system_theme: settings.theme == Theme::System,
        default_theme: match settings.theme {
            Theme::Dark => eframe::Theme::Dark,
            Theme::Light | Theme::System => eframe::Theme::Light,
        },
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(move |_cc| Ok(Box::new(TilestripApp::new(settings, engine)))),
    )
}
