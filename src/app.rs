//! Main application module for tilestrip
//!
//! This module implements the eframe App trait. The window shows the strip
//! preview and copy buttons at the top, the render parameters and cell
//! colors at the bottom, and the catalog in between. All state changes go
//! through the `Engine`; the window only forwards clicks and shows results.

use crate::config::{save_config_silent, Settings, WindowSize};
use crate::engine::{Engine, MAX_SELECTION};
use crate::error::Result;
use crate::export::ArboardSink;
use crate::ui::{to_color_image, CatalogPanel, ParamField, ToggleRequest};
use eframe::egui;
use log::{debug, error, info, warn};

/// How long status messages stay visible, in seconds.
const TOAST_SECS: f64 = 2.5;

/// Copy actions offered in the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CopyAction {
    All,
    Image,
    Labels,
}

/// The main application struct that holds all state and implements eframe::App.
pub struct TilestripApp {
    /// Persisted preferences, updated as parameters and colors change
    settings: Settings,
    settings_dirty: bool,
    engine: Engine,
    sink: ArboardSink,
    catalog_panel: CatalogPanel,
    tile_field: ParamField,
    resolution_field: ParamField,
    /// Uploaded strip and the engine generation it shows
    preview: Option<egui::TextureHandle>,
    preview_generation: Option<u64>,
    toast: Option<(String, f64)>,
    start_time: std::time::Instant,
    last_window_rect: Option<egui::Rect>,
}

impl TilestripApp {
    pub fn new(settings: Settings, engine: Engine) -> Self {
        let params = engine.params();
        Self {
            tile_field: ParamField::new("Tile size", params.tile_size),
            resolution_field: ParamField::new("Resolution", params.dpi),
            settings,
            settings_dirty: false,
            engine,
            sink: ArboardSink::new(),
            catalog_panel: CatalogPanel::new(),
            preview: None,
            preview_generation: None,
            toast: None,
            start_time: std::time::Instant::now(),
            last_window_rect: None,
        }
    }

    /// Get elapsed time since app start in seconds.
    fn get_app_time(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    fn show_toast(&mut self, message: impl Into<String>) {
        let expires_at = self.get_app_time() + TOAST_SECS;
        self.toast = Some((message.into(), expires_at));
    }

    fn update_toast(&mut self) {
        let now = self.get_app_time();
        if self.toast.as_ref().is_some_and(|(_, expires_at)| now >= *expires_at) {
            self.toast = None;
        }
    }

    /// Track window geometry for the next launch.
    fn update_window_state(&mut self, ctx: &egui::Context) {
        let (rect, maximized) = ctx.input(|i| {
            (
                i.viewport().outer_rect,
                i.viewport().maximized.unwrap_or(false),
            )
        });
        let Some(rect) = rect else {
            return;
        };
        if self.last_window_rect == Some(rect) {
            return;
        }
        self.last_window_rect = Some(rect);
        self.settings.window_size = WindowSize {
            width: rect.width(),
            height: rect.height(),
            x: Some(rect.min.x),
            y: Some(rect.min.y),
            maximized,
        };
        self.settings_dirty = true;
    }

    /// Re-upload the preview texture when the engine has rendered since.
    fn refresh_preview(&mut self, ctx: &egui::Context) {
        let generation = self.engine.generation();
        if self.preview_generation == Some(generation) {
            return;
        }
        self.preview_generation = Some(generation);

        let composite = self.engine.composite();
        self.preview = if composite.is_empty() {
            None
        } else {
            Some(ctx.load_texture(
                "strip-preview",
                to_color_image(composite.pixels()),
                egui::TextureOptions::NEAREST,
            ))
        };
        debug!(
            "Preview refreshed for generation {} ({}x{} at {} dpi)",
            generation,
            composite.width(),
            composite.height(),
            composite.dpi()
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_toggle(&mut self, request: ToggleRequest) {
        let applied = self.engine.try_toggle(request.id, request.desired);
        if !applied && request.desired {
            self.show_toast(format!("At most {} items can be selected", MAX_SELECTION));
        }
    }

    fn handle_copy(&mut self, action: CopyAction) {
        let result = match action {
            CopyAction::All => self
                .engine
                .export_all(&self.settings.cell_colors(), &mut self.sink),
            CopyAction::Image => self.engine.export_image_only(&mut self.sink),
            CopyAction::Labels => self.engine.export_labels_only(&mut self.sink),
        };

        match result {
            Ok(()) => {
                let message = match action {
                    CopyAction::All => "Copied strip and labels",
                    CopyAction::Image => "Copied strip image",
                    CopyAction::Labels => "Copied labels",
                };
                self.show_toast(message);
            }
            Err(e) => {
                warn!("{:?} copy failed: {}", action, e);
                self.show_toast(format!("Copy failed: {}", e));
            }
        }
    }

    fn handle_reset(&mut self) {
        self.engine.clear();
        self.show_toast("Selection cleared");
    }

    /// Validate and apply a committed tile size.
    fn commit_tile_size(&mut self, text: &str) {
        let result = self.engine.set_tile_size(text);
        if let Some(size) = self.commit_outcome(result, "tile size") {
            self.tile_field.accept(size);
            self.settings.tile_size = size;
        } else {
            let now = self.get_app_time();
            self.tile_field.reject(now);
        }
    }

    /// Validate and apply a committed resolution.
    fn commit_resolution(&mut self, text: &str) {
        let result = self.engine.set_resolution(text);
        if let Some(dpi) = self.commit_outcome(result, "resolution") {
            self.resolution_field.accept(dpi);
            self.settings.resolution = dpi;
        } else {
            let now = self.get_app_time();
            self.resolution_field.reject(now);
        }
    }

    fn commit_outcome<T: std::fmt::Display>(&mut self, result: Result<T>, what: &str) -> Option<T> {
        match result {
            Ok(value) => {
                info!("Set {} to {}", what, value);
                self.settings_dirty = true;
                Some(value)
            }
            Err(e) if e.is_input_error() => {
                warn!("Rejected {}: {}", what, e);
                self.show_toast(e.to_string());
                None
            }
            Err(e) => {
                error!("Failed to apply {}: {}", what, e);
                self.show_toast(e.to_string());
                None
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Panels
    // ─────────────────────────────────────────────────────────────────────────

    fn render_toolbar(&mut self, ui: &mut egui::Ui) -> Option<CopyAction> {
        let mut action = None;
        ui.horizontal(|ui| {
            if ui.button("Copy all").clicked() {
                action = Some(CopyAction::All);
            }
            if ui.button("Copy image").clicked() {
                action = Some(CopyAction::Image);
            }
            if ui.button("Copy text").clicked() {
                action = Some(CopyAction::Labels);
            }
            if ui.button("Reset").clicked() {
                self.handle_reset();
            }
            ui.separator();
            ui.label(format!(
                "{} / {} selected",
                self.engine.selection().len(),
                MAX_SELECTION
            ));
        });
        action
    }

    fn render_preview(&self, ui: &mut egui::Ui) {
        let height = self.engine.params().tile_size as f32;
        ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui| match &self.preview {
            Some(texture) => {
                ui.add(egui::Image::new((texture.id(), texture.size_vec2())));
            }
            None => {
                ui.weak("Select up to five items below.");
            }
        });
    }

    fn render_parameters(&mut self, ui: &mut egui::Ui) {
        let now = self.get_app_time();
        ui.horizontal(|ui| {
            if let Some(text) = self.tile_field.show(ui, now) {
                self.commit_tile_size(&text);
            }
            ui.separator();
            if let Some(text) = self.resolution_field.show(ui, now) {
                self.commit_resolution(&text);
            }
            ui.separator();
            ui.label("Cell");
            let background = ui.add(
                egui::TextEdit::singleline(&mut self.settings.background_color)
                    .desired_width(64.0),
            );
            ui.label("Border");
            let border = ui.add(
                egui::TextEdit::singleline(&mut self.settings.border_color).desired_width(64.0),
            );
            if background.changed() || border.changed() {
                self.settings_dirty = true;
            }
        });
    }

    fn save_settings_if_dirty(&mut self) {
        if self.settings_dirty && save_config_silent(&self.settings) {
            self.settings_dirty = false;
        }
    }
}

impl eframe::App for TilestripApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_toast();
        self.update_window_state(ctx);

        let copy_action = egui::TopBottomPanel::top("strip")
            .show(ctx, |ui| {
                ui.add_space(6.0);
                self.refresh_preview(ui.ctx());
                self.render_preview(ui);
                ui.add_space(4.0);
                let action = self.render_toolbar(ui);
                ui.add_space(4.0);
                action
            })
            .inner;

        egui::TopBottomPanel::bottom("parameters").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_parameters(ui);
            if let Some((message, _)) = &self.toast {
                ui.label(egui::RichText::new(message).italics());
            }
            ui.add_space(4.0);
        });

        let toggle = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let engine = &self.engine;
                self.catalog_panel
                    .show(ui, engine.catalog(), |id| engine.is_selected(id))
            })
            .inner;

        if let Some(action) = copy_action {
            self.handle_copy(action);
        }
        if let Some(request) = toggle {
            self.handle_toggle(request);
        }
        if self.toast.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }

    /// Called when the application is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        self.save_settings_if_dirty();
    }
}
