//! Catalog browser
//!
//! Lists every catalog group with its members as icon buttons. Selected
//! members are drawn highlighted; clicking a member asks for it to be
//! toggled. The panel never mutates the selection itself.

use super::icons::to_color_image;
use crate::catalog::{Catalog, ItemId};
use eframe::egui;
use log::debug;
use std::collections::HashMap;

/// Edge length of an icon button, in points.
const ICON_SIZE: f32 = 48.0;

/// Width reserved for one member, icon plus name.
const ITEM_WIDTH: f32 = 72.0;

/// A member the user clicked, with the state it should move to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleRequest {
    pub id: ItemId,
    pub desired: bool,
}

/// Scrollable catalog panel with lazily uploaded icon textures.
#[derive(Default)]
pub struct CatalogPanel {
    textures: HashMap<ItemId, egui::TextureHandle>,
}

impl CatalogPanel {
    pub fn new() -> Self {
        Self::default()
    }

    fn texture(
        &mut self,
        ctx: &egui::Context,
        catalog: &Catalog,
        id: ItemId,
    ) -> Option<egui::TextureHandle> {
        if let Some(texture) = self.textures.get(&id) {
            return Some(texture.clone());
        }
        let icon = catalog.icon(id)?;
        let texture = ctx.load_texture(
            format!("catalog-icon-{}", id),
            to_color_image(icon),
            egui::TextureOptions::LINEAR,
        );
        self.textures.insert(id, texture.clone());
        Some(texture)
    }

    /// Draw the catalog. `is_selected` reports the current selection state.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        catalog: &Catalog,
        is_selected: impl Fn(ItemId) -> bool,
    ) -> Option<ToggleRequest> {
        if catalog.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label("No catalog loaded. Check the catalog file and icon folder.");
            });
            return None;
        }

        let mut request = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for group in catalog.groups() {
                    ui.add_space(4.0);
                    ui.strong(&group.name);
                    ui.separator();
                    ui.horizontal_wrapped(|ui| {
                        for &id in &group.members {
                            let selected = is_selected(id);
                            if self.member(ui, catalog, id, selected) {
                                request = Some(ToggleRequest {
                                    id,
                                    desired: !selected,
                                });
                            }
                        }
                    });
                }
            });

        if let Some(request) = request {
            debug!("Toggle requested for {} -> {}", request.id, request.desired);
        }
        request
    }

    /// One member button. Returns `true` when clicked.
    fn member(&mut self, ui: &mut egui::Ui, catalog: &Catalog, id: ItemId, selected: bool) -> bool {
        let name = catalog
            .record(id)
            .map(|record| record.display_name.as_str())
            .unwrap_or_default();
        let texture = self.texture(ui.ctx(), catalog, id);

        let mut clicked = false;
        ui.allocate_ui(egui::vec2(ITEM_WIDTH, ICON_SIZE + 40.0), |ui| {
            ui.vertical_centered(|ui| {
                let button = match &texture {
                    Some(texture) => ui.add(
                        egui::ImageButton::new(
                            egui::Image::new(texture).fit_to_exact_size(egui::Vec2::splat(ICON_SIZE)),
                        )
                        .selected(selected),
                    ),
                    None => ui.add_sized(
                        egui::Vec2::splat(ICON_SIZE),
                        egui::SelectableLabel::new(selected, id.to_string()),
                    ),
                };
                let label = if selected {
                    egui::RichText::new(name).small().strong()
                } else {
                    egui::RichText::new(name).small()
                };
                ui.label(label);
                clicked = button.clicked();
            });
        });
        clicked
    }
}
