//! UI components for tilestrip
//!
//! This module contains the widgets the main window is built from.

mod catalog_panel;
mod icons;
mod param_field;

pub use catalog_panel::{CatalogPanel, ToggleRequest};
pub use icons::{get_app_icon, to_color_image};
pub use param_field::ParamField;
