//! Configuration module for tilestrip
//!
//! This module handles user preferences (render parameters, cell colors,
//! catalog location, window state) and their JSON persistence in the
//! platform config directory.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
