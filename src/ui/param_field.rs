//! Numeric parameter text field
//!
//! Edits are held as text until Enter; the owner validates the committed
//! text and either accepts or rejects it. Escape, or leaving the field any
//! other way, puts the last accepted value back.

use eframe::egui;

/// How long a rejected field stays outlined, in seconds.
const ERROR_HIGHLIGHT_SECS: f64 = 1.5;

/// Text field bound to one render parameter.
#[derive(Debug, Clone)]
pub struct ParamField {
    label: &'static str,
    text: String,
    last_valid: String,
    error_until: Option<f64>,
}

impl ParamField {
    pub fn new(label: &'static str, value: impl ToString) -> Self {
        let text = value.to_string();
        Self {
            label,
            last_valid: text.clone(),
            text,
            error_until: None,
        }
    }

    /// Record a committed value as the new fallback.
    pub fn accept(&mut self, value: impl ToString) {
        self.last_valid = value.to_string();
        self.text = self.last_valid.clone();
        self.error_until = None;
    }

    /// Revert after a failed commit and flag the field.
    pub fn reject(&mut self, now: f64) {
        self.revert();
        self.error_until = Some(now + ERROR_HIGHLIGHT_SECS);
    }

    /// Put the last accepted value back without committing.
    pub fn revert(&mut self) {
        self.text.clone_from(&self.last_valid);
    }

    fn shows_error(&self, now: f64) -> bool {
        self.error_until.is_some_and(|until| now < until)
    }

    /// Apply the key that ended an edit. Returns the text to commit on Enter.
    fn finish_edit(&mut self, enter: bool) -> Option<String> {
        if enter {
            Some(self.text.trim().to_string())
        } else {
            self.revert();
            None
        }
    }

    /// Draw the field. Returns the text to validate when Enter was pressed.
    pub fn show(&mut self, ui: &mut egui::Ui, now: f64) -> Option<String> {
        ui.label(self.label);
        let response = ui.add(egui::TextEdit::singleline(&mut self.text).desired_width(56.0));

        if self.shows_error(now) {
            ui.painter().rect_stroke(
                response.rect.expand(1.0),
                2.0,
                egui::Stroke::new(1.5, egui::Color32::from_rgb(220, 50, 50)),
            );
            ui.ctx().request_repaint();
        }

        if response.lost_focus() {
            let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
            return self.finish_edit(enter);
        }
        None
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_commits_trimmed_text() {
        let mut field = ParamField::new("Size", 50);
        field.text = " 64 ".to_string();
        assert_eq!(field.finish_edit(true).as_deref(), Some("64"));
    }

    #[test]
    fn test_escape_reverts_without_commit() {
        let mut field = ParamField::new("Size", 50);
        field.text = "64".to_string();
        assert_eq!(field.finish_edit(false), None);
        assert_eq!(field.text, "50");
    }

    #[test]
    fn test_accept_moves_fallback() {
        let mut field = ParamField::new("Size", 50);
        field.text = "64".to_string();
        field.accept(64);
        field.text = "garbage".to_string();
        field.revert();
        assert_eq!(field.text, "64");
    }

    #[test]
    fn test_reject_reverts_and_flags() {
        let mut field = ParamField::new("DPI", 96.0_f32);
        assert_eq!(field.text, "96");
        field.text = "301".to_string();
        field.reject(10.0);
        assert_eq!(field.text, "96");
        assert!(field.shows_error(10.5));
        assert!(!field.shows_error(10.0 + ERROR_HIGHLIGHT_SECS));
    }

    #[test]
    fn test_accept_clears_error() {
        let mut field = ParamField::new("DPI", 96.0_f32);
        field.reject(1.0);
        field.accept(144.0_f32);
        assert!(!field.shows_error(1.1));
        assert_eq!(field.text, "144");
    }
}
