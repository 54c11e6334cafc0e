//! Custom traits and trait implementations for `egui` types, plus small utility traits.
//!
//! Extends `egui::Context` (styling), `egui::Ui` (inline messages), `std::path::Path`
//! and `Vec`, and defines the `Notification` interface used by `layout.rs`.

use egui::{
    Align, Color32, Context,
    FontFamily::Proportional,
    FontId, Frame, Layout, Spacing, Stroke, Style,
    TextStyle::{Body, Button, Heading, Monospace, Small},
    Ui, Vec2, Visuals, Window,
    style::ScrollStyle,
};

use std::{collections::HashSet, ffi::OsStr, hash::Hash, path::Path};

/// Custom text styles for the egui context. Used by `MyStyle::set_style_init`.
pub const CUSTOM_TEXT_STYLE: [(egui::TextStyle, egui::FontId); 5] = [
    (Heading, FontId::new(20.0, Proportional)),
    (Body, FontId::new(15.0, Proportional)),
    (Button, FontId::new(15.0, Proportional)),
    (Monospace, FontId::new(14.0, Proportional)),
    (Small, FontId::new(12.0, Proportional)),
];

/// A trait for applying custom styling to the `egui` context (`Context`).
/// Used once at startup by `layout.rs::DashboardApp::new`.
pub trait MyStyle {
    /// Applies a pre-defined application style to the `egui` context.
    fn set_style_init(&self, visuals: Visuals);
}

impl MyStyle for Context {
    /// Configures the theme, spacing and text styles.
    fn set_style_init(&self, visuals: Visuals) {
        let scroll = ScrollStyle {
            handle_min_length: 32.0,
            ..ScrollStyle::default()
        };

        let spacing = Spacing {
            scroll,
            item_spacing: [8.0, 6.0].into(),
            ..Spacing::default()
        };

        let style = Style {
            visuals,
            spacing,
            text_styles: CUSTOM_TEXT_STYLE.into(),
            ..Style::default()
        };

        self.set_style(style);
    }
}

/// Trait for modal Notification windows.
/// Allows `layout.rs` to manage notifications polymorphically via `Box<dyn Notification>`.
pub trait Notification: Send + Sync + 'static {
    /// Renders the notification window using `egui::Window`.
    ///
    /// ### Returns
    /// `true` if the window should remain open, `false` if closed.
    fn show(&mut self, ctx: &Context) -> bool;
}

/// Notification struct for displaying error messages. Implements `Notification`.
pub struct Error {
    /// The error message content. Set by the caller in `layout.rs`.
    pub message: String,
}

impl Notification for Error {
    fn show(&mut self, ctx: &Context) -> bool {
        let mut open = true;

        Window::new("Error")
            .collapsible(false)
            .open(&mut open)
            .show(ctx, |ui| {
                let width_max = ui.available_width() * 0.80;
                ui.allocate_ui_with_layout(
                    Vec2::new(width_max, ui.available_height()),
                    Layout::top_down(Align::LEFT),
                    |ui| ui.error_frame(&self.message),
                );
            });

        open
    }
}

/// Colored frames for messages shown in place of a page's content.
pub trait InlineMessage {
    /// Light red frame with a dark red border.
    fn error_frame(&mut self, message: &str);

    /// Neutral frame for informational notes (nothing to display).
    fn info_frame(&mut self, message: &str);
}

impl InlineMessage for Ui {
    fn error_frame(&mut self, message: &str) {
        message_frame(
            self,
            message,
            Color32::from_rgb(255, 200, 200),
            Color32::DARK_RED,
        );
    }

    fn info_frame(&mut self, message: &str) {
        message_frame(
            self,
            message,
            Color32::from_rgb(210, 228, 250),
            Color32::from_rgb(0, 80, 160),
        );
    }
}

fn message_frame(ui: &mut Ui, message: &str, fill: Color32, border: Color32) {
    Frame::default()
        .fill(fill)
        .stroke(Stroke::new(1.0, border))
        .outer_margin(2.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.colored_label(Color32::BLACK, message);
        });
}

/// Trait to extend `Path` with a convenient method for getting the lowercase file extension.
/// Used by `file_extension.rs`.
pub trait PathExtension {
    /// Returns the file extension as a lowercase `String`, or `None`.
    fn extension_as_lowercase(&self) -> Option<String>;
}

impl PathExtension for Path {
    fn extension_as_lowercase(&self) -> Option<String> {
        self.extension() // Get OsStr extension.
            .and_then(OsStr::to_str) // Try converting to &str.
            .map(str::to_lowercase)
    }
}

/// A trait for deduplicating vectors while preserving the original order of elements.
/// Used by `source.rs` for delimiter guessing.
pub trait UniqueElements<T> {
    /// Removes duplicate elements in place, keeping the first occurrence.
    fn unique(&mut self)
    where
        T: Eq + Hash + Clone;
}

impl<T> UniqueElements<T> for Vec<T> {
    fn unique(&mut self)
    where
        T: Eq + Hash + Clone,
    {
        let mut seen = HashSet::new();
        self.retain(|x| seen.insert(x.clone())); // Keep if new.
    }
}

// --- Unit Tests ---


#[cfg(test)]
mod tests_unique {
    use super::*;

    #[test]
    fn test_unique_delimiters() {
        let mut delimiters = vec![b';', b',', b';', b'|', b'\t', b':'];
        delimiters.unique();
        assert_eq!(delimiters, vec![b';', b',', b'|', b'\t', b':']);
    }

    #[test]
    fn test_unique_empty() {
        let mut vec: Vec<u8> = vec![];
        vec.unique();
        assert!(vec.is_empty());
    }
}
