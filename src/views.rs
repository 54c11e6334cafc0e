//! Analysis pages: pure data shaping plus the widgets that draw the result.

pub mod correlation;
pub mod distribution;
pub mod missing;
pub mod overview;
pub mod scatter;

use crate::{DashboardResult, InlineMessage};
use egui::Ui;
use std::fmt;

/// What a view produces for a given table and selection.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewOutcome<T> {
    /// Data ready to render.
    Ready(T),
    /// Nothing to show; the message says why. Never an error.
    Info(String),
}

impl<T> ViewOutcome<T> {
    pub fn info(message: impl Into<String>) -> Self {
        ViewOutcome::Info(message.into())
    }

    pub fn is_info(&self) -> bool {
        matches!(self, ViewOutcome::Info(_))
    }

    /// The ready value, if any.
    pub fn ready(self) -> Option<T> {
        match self {
            ViewOutcome::Ready(value) => Some(value),
            ViewOutcome::Info(_) => None,
        }
    }
}

/// Draws a view result: `Ready` through `render`, `Info` as a note, errors inline.
pub fn show_outcome<T>(
    ui: &mut Ui,
    result: DashboardResult<ViewOutcome<T>>,
    render: impl FnOnce(&mut Ui, &T),
) {
    match result {
        Ok(ViewOutcome::Ready(value)) => render(ui, &value),
        Ok(ViewOutcome::Info(message)) => ui.info_frame(&message),
        Err(err) => {
            tracing::error!("View failed: {err}");
            ui.error_frame(&err.to_string());
        }
    }
}

/// Pages of the dashboard, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    About,
    Overview,
    ClassImbalance,
    MissingValues,
    Correlation,
    Scatter,
    WrappingUp,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::About,
        Page::Overview,
        Page::ClassImbalance,
        Page::MissingValues,
        Page::Correlation,
        Page::Scatter,
        Page::WrappingUp,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::About => "About this App",
            Page::Overview => "Dataset Overview",
            Page::ClassImbalance => "Class Imbalance",
            Page::MissingValues => "Missing Values",
            Page::Correlation => "Correlation Analysis",
            Page::Scatter => "Scatter Plots",
            Page::WrappingUp => "Wrapping Up",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests_views {
    use super::*;

    #[test]
    fn test_page_titles_are_unique() {
        let mut titles: Vec<&str> = Page::ALL.iter().map(|p| p.title()).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), Page::ALL.len());
        assert_eq!(Page::default().to_string(), "About this App");
    }

    #[test]
    fn test_view_outcome_accessors() {
        let ready: ViewOutcome<u8> = ViewOutcome::Ready(3);
        let info: ViewOutcome<u8> = ViewOutcome::info("nothing here");

        assert!(!ready.is_info());
        assert!(info.is_info());
        assert_eq!(ready.ready(), Some(3));
        assert_eq!(info.ready(), None);
    }
}
