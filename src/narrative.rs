//! Fixed explanatory text shown on each page.

use crate::Page;
use egui::{RichText, Ui};

/// A collapsible block of explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub body: &'static str,
}

const ABOUT: &[Section] = &[
    Section {
        title: "What is this?",
        body: "An exploratory look at every defenseman who played in the NHL during one regular \
               season. Season stats and biographical details were exported from nhl.com as two \
               tables, combined here into one, and explored page by page.",
    },
    Section {
        title: "How to use it",
        body: "Pick a page in the navigation panel on the left. Pages with a dropdown recompute \
               their charts as soon as the selection changes. Hover a chart to read exact values.",
    },
    Section {
        title: "Where the data comes from",
        body: "Both tables come from the nhl.com stats pages, filtered to defensemen and one \
               regular season. The biographical table adds nationality, size and draft history; \
               the season table holds games played, scoring and usage numbers.",
    },
];

const OVERVIEW: &[Section] = &[
    Section {
        title: "Season stats columns",
        body: "GamesPlayed, Goals, Assists and Points count production over the season. \
               PlusMinus is the goal differential while on the ice at even strength. \
               PenaltyMinutes totals time in the box. TOI/GP is average ice time per game.",
    },
    Section {
        title: "Bio stats columns",
        body: "Country is the nationality code. Height is in inches and Weight in pounds. \
               DraftYear, DraftRound and DraftOverall are empty for undrafted players.",
    },
    Section {
        title: "What changed in the combined table?",
        body: "Position, Season and Shooting% were removed from the season table, since every \
               row is a defenseman from the same season. Country, Height, Weight and the three \
               draft columns were taken from the biographical table. Division and Conference \
               were derived from each player's team.",
    },
];

const CLASS_IMBALANCE: &[Section] = &[
    Section {
        title: "ShootsHand",
        body: "Slightly more defensemen shoot left than right. Handedness says little about \
               scoring on its own but is useful as a grouping on the scatter page.",
    },
    Section {
        title: "Country",
        body: "Most defensemen come from Canada and the United States, with Sweden next. The \
               remaining countries each contribute only a handful of players, so comparisons \
               between them rest on very small groups.",
    },
    Section {
        title: "Division and Conference",
        body: "These follow the team a player ended the season with, and every division has \
               eight teams. The split is close to even, with small differences coming from \
               roster sizes and mid-season moves.",
    },
];

const MISSING_VALUES: &[Section] = &[
    Section {
        title: "Why are values missing?",
        body: "Undrafted players have no draft year, round or pick, since signing as a free \
               agent out of college or Europe is a normal route into the league. Faceoff \
               statistics are mostly empty because defensemen rarely take faceoffs.",
    },
    Section {
        title: "What changes after imputation?",
        body: "Filling the draft columns with their means moves every undrafted player to the \
               middle of the draft. The correlations barely move, because the filled values add \
               no new information. The benefit is a complete table for later modeling.",
    },
    Section {
        title: "Another option: leave them out",
        body: "The draft columns and faceoff percentage are weakly related to points. Dropping \
               them entirely is a simple alternative when the goal is predicting production.",
    },
];

const CORRELATION: &[Section] = &[
    Section {
        title: "Reading the heatmap",
        body: "Each cell is the Pearson coefficient between two columns, from -1 (blue) through \
               0 (white) to +1 (red). Only the lower triangle is drawn since the matrix is \
               symmetric and the diagonal is always 1. Pairs are compared over the players that \
               have both values.",
    },
    Section {
        title: "What stands out",
        body: "Points is driven by Assists far more than Goals for defensemen. Ice time and games \
               played follow closely. Draft position and physical size show little relationship \
               with production.",
    },
];

const SCATTER: &[Section] = &[
    Section {
        title: "What to do here",
        body: "Choose any two numeric columns to see how they relate, and optionally color the \
               points by a group. Clusters, trends and outliers show up here that summary \
               statistics hide.",
    },
    Section {
        title: "Class imbalance in the scatter",
        body: "Coloring by an uneven group such as Country makes large groups dominate the plot. \
               The top scorers still come from a mix of divisions, conferences and handedness, \
               but only from a few countries.",
    },
    Section {
        title: "Pair grid",
        body: "The grid plots the first six numeric columns against each other, lower triangle \
               only, with a histogram of each column on the diagonal.",
    },
];

const WRAPPING_UP: &[Section] = &[
    Section {
        title: "Summary",
        body: "The two exports were combined into one table, enriched with division and \
               conference, checked for missing values and imbalance, and explored through \
               correlations and scatter plots.",
    },
    Section {
        title: "Next steps",
        body: "Assists, ice time and games played are the strongest candidates for predicting \
               points. Draft information and faceoff data can be set aside for that purpose.",
    },
];

/// Sections shown on a page, in display order.
pub fn sections(page: Page) -> &'static [Section] {
    match page {
        Page::About => ABOUT,
        Page::Overview => OVERVIEW,
        Page::ClassImbalance => CLASS_IMBALANCE,
        Page::MissingValues => MISSING_VALUES,
        Page::Correlation => CORRELATION,
        Page::Scatter => SCATTER,
        Page::WrappingUp => WRAPPING_UP,
    }
}

/// Draws every section of `page` as a collapsing header.
///
/// Static pages show their sections expanded.
pub fn render_sections(ui: &mut Ui, page: Page) {
    let open_by_default = matches!(page, Page::About | Page::WrappingUp);

    for section in sections(page) {
        egui::CollapsingHeader::new(RichText::new(section.title).strong())
            .id_salt((page.title(), section.title))
            .default_open(open_by_default)
            .show(ui, |ui| {
                ui.label(section.body);
            });
    }
}
