//! Chart widgets shared by the analysis pages.
//!
//! Bar, point and histogram charts are drawn with `egui_plot`. Heatmaps are painted
//! directly, one rectangle per cell, since `egui_plot` has no matrix chart.

use egui::{
    Align2, Color32, FontId, Pos2, Rect, Response, Sense, Stroke, StrokeKind, Ui, Vec2, pos2,
    vec2,
};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, PlotPoints, Points};

/// Qualitative palette for category series (Tableau 10).
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(31, 119, 180),
    Color32::from_rgb(255, 127, 14),
    Color32::from_rgb(44, 160, 44),
    Color32::from_rgb(214, 39, 40),
    Color32::from_rgb(148, 103, 189),
    Color32::from_rgb(140, 86, 75),
    Color32::from_rgb(227, 119, 194),
    Color32::from_rgb(127, 127, 127),
    Color32::from_rgb(188, 189, 34),
    Color32::from_rgb(23, 190, 207),
];

/// Single-series color for the pair grid.
pub const DODGER_BLUE: Color32 = Color32::from_rgb(30, 144, 255);

/// Color of the i-th category, cycling through `PALETTE`.
pub fn series_color(index: usize) -> Color32 {
    PALETTE[index % PALETTE.len()]
}

/// Stops of the red-blue diverging scale, blue at -1 and red at +1.
const DIVERGING_STOPS: [(f64, [u8; 3]); 5] = [
    (-1.0, [5, 48, 97]),
    (-0.5, [67, 147, 195]),
    (0.0, [247, 247, 247]),
    (0.5, [214, 96, 77]),
    (1.0, [103, 0, 31]),
];

/// Maps a coefficient in `[-1, 1]` to the diverging scale. NaN maps to gray.
pub fn diverging_color(value: f64) -> Color32 {
    if value.is_nan() {
        return Color32::from_gray(160);
    }
    let v = value.clamp(-1.0, 1.0);

    let upper = DIVERGING_STOPS
        .iter()
        .position(|(stop, _)| v <= *stop)
        .unwrap_or(DIVERGING_STOPS.len() - 1)
        .max(1);
    let (lo, lo_rgb) = DIVERGING_STOPS[upper - 1];
    let (hi, hi_rgb) = DIVERGING_STOPS[upper];
    let t = (v - lo) / (hi - lo);

    let channel = |i: usize| {
        let a = lo_rgb[i] as f64;
        let b = hi_rgb[i] as f64;
        (a + (b - a) * t).round() as u8
    };
    Color32::from_rgb(channel(0), channel(1), channel(2))
}

/// Black or white, whichever reads better on `background`.
fn text_color_on(background: Color32) -> Color32 {
    let [r, g, b, _] = background.to_array();
    let luminance = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    if luminance > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

/// One bar per category, each in its own color and named in the legend.
pub fn category_bar_chart(
    ui: &mut Ui,
    id: &str,
    axis_label: &str,
    categories: &[(String, f64)],
    height: f32,
) -> Response {
    Plot::new(id)
        .height(height)
        .legend(Legend::default())
        .y_axis_label(axis_label)
        .show_x(false)
        .allow_drag(false)
        .allow_scroll(false)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            for (index, (label, value)) in categories.iter().enumerate() {
                let bar = Bar::new(index as f64, *value)
                    .width(0.8)
                    .name(label)
                    .fill(series_color(index));
                let chart = BarChart::new(label.as_str(), vec![bar]).color(series_color(index));
                plot_ui.bar_chart(chart);
            }
        })
        .response
}

/// Histogram from bin edges (`counts.len() + 1` of them) and counts.
pub fn histogram_chart(ui: &mut Ui, id: &str, edges: &[f64], counts: &[usize], size: f32) -> Response {
    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let (lo, hi) = (edges[i], edges[i + 1]);
            Bar::new((lo + hi) / 2.0, count as f64)
                .width((hi - lo).max(f64::EPSILON))
                .fill(DODGER_BLUE)
                .stroke(Stroke::new(1.0, Color32::BLACK))
        })
        .collect();

    compact_plot(id, size)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(id, bars));
        })
        .response
}

/// Scatter of a single series in a small fixed-size cell.
pub fn compact_scatter(ui: &mut Ui, id: &str, points: Vec<[f64; 2]>, size: f32) -> Response {
    compact_plot(id, size)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(id, PlotPoints::new(points))
                    .radius(2.0)
                    .color(DODGER_BLUE.gamma_multiply(0.7)),
            );
        })
        .response
}

fn compact_plot(id: &str, size: f32) -> Plot<'_> {
    Plot::new(id)
        .width(size)
        .height(size)
        .show_axes([true, true])
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
}

/// A named group of points drawn in one color.
pub struct PointSeries<'a> {
    pub name: &'a str,
    pub points: Vec<[f64; 2]>,
}

/// Interactive scatter plot with one colored series per group.
///
/// Returns the index `(series, point)` of the point under the pointer, if any,
/// so the caller can show its hover metadata.
pub fn grouped_scatter(
    ui: &mut Ui,
    id: &str,
    x_label: &str,
    y_label: &str,
    series: &[PointSeries<'_>],
    height: f32,
) -> (Response, Option<(usize, usize)>) {
    let plot_response = Plot::new(id)
        .height(height)
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .show(ui, |plot_ui| {
            for (index, s) in series.iter().enumerate() {
                plot_ui.points(
                    Points::new(s.name, PlotPoints::new(s.points.clone()))
                        .radius(3.0)
                        .color(series_color(index)),
                );
            }
        });

    let response = plot_response.response;
    let transform = plot_response.transform;

    // Nearest point in screen space, within a few pixels of the pointer.
    let hovered = response.hover_pos().and_then(|pointer| {
        let max_distance_sq = 8.0_f32 * 8.0;
        series
            .iter()
            .enumerate()
            .flat_map(|(si, s)| s.points.iter().enumerate().map(move |(pi, p)| (si, pi, p)))
            .map(|(si, pi, p)| {
                let screen = transform.position_from_point(&PlotPoint::new(p[0], p[1]));
                (si, pi, screen.distance_sq(pointer))
            })
            .filter(|(_, _, d)| *d <= max_distance_sq)
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(si, pi, _)| (si, pi))
    });

    (response, hovered)
}

/// A square matrix of values painted as colored cells.
pub struct Heatmap<'a> {
    pub labels: &'a [String],
    /// Row-major cell values; `None` cells are masked (left blank).
    pub cell: &'a dyn Fn(usize, usize) -> Option<f64>,
    /// Print the value inside each visible cell.
    pub annotate: bool,
}

impl Heatmap<'_> {
    /// Paints the heatmap and shows the hovered cell as a tooltip.
    pub fn show(&self, ui: &mut Ui, cell_size: f32) -> Response {
        let n = self.labels.len();
        let label_width = 120.0;
        let label_height = 90.0;
        let size = vec2(
            label_width + cell_size * n as f32,
            label_height + cell_size * n as f32,
        );

        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let origin = response.rect.min + vec2(label_width, 0.0);
        let font = FontId::proportional(11.0);
        let text_color = ui.visuals().text_color();

        let cell_rect = |row: usize, col: usize| {
            Rect::from_min_size(
                origin + vec2(col as f32 * cell_size, row as f32 * cell_size),
                Vec2::splat(cell_size),
            )
        };

        for row in 0..n {
            for col in 0..n {
                let Some(value) = (self.cell)(row, col) else {
                    continue;
                };
                let rect = cell_rect(row, col).shrink(0.5);
                let fill = diverging_color(value);
                painter.rect_filled(rect, 0.0, fill);

                if self.annotate && !value.is_nan() && cell_size >= 24.0 {
                    painter.text(
                        rect.center(),
                        Align2::CENTER_CENTER,
                        format!("{value:.2}"),
                        font.clone(),
                        text_color_on(fill),
                    );
                }
            }
        }

        // Row labels on the left, column labels below the matrix.
        for (i, label) in self.labels.iter().enumerate() {
            let row_center = cell_rect(i, 0).left_center() - vec2(6.0, 0.0);
            painter.text(row_center, Align2::RIGHT_CENTER, label, font.clone(), text_color);

            let col_anchor = pos2(
                cell_rect(0, i).center().x,
                origin.y + cell_size * n as f32 + 4.0,
            );
            paint_vertical_label(&painter, col_anchor, label, font.clone(), text_color);
        }

        let grid = Rect::from_min_size(origin, Vec2::splat(cell_size * n as f32));
        painter.rect_stroke(
            grid,
            0.0,
            Stroke::new(1.0, ui.visuals().weak_text_color()),
            StrokeKind::Outside,
        );

        let hovered = response
            .hover_pos()
            .and_then(|pos| grid_cell_at(pos, origin, cell_size, n))
            .and_then(|(row, col)| (self.cell)(row, col).map(|value| (row, col, value)));

        match hovered {
            Some((row, col, value)) => response.on_hover_text_at_pointer(format!(
                "{} vs {}\nr = {}",
                self.labels[row],
                self.labels[col],
                format_coefficient(value)
            )),
            None => response,
        }
    }
}

/// `(row, col)` of the `n × n` grid cell under `pos`.
///
/// `None` outside the grid, including on its right and bottom edges.
fn grid_cell_at(pos: Pos2, origin: Pos2, cell_size: f32, n: usize) -> Option<(usize, usize)> {
    let offset = pos - origin;
    if offset.x < 0.0 || offset.y < 0.0 || cell_size <= 0.0 {
        return None;
    }
    let col = (offset.x / cell_size) as usize;
    let row = (offset.y / cell_size) as usize;
    (row < n && col < n).then_some((row, col))
}

/// Coefficient with two decimals, or "n/a" when undefined.
pub fn format_coefficient(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{value:.2}")
    }
}

/// Writes a column label one character per line, top-aligned at `anchor`.
fn paint_vertical_label(
    painter: &egui::Painter,
    anchor: Pos2,
    label: &str,
    font: FontId,
    color: Color32,
) {
    let line_height = font.size;
    for (i, ch) in label.chars().take(8).enumerate() {
        painter.text(
            anchor + vec2(0.0, i as f32 * line_height),
            Align2::CENTER_TOP,
            ch,
            font.clone(),
            color,
        );
    }
}

/// Rows × columns boolean mask painted as a heatmap: missing cells are dark.
pub fn missing_heatmap(
    ui: &mut Ui,
    columns: &[String],
    rows: usize,
    masks: &[Vec<bool>],
    height: f32,
) -> Response {
    let column_width = ((ui.available_width() - 20.0) / columns.len().max(1) as f32).clamp(12.0, 48.0);
    let label_height = 90.0;
    let size = vec2(column_width * columns.len() as f32, height + label_height);

    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min;
    let row_height = height / rows.max(1) as f32;
    let font = FontId::proportional(11.0);
    let text_color = ui.visuals().text_color();

    let present = Color32::from_rgb(247, 251, 255);
    let missing = Color32::from_rgb(8, 48, 107);

    painter.rect_filled(
        Rect::from_min_size(origin, vec2(size.x, height)),
        0.0,
        present,
    );

    for (c, (mask, column)) in masks.iter().zip(columns).enumerate() {
        let x = origin.x + c as f32 * column_width;
        for (r, _) in mask.iter().enumerate().filter(|(_, is_missing)| **is_missing) {
            let y = origin.y + r as f32 * row_height;
            let rect = Rect::from_min_size(pos2(x, y), vec2(column_width, row_height.max(1.0)));
            painter.rect_filled(rect, 0.0, missing);
        }

        let anchor = pos2(x + column_width / 2.0, origin.y + height + 4.0);
        paint_vertical_label(&painter, anchor, column, font.clone(), text_color);
    }

    let hovered_column = response
        .hover_pos()
        .filter(|pos| pos.y <= origin.y + height)
        .filter(|pos| pos.x >= origin.x)
        .map(|pos| ((pos.x - origin.x) / column_width) as usize)
        .and_then(|c| Some((columns.get(c)?, masks.get(c)?)));

    match hovered_column {
        Some((column, mask)) => {
            let count = mask.iter().filter(|m| **m).count();
            response.on_hover_text_at_pointer(format!("{column}: {count} missing"))
        }
        None => response,
    }
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//

/// Run tests with:
/// cargo test -- --show-output tests_charts
#[cfg(test)]
mod tests_charts {
    use super::*;

    #[test]
    fn test_diverging_color_endpoints() {
        assert_eq!(diverging_color(-1.0), Color32::from_rgb(5, 48, 97));
        assert_eq!(diverging_color(0.0), Color32::from_rgb(247, 247, 247));
        assert_eq!(diverging_color(1.0), Color32::from_rgb(103, 0, 31));
        assert_eq!(diverging_color(f64::NAN), Color32::from_gray(160));
    }

    #[test]
    fn test_diverging_color_clamps_and_interpolates() {
        assert_eq!(diverging_color(-3.0), diverging_color(-1.0));
        assert_eq!(diverging_color(3.0), diverging_color(1.0));
        // Halfway between the 0.0 and 0.5 stops.
        let [r, g, b, _] = diverging_color(0.25).to_array();
        assert_eq!((r, g, b), (231, 172, 162));
    }

    #[test]
    fn test_text_color_contrast() {
        assert_eq!(text_color_on(Color32::from_rgb(247, 247, 247)), Color32::BLACK);
        assert_eq!(text_color_on(Color32::from_rgb(5, 48, 97)), Color32::WHITE);
    }

    #[test]
    fn test_series_color_cycles() {
        assert_eq!(series_color(0), series_color(PALETTE.len()));
        assert_ne!(series_color(0), series_color(1));
    }

    #[test]
    fn test_grid_cell_at_inside() {
        let origin = pos2(100.0, 50.0);
        assert_eq!(grid_cell_at(origin, origin, 10.0, 3), Some((0, 0)));
        assert_eq!(grid_cell_at(pos2(125.0, 61.0), origin, 10.0, 3), Some((1, 2)));
    }

    #[test]
    fn test_grid_cell_at_rejects_edges_and_outside() {
        let origin = pos2(100.0, 50.0);
        // Bottom and right edges belong to no cell.
        assert_eq!(grid_cell_at(pos2(105.0, 80.0), origin, 10.0, 3), None);
        assert_eq!(grid_cell_at(pos2(130.0, 55.0), origin, 10.0, 3), None);
        assert_eq!(grid_cell_at(pos2(99.0, 55.0), origin, 10.0, 3), None);
        assert_eq!(grid_cell_at(pos2(105.0, 55.0), origin, 10.0, 0), None);
    }

    #[test]
    fn test_format_coefficient() {
        assert_eq!(format_coefficient(0.123), "0.12");
        assert_eq!(format_coefficient(f64::NAN), "n/a");
    }
}
