//! Painter-drawn charts for the EDA tabs.

use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Stroke, Ui, pos2, vec2};

use super::style;
use crate::eda::{CorrelationMatrix, Distribution, ScatterPlot};
use crate::egui_app::view_model;

const AXIS_MARGIN: f32 = 48.0;
const BOTTOM_MARGIN: f32 = 20.0;
const LABEL_FONT: f32 = 11.0;
const MAX_SCATTER_POINTS: usize = 4000;

/// Linear map from a data interval onto a screen interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Scale {
    min: f64,
    max: f64,
    start: f32,
    end: f32,
}

impl Scale {
    /// Degenerate domains are widened by half a unit on each side.
    pub(super) fn new(min: f64, max: f64, start: f32, end: f32) -> Self {
        let (min, max) = if max > min {
            (min, max)
        } else {
            (min - 0.5, max + 0.5)
        };
        Self {
            min,
            max,
            start,
            end,
        }
    }

    pub(super) fn map(&self, value: f64) -> f32 {
        let t = ((value / 2.0 - self.min / 2.0) / (self.max / 2.0 - self.min / 2.0)) as f32;
        self.start + t * (self.end - self.start)
    }
}

/// Smallest and largest value, `None` for an empty input.
pub(super) fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}

fn small_font() -> FontId {
    FontId::proportional(LABEL_FONT)
}

/// Horizontal bars, one row per `(label, value)`.
pub(super) fn bar_chart(ui: &mut Ui, rows: &[(String, f64)], color: Color32) {
    let palette = style::palette();
    let row_height = 18.0;
    let label_width = 120.0;
    let value_width = 64.0;
    let width = ui.available_width().max(320.0);
    let height = row_height * rows.len().max(1) as f32 + 8.0;
    let (rect, _) = ui.allocate_exact_size(vec2(width, height), Sense::hover());
    let painter = ui.painter_at(rect);
    let (min, max) = extent(rows.iter().map(|(_, value)| *value)).unwrap_or((0.0, 1.0));
    let scale = Scale::new(
        min.min(0.0),
        max.max(0.0),
        rect.left() + label_width,
        rect.right() - value_width,
    );
    let zero = scale.map(0.0);
    for (index, (label, value)) in rows.iter().enumerate() {
        let top = rect.top() + 4.0 + index as f32 * row_height;
        let center = top + row_height * 0.5;
        painter.text(
            pos2(rect.left(), center),
            Align2::LEFT_CENTER,
            label,
            small_font(),
            palette.text_primary,
        );
        let end = scale.map(*value);
        let bar = Rect::from_min_max(
            pos2(zero.min(end), top + 2.0),
            pos2(zero.max(end), top + row_height - 2.0),
        );
        painter.rect_filled(bar, 0.0, color);
        painter.text(
            pos2(rect.right() - value_width + 6.0, center),
            Align2::LEFT_CENTER,
            view_model::format_stat(Some(*value)),
            small_font(),
            palette.text_muted,
        );
    }
}

/// Annotated correlation heatmap.
pub(super) fn heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let palette = style::palette();
    let n = matrix.len();
    if n == 0 {
        ui.label(muted("No numeric columns to correlate."));
        return;
    }
    let label_width = 80.0;
    let cell = ((ui.available_width() - label_width) / n as f32).clamp(32.0, 72.0);
    let size = vec2(label_width + cell * n as f32, cell * n as f32 + BOTTOM_MARGIN);
    let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    let origin = rect.min + vec2(label_width, 0.0);
    for row in 0..n {
        painter.text(
            pos2(rect.left(), origin.y + (row as f32 + 0.5) * cell),
            Align2::LEFT_CENTER,
            &matrix.labels[row],
            small_font(),
            palette.text_primary,
        );
        for col in 0..n {
            let min = origin + vec2(col as f32 * cell, row as f32 * cell);
            let cell_rect = Rect::from_min_size(min, vec2(cell, cell)).shrink(1.0);
            let fill = match matrix.get(row, col) {
                Some(value) => style::correlation_color(value),
                None => palette.bg_primary,
            };
            painter.rect_filled(cell_rect, 0.0, fill);
            painter.text(
                cell_rect.center(),
                Align2::CENTER_CENTER,
                view_model::correlation_label(matrix, row, col),
                small_font(),
                Color32::WHITE,
            );
        }
    }
    for (col, label) in matrix.labels.iter().enumerate() {
        painter.text(
            pos2(origin.x + (col as f32 + 0.5) * cell, origin.y + n as f32 * cell + 3.0),
            Align2::CENTER_TOP,
            label,
            small_font(),
            palette.text_muted,
        );
    }
    if let Some(pointer) = response.hover_pos() {
        let offset = pointer - origin;
        if offset.x >= 0.0 && offset.y >= 0.0 {
            let (col, row) = ((offset.x / cell) as usize, (offset.y / cell) as usize);
            if row < n && col < n {
                let value = matrix
                    .get(row, col)
                    .map(|value| format!("{value:.4}"))
                    .unwrap_or_else(|| "undefined".into());
                response.on_hover_text(format!(
                    "{} vs {}: {value}",
                    matrix.labels[row], matrix.labels[col]
                ));
            }
        }
    }
}

/// Histogram with a box-plot margin above it.
pub(super) fn distribution_chart(ui: &mut Ui, distribution: &Distribution, color: Color32) {
    let palette = style::palette();
    let box_height = 30.0;
    let hist_height = 140.0;
    let width = ui.available_width().max(320.0);
    let (rect, _) = ui.allocate_exact_size(
        vec2(width, box_height + hist_height + BOTTOM_MARGIN),
        Sense::hover(),
    );
    let painter = ui.painter_at(rect);
    let histogram = &distribution.histogram;
    let plot_left = rect.left() + AXIS_MARGIN;
    let plot_right = rect.right() - 8.0;
    let x = Scale::new(histogram.min, histogram.max, plot_left, plot_right);

    let boxplot = &distribution.boxplot;
    let mid = rect.top() + box_height * 0.5;
    let stroke = Stroke::new(1.0, color);
    painter.line_segment(
        [
            pos2(x.map(boxplot.lower_whisker), mid),
            pos2(x.map(boxplot.upper_whisker), mid),
        ],
        stroke,
    );
    for whisker in [boxplot.lower_whisker, boxplot.upper_whisker] {
        painter.line_segment(
            [pos2(x.map(whisker), mid - 6.0), pos2(x.map(whisker), mid + 6.0)],
            stroke,
        );
    }
    let quartiles = Rect::from_min_max(
        pos2(x.map(boxplot.q1), mid - 9.0),
        pos2(x.map(boxplot.q3).max(x.map(boxplot.q1) + 1.0), mid + 9.0),
    );
    painter.rect_filled(quartiles, 0.0, palette.bg_tertiary);
    painter.line_segment(
        [quartiles.left_top(), quartiles.right_top()],
        stroke,
    );
    painter.line_segment(
        [quartiles.left_bottom(), quartiles.right_bottom()],
        stroke,
    );
    painter.line_segment(
        [
            pos2(x.map(boxplot.median), mid - 9.0),
            pos2(x.map(boxplot.median), mid + 9.0),
        ],
        Stroke::new(2.0, color),
    );
    for outlier in &boxplot.outliers {
        painter.circle_stroke(pos2(x.map(*outlier), mid), 2.0, stroke);
    }

    let hist_top = rect.top() + box_height;
    let hist_bottom = hist_top + hist_height;
    let max_count = histogram.max_count().max(1);
    let y = Scale::new(0.0, max_count as f64, hist_bottom, hist_top + 4.0);
    for (index, count) in histogram.counts.iter().enumerate() {
        if *count == 0 {
            continue;
        }
        let (lo, hi) = histogram.bin_range(index);
        let bar = Rect::from_min_max(
            pos2(x.map(lo), y.map(*count as f64)),
            pos2(x.map(hi), hist_bottom),
        )
        .shrink2(vec2(0.5, 0.0));
        painter.rect_filled(bar, 0.0, color);
    }
    painter.line_segment(
        [pos2(plot_left, hist_bottom), pos2(plot_right, hist_bottom)],
        Stroke::new(1.0, palette.grid_strong),
    );
    painter.text(
        pos2(plot_left - 4.0, hist_top + 4.0),
        Align2::RIGHT_TOP,
        max_count.to_string(),
        small_font(),
        palette.text_muted,
    );
    painter.text(
        pos2(plot_left - 4.0, hist_bottom),
        Align2::RIGHT_BOTTOM,
        "0",
        small_font(),
        palette.text_muted,
    );
    axis_extremes(&painter, histogram.min, histogram.max, plot_left, plot_right, hist_bottom);
}

/// Scatter of pollutant against target, coloured by group, with per-group trend lines.
pub(super) fn scatter_chart(ui: &mut Ui, plot: &ScatterPlot) {
    let palette = style::palette();
    let points = plot.groups.iter().flat_map(|group| group.points.iter());
    let Some((x_min, x_max)) = extent(points.clone().map(|(x, _)| *x)) else {
        ui.label(muted("No rows with both values present."));
        return;
    };
    let (y_min, y_max) = extent(points.map(|(_, y)| *y)).unwrap_or((0.0, 1.0));
    let width = ui.available_width().max(320.0);
    let (rect, _) = ui.allocate_exact_size(vec2(width, 240.0 + BOTTOM_MARGIN), Sense::hover());
    let painter = ui.painter_at(rect);
    let plot_rect = Rect::from_min_max(
        pos2(rect.left() + AXIS_MARGIN, rect.top() + 6.0),
        pos2(rect.right() - 8.0, rect.bottom() - BOTTOM_MARGIN),
    );
    painter.rect_filled(plot_rect, 0.0, style::compartment_fill());
    let x = Scale::new(x_min, x_max, plot_rect.left(), plot_rect.right());
    let y = Scale::new(y_min, y_max, plot_rect.bottom(), plot_rect.top());
    let stride = plot.point_count().div_ceil(MAX_SCATTER_POINTS).max(1);

    for (index, group) in plot.groups.iter().enumerate() {
        let base = style::series_color(index);
        let dot = Color32::from_rgba_unmultiplied(base.r(), base.g(), base.b(), 150);
        for (px, py) in group.points.iter().step_by(stride) {
            painter.circle_filled(pos2(x.map(*px), y.map(*py)), 2.0, dot);
        }
        if let Some(trend) = group.trend
            && let Some((gx_min, gx_max)) = extent(group.points.iter().map(|(px, _)| *px))
        {
            painter.line_segment(
                [
                    pos2(x.map(gx_min), y.map(trend.at(gx_min))),
                    pos2(x.map(gx_max), y.map(trend.at(gx_max))),
                ],
                Stroke::new(1.5, base),
            );
        }
    }
    painter.text(
        pos2(plot_rect.left() - 4.0, plot_rect.top()),
        Align2::RIGHT_TOP,
        view_model::axis_label(y_max),
        small_font(),
        palette.text_muted,
    );
    painter.text(
        pos2(plot_rect.left() - 4.0, plot_rect.bottom()),
        Align2::RIGHT_BOTTOM,
        view_model::axis_label(y_min),
        small_font(),
        palette.text_muted,
    );
    painter.text(
        pos2(plot_rect.left() + 4.0, plot_rect.top() + 2.0),
        Align2::LEFT_TOP,
        &plot.target,
        small_font(),
        palette.text_primary,
    );
    axis_extremes(&painter, x_min, x_max, plot_rect.left(), plot_rect.right(), plot_rect.bottom());
    painter.text(
        pos2(plot_rect.center().x, plot_rect.bottom() + 3.0),
        Align2::CENTER_TOP,
        plot.pollutant.column_name(),
        small_font(),
        palette.text_primary,
    );
}

/// Colour swatches keyed like [`scatter_chart`] groups.
pub(super) fn legend<'a>(ui: &mut Ui, keys: impl Iterator<Item = &'a str>) {
    ui.horizontal_wrapped(|ui| {
        for (index, key) in keys.enumerate() {
            let (swatch, _) = ui.allocate_exact_size(vec2(10.0, 10.0), Sense::hover());
            ui.painter()
                .rect_filled(swatch, 0.0, style::series_color(index));
            ui.label(egui::RichText::new(key).size(LABEL_FONT));
            ui.add_space(6.0);
        }
    });
}

fn axis_extremes(painter: &egui::Painter, min: f64, max: f64, left: f32, right: f32, baseline: f32) {
    let palette = style::palette();
    painter.text(
        pos2(left, baseline + 3.0),
        Align2::LEFT_TOP,
        view_model::axis_label(min),
        small_font(),
        palette.text_muted,
    );
    painter.text(
        pos2(right, baseline + 3.0),
        Align2::RIGHT_TOP,
        view_model::axis_label(max),
        small_font(),
        palette.text_muted,
    );
}

pub(super) fn muted(text: &str) -> egui::RichText {
    egui::RichText::new(text).color(style::palette().text_muted)
}
