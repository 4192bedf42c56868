//! Shared drawing helpers for the dashboard charts: colour conversion, value
//! and month mapping, grid lines, legend swatches, and hover tooltips.

use std::f32::consts::{FRAC_PI_2, TAU};

use bevy::color::Srgba;
use bevy_egui::egui;

use charts::gmv::Swatch;

pub(crate) const CHART_BG: egui::Color32 = egui::Color32::from_gray(30);
pub(crate) const GRID_COLOR: egui::Color32 = egui::Color32::from_gray(50);
pub(crate) const AXIS_TEXT: egui::Color32 = egui::Color32::from_gray(160);

const HIDDEN_SWATCH_ALPHA: f32 = 0.35;
const SWATCH_SIZE: f32 = 12.0;

pub(crate) fn to_color32(color: Srgba) -> egui::Color32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(
        channel(color.red),
        channel(color.green),
        channel(color.blue),
        channel(color.alpha),
    )
}

/// Rounds an axis maximum up to 1, 2, 2.5 or 5 times a power of ten.
/// Empty axes get a unit range so nothing divides by zero.
pub(crate) fn nice_axis_max(max: f64) -> f64 {
    if !max.is_finite() || max <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(max.log10().floor());
    for step in [1.0, 2.0, 2.5, 5.0, 10.0] {
        if step * magnitude >= max {
            return step * magnitude;
        }
    }
    10.0 * magnitude
}

/// Screen y for `value` on an axis spanning `min..=max` inside `plot`.
pub(crate) fn value_to_y(value: f64, min: f64, max: f64, plot: egui::Rect) -> f32 {
    if max <= min {
        return plot.max.y;
    }
    let t = ((value - min) / (max - min)).clamp(0.0, 1.0) as f32;
    plot.max.y - t * plot.height()
}

/// Centre x of the `index`-th of `slots` equal columns.
pub(crate) fn slot_center(index: usize, slots: usize, plot: egui::Rect) -> f32 {
    let width = plot.width() / slots.max(1) as f32;
    plot.min.x + (index as f32 + 0.5) * width
}

/// Column under screen x, if it lies inside the plot.
pub(crate) fn month_at(x: f32, slots: usize, plot: egui::Rect) -> Option<usize> {
    if slots == 0 || x < plot.min.x || x > plot.max.x || plot.width() <= 0.0 {
        return None;
    }
    let index = ((x - plot.min.x) * slots as f32 / plot.width()).floor() as usize;
    Some(index.min(slots - 1))
}

/// Segments joining consecutive present points. A `None` breaks the line.
pub(crate) fn line_segments(points: &[Option<egui::Pos2>]) -> Vec<[egui::Pos2; 2]> {
    points
        .windows(2)
        .filter_map(|pair| match (pair[0], pair[1]) {
            (Some(a), Some(b)) => Some([a, b]),
            _ => None,
        })
        .collect()
}

/// Clockwise position around `center` as a fraction of a full turn,
/// starting at twelve o'clock.
pub(crate) fn angle_fraction(center: egui::Pos2, pos: egui::Pos2) -> f32 {
    let v = pos - center;
    ((v.y.atan2(v.x) + FRAC_PI_2) / TAU).rem_euclid(1.0)
}

/// Index of the slice covering `t` (a fraction of a full turn).
pub(crate) fn slice_at(fractions: &[f64], t: f32) -> Option<usize> {
    let t = f64::from(t);
    let mut start = 0.0;
    for (i, &fraction) in fractions.iter().enumerate() {
        let end = start + fraction;
        if fraction > 0.0 && t >= start && t < end {
            return Some(i);
        }
        start = end;
    }
    None
}

pub(crate) fn draw_background(painter: &egui::Painter, rect: egui::Rect) {
    painter.rect_filled(rect, 2.0, CHART_BG);
}

pub(crate) fn draw_grid_line(painter: &egui::Painter, plot: egui::Rect, y: f32) {
    painter.line_segment(
        [egui::pos2(plot.min.x, y), egui::pos2(plot.max.x, y)],
        egui::Stroke::new(0.3, GRID_COLOR),
    );
}

pub(crate) fn axis_label(painter: &egui::Painter, pos: egui::Pos2, anchor: egui::Align2, text: String) {
    painter.text(pos, anchor, text, egui::FontId::proportional(9.0), AXIS_TEXT);
}

/// Category labels centred under each column.
pub(crate) fn draw_month_labels(painter: &egui::Painter, plot: egui::Rect, labels: &[String]) {
    for (i, label) in labels.iter().enumerate() {
        axis_label(
            painter,
            egui::pos2(slot_center(i, labels.len(), plot), plot.max.y + 3.0),
            egui::Align2::CENTER_TOP,
            label.clone(),
        );
    }
}

pub(crate) fn draw_broken_line(painter: &egui::Painter, points: &[Option<egui::Pos2>], stroke: egui::Stroke) {
    for segment in line_segments(points) {
        painter.line_segment(segment, stroke);
    }
    for point in points.iter().flatten() {
        painter.circle_filled(*point, 2.5, stroke.color);
    }
}

/// Translucent band over the hovered column.
pub(crate) fn highlight_column(painter: &egui::Painter, plot: egui::Rect, index: usize, slots: usize) {
    let width = plot.width() / slots.max(1) as f32;
    let x = plot.min.x + index as f32 * width;
    painter.rect_filled(
        egui::Rect::from_min_max(egui::pos2(x, plot.min.y), egui::pos2(x + width, plot.max.y)),
        0.0,
        egui::Color32::from_white_alpha(12),
    );
}

/// Colour sample for a legend entry; faded when the series is hidden.
pub(crate) fn draw_swatch(ui: &mut egui::Ui, swatch: &Swatch, hidden: bool) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(SWATCH_SIZE, SWATCH_SIZE), egui::Sense::hover());
    let mut color = to_color32(swatch.color());
    if hidden {
        color = color.gamma_multiply(HIDDEN_SWATCH_ALPHA);
    }
    match swatch {
        Swatch::Fill(_) => ui.painter().rect_filled(rect, 2.0, color),
        Swatch::Stroke { width, .. } => ui.painter().rect_stroke(
            rect,
            2.0,
            egui::Stroke::new(*width, color),
            egui::StrokeKind::Inside,
        ),
    };
}

/// Legend text, struck through while its series is hidden.
pub(crate) fn legend_text(text: &str, hidden: bool) -> egui::RichText {
    let rich = egui::RichText::new(text).size(12.0);
    if hidden {
        rich.strikethrough().weak()
    } else {
        rich
    }
}

/// Floating tooltip next to the pointer. Empty lines become small gaps.
pub(crate) fn show_tooltip(
    ctx: &egui::Context,
    id: &str,
    pointer: egui::Pos2,
    title: Option<&str>,
    lines: &[String],
) {
    egui::Area::new(egui::Id::new(id))
        .fixed_pos(pointer + egui::vec2(16.0, 16.0))
        .interactable(false)
        .order(egui::Order::Tooltip)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .fill(egui::Color32::from_rgba_premultiplied(20, 20, 20, 230))
                .show(ui, |ui| {
                    if let Some(title) = title {
                        ui.label(egui::RichText::new(title).strong().size(13.0));
                    }
                    for line in lines {
                        if line.is_empty() {
                            ui.add_space(4.0);
                        } else {
                            ui.label(egui::RichText::new(line).size(12.0));
                        }
                    }
                });
        });
}
