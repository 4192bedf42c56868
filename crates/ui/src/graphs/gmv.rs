//! GMV combination chart: grouped revenue bars on the left axis, internal
//! revenue lines on the right axis, grouped legend, and month tooltip.

use bevy::prelude::*;
use bevy_egui::egui;

use charts::formatting::{fmt_millions_tick, fmt_thousands_tick};
use charts::gmv::{GmvChart, LegendEntry};
use charts::series::{Axis, SeriesKind, MONTHS_PER_YEAR};
use charts::LegendActivated;

use super::drawing::{
    axis_label, draw_background, draw_broken_line, draw_grid_line, draw_month_labels,
    draw_swatch, highlight_column, legend_text, month_at, nice_axis_max, show_tooltip,
    slot_center, to_color32, value_to_y,
};

const CHART_HEIGHT: f32 = 240.0;
const AXIS_GUTTER: f32 = 60.0;
const LABEL_BAND: f32 = 16.0;
const GRID_DIVISIONS: usize = 5;
const LEGEND_SPACER: f32 = 10.0;
/// Share of a month column occupied by its bar group.
const BAR_GROUP_WIDTH: f32 = 0.8;

pub(crate) fn draw_gmv_panel(
    ui: &mut egui::Ui,
    chart: &GmvChart,
    legend: &mut EventWriter<LegendActivated>,
) {
    draw_legend(ui, chart, legend);
    ui.add_space(6.0);
    draw_combo_chart(ui, chart);
}

fn draw_legend(ui: &mut egui::Ui, chart: &GmvChart, events: &mut EventWriter<LegendActivated>) {
    ui.horizontal_wrapped(|ui| {
        for entry in chart.legend_entries() {
            let clicked = match &entry {
                LegendEntry::Spacer => {
                    ui.add_space(LEGEND_SPACER);
                    false
                }
                LegendEntry::Header {
                    text, all_visible, ..
                } => {
                    let mut rich = egui::RichText::new(text).strong().size(12.0);
                    if !all_visible {
                        rich = rich.weak();
                    }
                    ui.add(egui::Label::new(rich).sense(egui::Sense::click()))
                        .on_hover_cursor(egui::CursorIcon::PointingHand)
                        .clicked()
                }
                LegendEntry::Series {
                    text,
                    swatch,
                    hidden,
                    ..
                } => {
                    draw_swatch(ui, swatch, *hidden);
                    ui.add(egui::Label::new(legend_text(text, *hidden)).sense(egui::Sense::click()))
                        .on_hover_cursor(egui::CursorIcon::PointingHand)
                        .clicked()
                }
            };
            if clicked && entry.is_interactive() {
                events.send(LegendActivated(entry));
            }
        }
    });
}

fn draw_combo_chart(ui: &mut egui::Ui, chart: &GmvChart) {
    let width = ui.available_width().max(360.0);
    let (rect, response) = ui.allocate_exact_size(egui::vec2(width, CHART_HEIGHT), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    draw_background(&painter, rect);

    let plot = egui::Rect::from_min_max(
        egui::pos2(rect.min.x + AXIS_GUTTER, rect.min.y + 8.0),
        egui::pos2(rect.max.x - AXIS_GUTTER, rect.max.y - LABEL_BAND),
    );
    let symbol = chart.currency().symbol.as_str();
    let primary_max = nice_axis_max(chart.axis_max(Axis::Primary));
    let secondary_max = nice_axis_max(chart.axis_max(Axis::Secondary));

    // Both axes share the same grid lines
    for i in 0..=GRID_DIVISIONS {
        let frac = i as f64 / GRID_DIVISIONS as f64;
        let y = value_to_y(frac, 0.0, 1.0, plot);
        draw_grid_line(&painter, plot, y);
        axis_label(
            &painter,
            egui::pos2(plot.min.x - 4.0, y),
            egui::Align2::RIGHT_CENTER,
            fmt_millions_tick(primary_max * frac, symbol),
        );
        axis_label(
            &painter,
            egui::pos2(plot.max.x + 4.0, y),
            egui::Align2::LEFT_CENTER,
            fmt_thousands_tick(secondary_max * frac, symbol),
        );
    }
    draw_month_labels(&painter, plot, chart.month_labels());

    let slot = plot.width() / MONTHS_PER_YEAR as f32;
    let bars: Vec<_> = chart
        .series()
        .iter()
        .filter(|s| s.visible && s.kind == SeriesKind::Bar)
        .collect();
    if !bars.is_empty() {
        let bar_width = slot * BAR_GROUP_WIDTH / bars.len() as f32;
        let group_offset = slot * (1.0 - BAR_GROUP_WIDTH) / 2.0;
        for (b, series) in bars.iter().enumerate() {
            let color = to_color32(series.color);
            for (month, value) in series.values.iter().enumerate() {
                let Some(value) = value else {
                    continue;
                };
                let x = plot.min.x + month as f32 * slot + group_offset + b as f32 * bar_width;
                let top = value_to_y(value, 0.0, primary_max, plot);
                painter.rect_filled(
                    egui::Rect::from_min_max(egui::pos2(x, top), egui::pos2(x + bar_width, plot.max.y)),
                    1.0,
                    color,
                );
            }
        }
    }

    for series in chart
        .series()
        .iter()
        .filter(|s| s.visible && s.kind == SeriesKind::Line)
    {
        let points: Vec<Option<egui::Pos2>> = series
            .values
            .iter()
            .enumerate()
            .map(|(month, value)| {
                value.map(|v| {
                    egui::pos2(
                        slot_center(month, MONTHS_PER_YEAR, plot),
                        value_to_y(v, 0.0, secondary_max, plot),
                    )
                })
            })
            .collect();
        draw_broken_line(&painter, &points, egui::Stroke::new(2.0, to_color32(series.color)));
    }

    let Some(pointer) = response.hover_pos() else {
        return;
    };
    let Some(month) = month_at(pointer.x, MONTHS_PER_YEAR, plot) else {
        return;
    };
    highlight_column(&painter, plot, month, MONTHS_PER_YEAR);
    let tooltip = chart.tooltip(month);
    show_tooltip(
        ui.ctx(),
        "gmv_tooltip",
        pointer,
        Some(&tooltip.title),
        &tooltip.lines,
    );
}
