//! Contracts-by-year line chart on a fixed axis.

use bevy::prelude::*;
use bevy_egui::egui;

use charts::contracts::ContractsChart;
use charts::gmv::{Swatch, LINE_SWATCH_WIDTH};
use charts::ContractsLegendActivated;

use super::drawing::{
    axis_label, draw_background, draw_broken_line, draw_grid_line, draw_month_labels,
    draw_swatch, highlight_column, legend_text, month_at, show_tooltip, slot_center, to_color32,
    value_to_y,
};

const CHART_HEIGHT: f32 = 220.0;
const AXIS_GUTTER: f32 = 36.0;
const LABEL_BAND: f32 = 16.0;

pub(crate) fn draw_contracts_panel(
    ui: &mut egui::Ui,
    chart: &ContractsChart,
    no_data: &str,
    legend: &mut EventWriter<ContractsLegendActivated>,
) {
    // Legend sits top-right
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        for (index, line) in chart.lines.iter().enumerate().rev() {
            let text = line.year.to_string();
            let clicked = ui
                .add(egui::Label::new(legend_text(&text, !line.visible)).sense(egui::Sense::click()))
                .on_hover_cursor(egui::CursorIcon::PointingHand)
                .clicked();
            draw_swatch(
                ui,
                &Swatch::Stroke {
                    color: line.color,
                    width: LINE_SWATCH_WIDTH,
                },
                !line.visible,
            );
            if clicked {
                legend.send(ContractsLegendActivated(index));
            }
        }
    });
    ui.add_space(6.0);

    let slots = chart.labels.len();
    if slots == 0 {
        ui.label(no_data);
        return;
    }

    let width = ui.available_width().max(320.0);
    let (rect, response) = ui.allocate_exact_size(egui::vec2(width, CHART_HEIGHT), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    draw_background(&painter, rect);

    let plot = egui::Rect::from_min_max(
        egui::pos2(rect.min.x + AXIS_GUTTER, rect.min.y + 8.0),
        egui::pos2(rect.max.x - 8.0, rect.max.y - LABEL_BAND),
    );
    let axis = chart.axis;
    for tick in axis.ticks() {
        let y = value_to_y(tick, axis.min, axis.max, plot);
        draw_grid_line(&painter, plot, y);
        axis_label(
            &painter,
            egui::pos2(plot.min.x - 4.0, y),
            egui::Align2::RIGHT_CENTER,
            format!("{tick}"),
        );
    }
    draw_month_labels(&painter, plot, &chart.labels);

    for line in chart.lines.iter().filter(|l| l.visible) {
        let points: Vec<Option<egui::Pos2>> = line
            .values
            .iter()
            .take(slots)
            .enumerate()
            .map(|(month, value)| {
                value.map(|v| {
                    egui::pos2(
                        slot_center(month, slots, plot),
                        value_to_y(v, axis.min, axis.max, plot),
                    )
                })
            })
            .collect();
        draw_broken_line(&painter, &points, egui::Stroke::new(2.0, to_color32(line.color)));
    }

    let Some(pointer) = response.hover_pos() else {
        return;
    };
    let Some(month) = month_at(pointer.x, slots, plot) else {
        return;
    };
    highlight_column(&painter, plot, month, slots);
    show_tooltip(
        ui.ctx(),
        "contracts_tooltip",
        pointer,
        chart.labels.get(month).map(String::as_str),
        &chart.tooltip_lines(month),
    );
}
