//! Outbound vs. inbound doughnut.

use bevy::prelude::*;
use bevy_egui::egui;

use charts::gmv::Swatch;
use charts::lead_source::LeadSourceChart;
use charts::LeadSourceLegendActivated;

use super::drawing::{
    angle_fraction, draw_swatch, legend_text, show_tooltip, slice_at, to_color32, AXIS_TEXT,
    GRID_COLOR,
};

const OUTER_RADIUS: f32 = 80.0;
const RING_WIDTH: f32 = 28.0;
const ARC_STEPS: f32 = 96.0;

pub(crate) fn draw_lead_source_panel(
    ui: &mut egui::Ui,
    chart: &LeadSourceChart,
    no_data: &str,
    legend: &mut EventWriter<LeadSourceLegendActivated>,
) {
    ui.horizontal(|ui| {
        for index in chart.legend_order() {
            let slice = &chart.slices[index];
            draw_swatch(ui, &Swatch::Fill(slice.color), !slice.visible);
            let clicked = ui
                .add(egui::Label::new(legend_text(&slice.label, !slice.visible)).sense(egui::Sense::click()))
                .on_hover_cursor(egui::CursorIcon::PointingHand)
                .clicked();
            if clicked {
                legend.send(LeadSourceLegendActivated(index));
            }
        }
    });
    ui.add_space(6.0);

    let size = OUTER_RADIUS * 2.0 + 8.0;
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let mid_radius = OUTER_RADIUS - RING_WIDTH / 2.0;

    let fractions: Vec<f64> = (0..chart.slices.len()).map(|i| chart.fraction(i)).collect();
    if fractions.iter().all(|f| *f <= 0.0) {
        painter.circle_stroke(center, mid_radius, egui::Stroke::new(RING_WIDTH, GRID_COLOR));
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            no_data,
            egui::FontId::proportional(11.0),
            AXIS_TEXT,
        );
        return;
    }

    let mut start = 0.0f32;
    for (slice, &fraction) in chart.slices.iter().zip(&fractions) {
        let sweep = fraction as f32;
        if sweep > 0.0 {
            let steps = (sweep * ARC_STEPS).ceil().max(2.0) as usize;
            let points: Vec<egui::Pos2> = (0..=steps)
                .map(|i| ring_point(center, mid_radius, start + sweep * i as f32 / steps as f32))
                .collect();
            painter.add(egui::Shape::line(
                points,
                egui::Stroke::new(RING_WIDTH, to_color32(slice.color)),
            ));
        }
        start += sweep;
    }

    let Some(pointer) = response.hover_pos() else {
        return;
    };
    let distance = pointer.distance(center);
    if distance < OUTER_RADIUS - RING_WIDTH || distance > OUTER_RADIUS {
        return;
    }
    let Some(index) = slice_at(&fractions, angle_fraction(center, pointer)) else {
        return;
    };
    if let Some(label) = chart.tooltip_label(index) {
        show_tooltip(ui.ctx(), "lead_source_tooltip", pointer, None, &[label]);
    }
}

/// Point on the ring at `t` turns clockwise from twelve o'clock.
fn ring_point(center: egui::Pos2, radius: f32, t: f32) -> egui::Pos2 {
    let angle = t * std::f32::consts::TAU;
    center + egui::vec2(angle.sin(), -angle.cos()) * radius
}
