//! egui visuals derived from the dashboard's year palette.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use charts::config::parse_hex;
use charts::DashboardConfig;

use crate::graphs::to_color32;

/// How much of the accent bleeds into panel and widget backgrounds.
const PANEL_TINT: f32 = 0.06;
const WIDGET_TINT: f32 = 0.16;
const HOVER_TINT: f32 = 0.3;

/// Colours picked from the configuration before they are applied to egui.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardPalette {
    pub accent: egui::Color32,
    pub panel: egui::Color32,
    pub widget: egui::Color32,
    pub hover: egui::Color32,
}

impl DashboardPalette {
    /// The first configured year colour is the accent. An unparsable entry
    /// falls back to `fallback_color`, then to egui's own selection colour.
    pub fn from_config(config: &DashboardConfig) -> Self {
        let configured = config
            .years
            .first()
            .map(|style| parse_hex(&style.color))
            .unwrap_or_else(|| parse_hex(&config.fallback_color))
            .or_else(|_| parse_hex(&config.fallback_color));
        let accent = match configured {
            Ok(color) => to_color32(color),
            Err(e) => {
                warn!("Theme accent unavailable, keeping egui default: {e}");
                egui::Visuals::dark().selection.bg_fill
            }
        };
        let base = egui::Visuals::dark().window_fill;
        Self {
            accent,
            panel: mix(base, accent, PANEL_TINT),
            widget: mix(base, accent, WIDGET_TINT),
            hover: mix(base, accent, HOVER_TINT),
        }
    }

    pub fn visuals(&self) -> egui::Visuals {
        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = self.panel;
        visuals.panel_fill = self.panel;
        visuals.selection.bg_fill = self.accent.gamma_multiply(0.6);
        visuals.selection.stroke = egui::Stroke::new(1.0, self.accent);
        visuals.hyperlink_color = self.accent;
        visuals.window_corner_radius = egui::CornerRadius::same(6);

        let widgets = &mut visuals.widgets;
        for (state, fill) in [
            (&mut widgets.inactive, self.widget),
            (&mut widgets.hovered, self.hover),
            (&mut widgets.active, self.accent),
        ] {
            state.bg_fill = fill;
            state.weak_bg_fill = fill;
            state.corner_radius = egui::CornerRadius::same(4);
        }
        visuals
    }
}

/// Linear blend of two opaque colours, `t` of the way from `a` to `b`.
fn mix(a: egui::Color32, b: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let channel = |x: u8, y: u8| (f32::from(x) + (f32::from(y) - f32::from(x)) * t).round() as u8;
    egui::Color32::from_rgb(channel(a.r(), b.r()), channel(a.g(), b.g()), channel(a.b(), b.b()))
}

pub fn apply_dashboard_theme(mut contexts: EguiContexts, config: Res<DashboardConfig>) {
    let palette = DashboardPalette::from_config(&config);
    debug!("Dashboard accent {:?}", palette.accent);
    contexts.ctx_mut().set_visuals(palette.visuals());
}
