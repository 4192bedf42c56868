//! Dashboard window: GMV combination chart, contracts by year, and lead
//! source distribution, one tab each.

mod contracts;
mod drawing;
mod gmv;
mod lead_source;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use charts::config::ChartLabels;
use charts::contracts::ContractsChart;
use charts::gmv::GmvChart;
use charts::lead_source::LeadSourceChart;
use charts::{
    ContractsLegendActivated, DashboardConfig, LeadSourceLegendActivated, LegendActivated,
    RebuildCharts,
};

use contracts::draw_contracts_panel;
use gmv::draw_gmv_panel;
use lead_source::draw_lead_source_panel;

pub(crate) use drawing::to_color32;

// -----------------------------------------------------------------------
// Visibility
// -----------------------------------------------------------------------

/// Resource controlling whether the dashboard window is visible.
/// Toggle with 'C' key.
#[derive(Resource)]
pub struct ChartsVisible(pub bool);

impl Default for ChartsVisible {
    fn default() -> Self {
        Self(true)
    }
}

// -----------------------------------------------------------------------
// Chart tab
// -----------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ChartTab {
    #[default]
    Gmv,
    Contracts,
    LeadSources,
}

impl ChartTab {
    fn label(self, labels: &ChartLabels) -> &str {
        match self {
            ChartTab::Gmv => &labels.primary,
            ChartTab::Contracts => &labels.contracts_tab,
            ChartTab::LeadSources => &labels.lead_sources_tab,
        }
    }

    const ALL: [ChartTab; 3] = [ChartTab::Gmv, ChartTab::Contracts, ChartTab::LeadSources];
}

/// Persistent state for the dashboard window (tab selection).
#[derive(Resource, Default)]
pub struct ChartsState {
    tab: ChartTab,
}

// -----------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------

/// C toggles the dashboard window, R rebuilds every chart from the data
/// provider. Keys are ignored when egui has keyboard focus.
pub fn chart_keybinds(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut visible: ResMut<ChartsVisible>,
    mut rebuild: EventWriter<RebuildCharts>,
) {
    if contexts.ctx_mut().wants_keyboard_input() {
        return;
    }

    if keyboard.just_pressed(KeyCode::KeyC) {
        visible.0 = !visible.0;
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        info!("Chart rebuild requested");
        rebuild.send(RebuildCharts);
    }
}

#[allow(clippy::too_many_arguments)]
pub fn graphs_ui(
    mut contexts: EguiContexts,
    visible: Res<ChartsVisible>,
    mut state: ResMut<ChartsState>,
    config: Res<DashboardConfig>,
    gmv: Option<Res<GmvChart>>,
    contracts: Option<Res<ContractsChart>>,
    lead_sources: Option<Res<LeadSourceChart>>,
    mut gmv_legend: EventWriter<LegendActivated>,
    mut contracts_legend: EventWriter<ContractsLegendActivated>,
    mut lead_source_legend: EventWriter<LeadSourceLegendActivated>,
) {
    if !visible.0 {
        return;
    }
    let labels = &config.labels;

    egui::Window::new(labels.window_title.as_str())
        .id(egui::Id::new("dashboard_window"))
        .default_size([760.0, 420.0])
        .show(contexts.ctx_mut(), |ui| {
            ui.small(labels.keybind_hint.as_str());

            // Tab bar
            ui.horizontal(|ui| {
                for tab in ChartTab::ALL {
                    if ui
                        .selectable_label(state.tab == tab, tab.label(labels))
                        .clicked()
                    {
                        state.tab = tab;
                    }
                }
            });

            ui.separator();

            match state.tab {
                ChartTab::Gmv => match &gmv {
                    Some(chart) => draw_gmv_panel(ui, chart, &mut gmv_legend),
                    None => {
                        ui.label(labels.no_data.as_str());
                    }
                },
                ChartTab::Contracts => match &contracts {
                    Some(chart) => {
                        draw_contracts_panel(ui, chart, &labels.no_data, &mut contracts_legend)
                    }
                    None => {
                        ui.label(labels.no_data.as_str());
                    }
                },
                ChartTab::LeadSources => match &lead_sources {
                    Some(chart) => {
                        draw_lead_source_panel(ui, chart, &labels.no_data, &mut lead_source_legend)
                    }
                    None => {
                        ui.label(labels.no_data.as_str());
                    }
                },
            }
        });
}
