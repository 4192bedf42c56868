//! Bevy wiring: builds chart resources from the injected data provider and
//! applies legend activations sent by the render host.

use bevy::prelude::*;

use crate::config::DashboardConfig;
use crate::contracts::ContractsChart;
use crate::data_provider::{DashboardData, DataProvider};
use crate::error::DashboardError;
use crate::gmv::{GmvChart, LegendEntry};
use crate::lead_source::LeadSourceChart;

/// A GMV legend entry was activated.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct LegendActivated(pub LegendEntry);

/// A contracts legend entry (line index) was activated.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractsLegendActivated(pub usize);

/// A lead source legend entry (slice index) was activated.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadSourceLegendActivated(pub usize);

/// Rebuild every chart from the provider. Visibility resets to all-visible.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RebuildCharts;

pub struct DashboardPlugin;

impl Plugin for DashboardPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DashboardConfig>()
            .add_event::<LegendActivated>()
            .add_event::<ContractsLegendActivated>()
            .add_event::<LeadSourceLegendActivated>()
            .add_event::<RebuildCharts>()
            .add_systems(Startup, build_charts)
            .add_systems(
                Update,
                (
                    rebuild_charts,
                    apply_legend_activations,
                    apply_contracts_activations,
                    apply_lead_source_activations,
                )
                    .chain(),
            );
    }
}

// -----------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------

pub fn build_charts(
    mut commands: Commands,
    config: Res<DashboardConfig>,
    data: Option<Res<DashboardData>>,
) {
    let Some(data) = data else {
        warn!("No dashboard data provider registered; charts skipped");
        return;
    };
    install_charts(&mut commands, &config, data.0.as_ref());
}

pub fn rebuild_charts(
    mut events: EventReader<RebuildCharts>,
    commands: Commands,
    config: Res<DashboardConfig>,
    data: Option<Res<DashboardData>>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();
    info!("Rebuilding dashboard charts");
    build_charts(commands, config, data);
}

pub fn apply_legend_activations(
    mut events: EventReader<LegendActivated>,
    chart: Option<ResMut<GmvChart>>,
) {
    let Some(mut chart) = chart else {
        events.clear();
        return;
    };
    for LegendActivated(entry) in events.read() {
        if chart.activate(entry) {
            debug!("GMV legend entry {:?} toggled", entry.text());
        }
    }
}

pub fn apply_contracts_activations(
    mut events: EventReader<ContractsLegendActivated>,
    chart: Option<ResMut<ContractsChart>>,
) {
    let Some(mut chart) = chart else {
        events.clear();
        return;
    };
    for ContractsLegendActivated(index) in events.read() {
        if !chart.toggle(*index) {
            warn!("Contracts legend references unknown line {index}");
        }
    }
}

pub fn apply_lead_source_activations(
    mut events: EventReader<LeadSourceLegendActivated>,
    chart: Option<ResMut<LeadSourceChart>>,
) {
    let Some(mut chart) = chart else {
        events.clear();
        return;
    };
    for LeadSourceLegendActivated(index) in events.read() {
        if !chart.toggle(*index) {
            warn!("Lead source legend references unknown slice {index}");
        }
    }
}

// -----------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------

fn install_charts(commands: &mut Commands, config: &DashboardConfig, provider: &dyn DataProvider) {
    install(
        commands,
        "GMV",
        provider.gmv().map(|d| GmvChart::new(config, &d)),
    );
    install(
        commands,
        "lead source",
        provider
            .lead_sources()
            .map(|d| LeadSourceChart::new(config, &d)),
    );
    install(
        commands,
        "contracts",
        provider.contracts().map(|d| ContractsChart::new(config, &d)),
    );
}

/// Inserts a freshly built chart, or removes any stale one when the data is
/// absent or invalid.
fn install<T: Resource>(
    commands: &mut Commands,
    name: &str,
    built: Option<Result<T, DashboardError>>,
) {
    match built {
        Some(Ok(chart)) => {
            info!("Built {name} chart");
            commands.insert_resource(chart);
        }
        Some(Err(e)) => {
            error!("Failed to build {name} chart: {e}");
            commands.remove_resource::<T>();
        }
        None => {
            warn!("No {name} data found; chart skipped");
            commands.remove_resource::<T>();
        }
    }
}
