use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod graphs;
pub mod theme;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<graphs::ChartsVisible>()
            .init_resource::<graphs::ChartsState>()
            .add_systems(Startup, theme::apply_dashboard_theme)
            .add_systems(Update, (graphs::chart_keybinds, graphs::graphs_ui).chain());
    }
}
