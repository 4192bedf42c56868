use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use charts::{DashboardData, StaticDataProvider};

mod loading;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "GMV Dashboard".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    // Charts only change on input, so idle frames are throttled
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(250)),
    });

    // Loaded after DefaultPlugins so the log subscriber is installed
    let config = loading::load_config(loading::env_path(loading::CONFIG_ENV).as_deref());
    let provider = match loading::load_data(loading::env_path(loading::DATA_ENV).as_deref()) {
        Ok(provider) => provider,
        Err(e) => {
            error!("Embedded sample data is invalid: {e}");
            StaticDataProvider::default()
        }
    };

    app.insert_resource(config)
        .insert_resource(DashboardData::new(provider))
        .add_plugins((charts::DashboardPlugin, ui::UiPlugin))
        .add_systems(Startup, spawn_camera);

    app.run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
