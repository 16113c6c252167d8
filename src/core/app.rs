//! Application initialization and configuration

use crate::canvas::gesture::cancel_gesture;
use crate::canvas::{CanvasPlugin, CanvasScene, GestureController};
use crate::core::cli::CliArgs;
use crate::core::io::pointer::PointerPlugin;
use crate::core::settings::{SnapSettings, BACKGROUND_COLOR};
use crate::rendering::{CameraPlugin, GuideRenderPlugin};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::winit::WinitSettings;

/// Creates a fully configured Bevy GUI application ready to run
pub fn create_app(cli_args: CliArgs) -> Result<App, String> {
    cli_args.validate()?;
    let scene =
        CanvasScene::from_cli(&cli_args).map_err(|e| format!("{e:#}"))?;

    let mut app = App::new();
    configure_app_settings(&mut app, cli_args, scene);
    add_all_plugins(&mut app);
    Ok(app)
}

/// Runtime snapping settings derived from the command line
pub fn snap_settings(cli_args: &CliArgs) -> SnapSettings {
    SnapSettings {
        enabled: !cli_args.no_snap,
        align_threshold: cli_args.threshold,
        ..default()
    }
}

/// Sets up application resources and configuration
fn configure_app_settings(
    app: &mut App,
    cli_args: CliArgs,
    scene: CanvasScene,
) {
    let settings = snap_settings(&cli_args);
    if !settings.enabled {
        info!("Snapping disabled from the command line");
    }

    app.insert_resource(settings)
        .insert_resource(scene)
        .insert_resource(cli_args)
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(WinitSettings::desktop_app());
}

/// Adds all plugins to the application in logical groups
fn add_all_plugins(app: &mut App) {
    // Logging is set up by init_custom_logger before the app is built
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Snapline".to_string(),
                    resolution: (1280., 800.).into(),
                    ..default()
                }),
                ..default()
            })
            .disable::<LogPlugin>(),
    );

    add_rendering_plugins(app);
    add_canvas_plugins(app);
    app.add_systems(Update, exit_on_esc.before(cancel_gesture));
}

/// Adds plugins for rendering and visual display
fn add_rendering_plugins(app: &mut App) {
    app.add_plugins((CameraPlugin, GuideRenderPlugin));
}

/// Adds plugins for the canvas and pointer handling
fn add_canvas_plugins(app: &mut App) {
    app.add_plugins((PointerPlugin, CanvasPlugin));
}

/// System to exit the application when the Escape key is pressed
///
/// Escape during a drag cancels the drag instead.
fn exit_on_esc(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    controller: Res<GestureController>,
    mut app_exit_events: EventWriter<AppExit>,
) {
    if controller.is_active() || mouse.pressed(MouseButton::Left) {
        return;
    }
    if keyboard.just_pressed(KeyCode::Escape) {
        app_exit_events.write(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_snap_settings_follow_cli() {
        let args = CliArgs::parse_from([
            "snapline",
            "--threshold",
            "12",
            "--no-snap",
        ]);
        let settings = snap_settings(&args);
        assert!(!settings.enabled);
        assert_eq!(settings.align_threshold, 12.0);
    }

    #[test]
    fn test_create_app_rejects_bad_args() {
        let args = CliArgs::parse_from(["snapline", "--threshold", "0"]);
        assert!(create_app(args).is_err());
    }
}
