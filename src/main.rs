// A snapping canvas made with the Bevy game engine.

use bevy::prelude::*;
use clap::Parser;
use snapline::core::{create_app, CliArgs};
use snapline::utils::logger::init_custom_logger;

fn main() {
    init_custom_logger();

    let cli_args = CliArgs::parse();
    match create_app(cli_args) {
        Ok(mut app) => {
            app.run();
        }
        Err(e) => {
            error!("Failed to start: {e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
