//! Native egui viewer for the XY phase lattice.
//!
//! Usage: `xy-phase-viewer [config.json]`. Logging follows `RUST_LOG`.

mod gui;

use log::{error, info};
use xy_phase_sim::prelude::*;

/// Canvas guess before the first layout pass; the real size arrives on frame one.
const INITIAL_CANVAS: [f64; 2] = [900.0, 800.0];

fn load_config() -> SimConfig {
    match std::env::args().nth(1) {
        Some(path) => match SimConfig::load(&path) {
            Ok(config) => {
                info!("loaded config from {path}");
                config
            }
            Err(e) => {
                error!("could not load {path}: {e}; using defaults");
                SimConfig::default()
            }
        },
        None => SimConfig::default(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = load_config();
    let viewport = Viewport {
        width: INITIAL_CANVAS[0],
        height: INITIAL_CANVAS[1],
        cell_size: config.cell_size,
    };
    let sim = Simulation::new(config, viewport)?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("XY Phase Lattice  ·  Paraxiom"),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "xy-phase-viewer",
        options,
        Box::new(move |cc| Ok(Box::new(gui::XyPhaseApp::new(cc, sim)))),
    )?;
    Ok(())
}
