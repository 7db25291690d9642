//! # Terminal Relaxation Example
//!
//! Runs the phase lattice headless at 60 simulated frames per second and
//! prints the display field as compass glyphs at a few checkpoints:
//!
//! 1. Fresh random field
//! 2. After cold relaxation (domains and vortices form)
//! 3. After a pointer drag pulls a region toward one spot
//! 4. After a one-second global rotation (pattern unchanged, glyphs turned)
//!
//! Run: `cargo run --example terminal_relax`

use xy_phase_sim::interaction::REFERENCE_FRAME_MS;
use xy_phase_sim::prelude::*;
use xy_phase_sim::render::compass_glyph;

fn print_field(title: &str, sim: &Simulation) {
    println!("━━━ {title} ━━━");
    let grid = sim.display();
    let shape = grid.shape();
    for y in 0..shape.height() {
        let row: String = (0..shape.width())
            .map(|x| compass_glyph(grid.get(x as isize, y as isize)))
            .flat_map(|c| [c, ' '])
            .collect();
        println!("  {row}");
    }
    println!("  ticks so far: {}", sim.ticks());
    println!();
}

fn run(sim: &mut Simulation, clock: &mut f64, frames: usize) {
    for _ in 0..frames {
        *clock += REFERENCE_FRAME_MS;
        sim.frame(*clock);
    }
}

fn main() -> XyResult<()> {
    print_banner();

    let config = SimConfig {
        speed: 10,
        temperature: 0.02,
        seed: Some(2024),
        ..Default::default()
    };
    let viewport = Viewport {
        width: 32.0 * config.cell_size,
        height: 16.0 * config.cell_size,
        cell_size: config.cell_size,
    };
    let mut sim = Simulation::new(config, viewport)?;
    let mut clock = 0.0;

    print_field("Part 1: random initial field", &sim);

    run(&mut sim, &mut clock, 300);
    print_field("Part 2: after 5 s of cold relaxation", &sim);

    let cell = sim.cell_size();
    sim.pointer_down(8.5 * cell, 8.5 * cell);
    for step in 0..60 {
        let x = (8.5 + step as f64 * 0.25) * cell;
        sim.pointer_move(x, 8.5 * cell);
        run(&mut sim, &mut clock, 1);
    }
    sim.pointer_up();
    run(&mut sim, &mut clock, 30);
    print_field("Part 3: after dragging the pointer across row 8", &sim);

    sim.start_rotation();
    run(&mut sim, &mut clock, 60);
    sim.stop_rotation();
    print_field("Part 4: after 1 s of global rotation", &sim);

    Ok(())
}

fn print_banner() {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        XY PHASE LATTICE · headless relaxation demo          ║");
    println!("║                                                              ║");
    println!("║  32×16 torus · Jacobi relaxation · display interpolation     ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
}
