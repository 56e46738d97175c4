//! Nutrient layer scenario
//!
//! A 20x20 lattice over a 200-micron domain, seeded with uniform random
//! concentrations, diffusing for 30 seconds of simulated time with frames
//! rendered at t = 0, 1, 5 and 30 seconds.
//!
//! Run with: `cargo run --example nutrient_layer`

use std::error::Error;

use lattice_rs::output::visualization::HeatmapWriter;
use lattice_rs::physics::{DiffusionGrid, DiffusionParameters, FieldInit};
use lattice_rs::sim::{CheckpointSchedule, SimulationRunner};

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== Nutrient Layer Diffusion ===\n");

    // D = 10 µm²/s, domain [-100, 100] µm, 20 cells per side, dt = 0.1 s
    let params = DiffusionParameters::from_domain(10.0, 100.0, 20, 0.1);
    params.validate()?;
    println!("Diffusion coefficient: {} µm²/s", params.diffusion_coefficient);
    println!("Cell spacing:          {} µm", params.cell_spacing);
    println!("Time step:             {} s", params.time_step);

    let mut grid = DiffusionGrid::new(20, params, FieldInit::UniformRandom { seed: Some(42) })?;
    println!("\nInitial total mass:    {:.4}", grid.total_mass());

    let schedule = CheckpointSchedule::from_steps(&[0, 10, 50, 300]);
    let runner = SimulationRunner::new(schedule);
    let mut writer = HeatmapWriter::new("frames");

    let report = runner.run(&mut grid, &mut writer)?;

    println!("\nSteps completed:       {}", report.steps_completed);
    println!("Simulated time:        {:.1} s", report.final_time);
    println!("Final total mass:      {:.4}", grid.total_mass());

    println!("\nFrames written:");
    for path in writer.written_files() {
        println!("  {}", path.display());
    }

    Ok(())
}
