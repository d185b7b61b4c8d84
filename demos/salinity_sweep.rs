//! Example: Yield map over initial volume and salinity
//!
//! Sweeps a grid of starting water bodies through one sunny day and compares
//! the linear and logistic salinity penalties. Runs are independent, so the
//! grid is evaluated in parallel when the `parallel` feature is enabled.

use solar_still::{
    config::SimulationConfig,
    output::export::export_yield_grid_csv,
    physics::SalinityCurve,
    simulator::{sweep, BasinSimulator},
};

use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {

    println!("═══════════════════════════════════════════════════════");
    println!("  Yield Map: Initial Volume × Salinity");
    println!("═══════════════════════════════════════════════════════\n");

    let base = SimulationConfig::default().with_horizon(24);

    let volumes: Vec<f64> = (1..=8).map(|i| 2.0 * i as f64).collect();
    let salinities: Vec<f64> = (0..8).map(|i| 5.0 + 12.5 * i as f64).collect();

    let curves = vec![
        ("linear", SalinityCurve::Linear),
        ("logistic", SalinityCurve::logistic(8.0)),
    ];

    let tmp_dir = std::env::temp_dir();

    for (name, curve) in curves {
        let simulator = BasinSimulator::default().with_salinity(curve);

        let current_time = Instant::now();
        let grid = sweep::yield_grid(&simulator, &base, &volumes, &salinities)?;
        let elapsed_time = current_time.elapsed().as_secs_f64() * 1e3;

        println!("── {} penalty: {} runs in {:.2} ms ──\n", name, grid.len(), elapsed_time);

        print!("{:>10}", "V \\ c");
        for salinity in &salinities {
            print!("{:>8.1}", salinity);
        }
        println!();
        println!("{:-<74}", "");

        for (volume, row) in volumes.iter().zip(grid.rows()) {
            print!("{:>8.1} L", volume);
            for value in row {
                print!("{:>8.3}", value);
            }
            println!();
        }

        let path = tmp_dir.join(format!("yield_grid_{}.csv", name));
        export_yield_grid_csv(&grid, &volumes, &salinities, &path, None)?;
        println!("\n  → {}\n", path.display());
    }

    Ok(())
}
