// demos/basic_layout.rs

use rs_force_layout::forces::{CenterForce, CollideForce, ManyBodyForce, NodeValue};
use rs_force_layout::models::Vector2;
use rs_force_layout::simulation::{Simulation, SimulationState};
use rs_force_layout::utils::{ForceError, SimulationConstants};

fn main() -> Result<(), ForceError> {
    env_logger::init();

    // Nodes start on a tight spiral so the layout has something to untangle.
    let names: Vec<String> = (0..40).map(|i| format!("node-{}", i)).collect();
    let positions = (0..names.len())
        .map(|i| {
            let angle = i as f64 * 0.5;
            Vector2::new([angle.cos() * i as f64 * 0.1, angle.sin() * i as f64 * 0.1])
        })
        .collect();
    let state = SimulationState::new(names, positions)?;

    let mut simulation = Simulation::new(state, SimulationConstants::default())?;
    simulation.add_force(ManyBodyForce::new(-30.0))?;
    // Every fifth node is a hub and gets a larger radius.
    simulation.add_force(CollideForce::new().with_radius(NodeValue::varied(|name: &String| {
        if name.ends_with('0') || name.ends_with('5') { 8.0 } else { 4.0 }
    })))?;
    simulation.add_force(CenterForce::new(Vector2::zero()))?;

    let ticks = simulation.run(1_000)?;
    println!("Settled after {} ticks (alpha = {:.5})", ticks, simulation.alpha());

    let state = simulation.state();
    for (name, position) in state.node_ids.iter().zip(&state.positions) {
        println!("{:>8}: ({:>8.2}, {:>8.2})", name, position[0], position[1]);
    }

    Ok(())
}
