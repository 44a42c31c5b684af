use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::forces::{CenterForce, CollideForce, DirectionForce, ManyBodyForce, NodeValue};
use crate::models::{Vector2, Vector3};
use crate::simulation::{Simulation, SimulationState};
use crate::utils::{ForceError, SimulationConstants};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_state(count: usize, seed: u64) -> SimulationState<usize, 2> {
    let mut rng = StdRng::seed_from_u64(seed);
    let positions = (0..count)
        .map(|_| Vector2::new([rng.random_range(-20.0..20.0), rng.random_range(-20.0..20.0)]))
        .collect();
    SimulationState::new((0..count).collect(), positions).unwrap()
}

#[test]
fn test_state_rejects_mismatched_lengths() {
    let result = SimulationState::new(vec![1, 2, 3], vec![Vector2::zero(); 2]);
    assert_eq!(result, Err(ForceError::NodeCountMismatch { expected: 3, found: 2 }));
}

#[test]
fn test_state_starts_at_rest() {
    let state = random_state(5, 1);
    assert_eq!(state.len(), 5);
    assert!(state.velocities.iter().all(|v| *v == Vector2::zero()));
}

#[test]
fn test_integrate_damps_then_moves() {
    let mut state = SimulationState::new(vec![0], vec![Vector3::new([1.0, 1.0, 1.0])]).unwrap();
    state.velocities[0] = Vector3::new([2.0, 0.0, -4.0]);
    state.integrate(0.5);

    assert_eq!(state.velocities[0], Vector3::new([1.0, 0.0, -2.0]));
    assert_eq!(state.positions[0], Vector3::new([2.0, 1.0, -1.0]));
}

#[test]
fn test_new_rejects_invalid_constants() {
    let constants = SimulationConstants::new(None, None, None, None, Some(2.0));
    assert!(Simulation::new(random_state(3, 2), constants).is_err());
}

#[test]
fn test_alpha_cools_monotonically() {
    let mut simulation = Simulation::new(random_state(10, 3), SimulationConstants::default()).unwrap();
    simulation.add_force(ManyBodyForce::new(-30.0)).unwrap();

    let mut previous = simulation.alpha();
    for _ in 0..50 {
        simulation.tick().unwrap();
        assert!(simulation.alpha() < previous);
        previous = simulation.alpha();
    }
}

#[test]
fn test_alpha_rises_towards_a_higher_target() {
    let constants = SimulationConstants::new(Some(0.1), None, None, Some(0.5), None);
    let mut simulation: Simulation<usize, 2> = Simulation::new(random_state(3, 4), constants).unwrap();
    simulation.tick().unwrap();
    assert!(simulation.alpha() > 0.1 && simulation.alpha() < 0.5);
}

#[test]
fn test_run_stops_when_settled() {
    init_logger();
    let mut simulation = Simulation::new(random_state(30, 5), SimulationConstants::default()).unwrap();
    simulation.add_force(ManyBodyForce::new(-30.0)).unwrap();
    simulation.add_force(CollideForce::new()).unwrap();
    simulation.add_force(CenterForce::new(Vector2::zero())).unwrap();

    assert_eq!(simulation.run(10).unwrap(), 10);
    assert!(!simulation.is_settled());

    let ticks = simulation.run(1000).unwrap();
    assert!((285..=295).contains(&ticks), "settled after {} more ticks", ticks);
    assert!(simulation.is_settled());
    assert_eq!(simulation.run(1000).unwrap(), 0);

    for position in &simulation.state().positions {
        assert!(position.components().iter().all(|c| c.is_finite()));
    }
}

#[test]
fn test_layout_spreads_and_centers() {
    let mut simulation = Simulation::new(random_state(25, 6), SimulationConstants::default()).unwrap();
    simulation.add_force(ManyBodyForce::new(-30.0)).unwrap();
    simulation.add_force(CollideForce::new().with_radius(NodeValue::Constant(2.0))).unwrap();
    simulation.add_force(CenterForce::new(Vector2::zero()).with_strength(1.0)).unwrap();
    simulation.run(1000).unwrap();

    let positions = &simulation.state().positions;
    let mean = positions.iter().fold(Vector2::zero(), |sum, p| sum + *p) / positions.len() as f64;
    assert_abs_diff_eq!(mean, Vector2::zero(), epsilon = 0.1);

    for (i, a) in positions.iter().enumerate() {
        for b in &positions[i + 1..] {
            assert!(a.distance(b) > 1.0, "{:?} and {:?} overlap", a, b);
        }
    }
}

#[test]
fn test_direction_force_moves_nodes_to_target() {
    let mut simulation = Simulation::new(random_state(4, 7), SimulationConstants::default()).unwrap();
    simulation.add_force(DirectionForce::new(0, NodeValue::Constant(15.0)).unwrap()).unwrap();
    simulation.run(1000).unwrap();

    for position in &simulation.state().positions {
        assert_abs_diff_eq!(position[0], 15.0, epsilon = 0.5);
    }
}

#[test]
fn test_failed_initialize_does_not_register() {
    let mut simulation = Simulation::new(random_state(3, 8), SimulationConstants::default()).unwrap();
    let result = simulation.add_force(ManyBodyForce::new(-30.0).with_theta(f64::NAN));
    assert!(matches!(result, Err(ForceError::InvalidParameter(_))));
    assert_eq!(simulation.force_count(), 0);
}

#[test]
fn test_tick_error_needs_reinitialize() {
    let mut simulation = Simulation::new(random_state(3, 9), SimulationConstants::default()).unwrap();
    simulation.add_force(ManyBodyForce::new(-30.0)).unwrap();

    let state = simulation.state_mut();
    state.node_ids.push(3);
    state.positions.push(Vector2::new([1.0, 2.0]));
    state.velocities.push(Vector2::zero());

    assert_eq!(
        simulation.tick(),
        Err(ForceError::NodeCountMismatch { expected: 3, found: 4 })
    );
    simulation.reinitialize().unwrap();
    assert!(simulation.tick().is_ok());
}

#[test]
fn test_set_alpha_reheats() {
    let mut simulation: Simulation<usize, 2> = Simulation::new(random_state(3, 10), SimulationConstants::default()).unwrap();
    simulation.set_alpha(0.0001);
    assert!(simulation.is_settled());
    simulation.set_alpha(1.0);
    assert!(!simulation.is_settled());
}
