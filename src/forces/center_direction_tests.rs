use approx::assert_abs_diff_eq;
use crate::forces::{CenterForce, DirectionForce, Force, NodeValue};
use crate::models::Vector2;
use crate::simulation::SimulationState;
use crate::utils::ForceError;

fn triangle() -> SimulationState<&'static str, 2> {
    SimulationState::new(
        vec!["a", "b", "c"],
        vec![Vector2::new([0.0, 0.0]), Vector2::new([4.0, 0.0]), Vector2::new([2.0, 6.0])],
    )
    .unwrap()
}

fn mean(state: &SimulationState<&'static str, 2>) -> Vector2 {
    state.positions.iter().fold(Vector2::zero(), |sum, p| sum + *p) / state.len() as f64
}

#[test]
fn test_center_moves_mean_towards_center() {
    let mut state = triangle();
    let mut force = CenterForce::new(Vector2::zero()).with_strength(0.5);
    force.initialize(&state).unwrap();
    force.apply(&mut state).unwrap();

    assert_abs_diff_eq!(mean(&state), Vector2::new([1.0, 1.0]), epsilon = 1e-12);
    // Shape is preserved.
    assert_abs_diff_eq!(state.positions[1] - state.positions[0], Vector2::new([4.0, 0.0]), epsilon = 1e-12);
    assert!(state.velocities.iter().all(|v| *v == Vector2::zero()));
}

#[test]
fn test_full_strength_center_lands_on_center() {
    let mut state = triangle();
    let mut force = CenterForce::new(Vector2::new([10.0, -10.0])).with_strength(1.0);
    force.initialize(&state).unwrap();
    force.apply(&mut state).unwrap();

    assert_abs_diff_eq!(mean(&state), Vector2::new([10.0, -10.0]), epsilon = 1e-12);
}

#[test]
fn test_center_rejects_bad_input() {
    let state = triangle();
    let mut too_strong = CenterForce::new(Vector2::zero()).with_strength(2.0);
    assert!(matches!(
        Force::<&str, 2>::initialize(&mut too_strong, &state),
        Err(ForceError::InvalidParameter(_))
    ));

    let mut empty: SimulationState<&str, 2> = SimulationState::new(Vec::new(), Vec::new()).unwrap();
    let mut force = CenterForce::new(Vector2::zero());
    assert_eq!(force.apply(&mut empty), Err(ForceError::EmptyPointSet));
}

#[test]
fn test_direction_rejects_axis_out_of_range() {
    let result = DirectionForce::<&str, 2>::new(2, NodeValue::Constant(0.0));
    assert!(matches!(result, Err(ForceError::AxisOutOfRange { axis: 2, dimensions: 2 })));
}

#[test]
fn test_direction_pulls_towards_target() {
    let mut state = triangle();
    state.alpha = 0.5;
    let mut force = DirectionForce::new(1, NodeValue::Constant(10.0))
        .unwrap()
        .with_strength(NodeValue::Constant(0.2));
    force.initialize(&state).unwrap();
    force.apply(&mut state).unwrap();

    assert_abs_diff_eq!(state.velocities[0], Vector2::new([0.0, 1.0]), epsilon = 1e-12);
    assert_abs_diff_eq!(state.velocities[2], Vector2::new([0.0, 0.4]), epsilon = 1e-12);
}

#[test]
fn test_direction_uses_per_node_targets() {
    let mut state = triangle();
    let mut force = DirectionForce::new(0, NodeValue::varied(|id: &&str| if *id == "a" { -4.0 } else { 4.0 })).unwrap();
    force.initialize(&state).unwrap();
    force.apply(&mut state).unwrap();

    assert_abs_diff_eq!(state.velocities[0][0], -4.0, epsilon = 1e-12);
    assert_abs_diff_eq!(state.velocities[1][0], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(state.velocities[2][0], 2.0, epsilon = 1e-12);
}

#[test]
fn test_direction_requires_initialize() {
    let mut state = triangle();
    let mut force = DirectionForce::new(0, NodeValue::Constant(0.0)).unwrap();
    assert_eq!(force.apply(&mut state), Err(ForceError::NotInitialized));
}
