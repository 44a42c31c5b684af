use approx::assert_abs_diff_eq;
use crate::forces::{CollideForce, Force, NodeValue};
use crate::models::{Vector, Vector2, Vector3};
use crate::simulation::SimulationState;
use crate::utils::ForceError;

fn state_of<const D: usize>(positions: Vec<Vector<D>>) -> SimulationState<usize, D> {
    SimulationState::new((0..positions.len()).collect(), positions).unwrap()
}

#[test]
fn test_overlapping_pair_separates() {
    let mut state = state_of(vec![Vector2::new([0.0, 0.0]), Vector2::new([3.0, 0.0])]);
    let mut force = CollideForce::new().with_radius(NodeValue::Constant(5.0));
    force.initialize(&state).unwrap();
    force.apply(&mut state).unwrap();

    // Overlap of 7 split evenly between equal radii.
    assert_abs_diff_eq!(state.velocities[0][0], -3.5, epsilon = 1e-6);
    assert_abs_diff_eq!(state.velocities[1][0], 3.5, epsilon = 1e-6);
    assert_abs_diff_eq!(state.velocities[0][1], 0.0, epsilon = 1e-6);

    state.integrate(1.0);
    assert!(state.positions[0].distance(&state.positions[1]) >= 10.0 - 1e-6);
}

/// Resolves every pair `i < j` in index order without a tree, reading both
/// anticipated positions from the velocities as they stand at that moment.
fn sequential_collide(positions: &[Vector2], radii: &[f64], strength: f64) -> Vec<Vector2> {
    let mut velocities = vec![Vector2::zero(); positions.len()];
    for i in 0..positions.len() {
        let anticipated_i = positions[i] + velocities[i];
        for j in i + 1..positions.len() {
            let reach = radii[i] + radii[j];
            let mut delta = anticipated_i - (positions[j] + velocities[j]);
            if delta.length_squared() >= reach * reach {
                continue;
            }
            let length = delta.length();
            let share = radii[j] * radii[j] / (radii[i] * radii[i] + radii[j] * radii[j]);
            delta *= (reach - length) / length * strength;
            velocities[i] += delta * share;
            velocities[j] -= delta * (1.0 - share);
        }
    }
    velocities
}

#[test]
fn test_chain_of_overlaps_resolves_in_index_order() {
    let positions = vec![Vector2::new([0.0, 0.0]), Vector2::new([3.0, 0.5]), Vector2::new([7.0, 1.0])];
    let radii = [5.0, 5.0, 5.0];
    let expected = sequential_collide(&positions, &radii, 1.0);

    let mut state = state_of(positions);
    let mut force = CollideForce::new().with_radius(NodeValue::Constant(5.0));
    force.initialize(&state).unwrap();
    force.apply(&mut state).unwrap();

    for (velocity, expected) in state.velocities.iter().zip(&expected) {
        assert_abs_diff_eq!(*velocity, *expected, epsilon = 1e-9);
    }
    // Node 1 was pushed right by node 0 before meeting node 2, which then pushes it back.
    assert!(state.velocities[1][0] < 0.0);
}

#[test]
fn test_mutually_overlapping_ring_matches_sequential_resolution() {
    let positions: Vec<Vector2> = (0..6)
        .map(|i| {
            let angle = i as f64 * 1.1;
            Vector2::new([1.5 * angle.cos(), 1.5 * angle.sin()])
        })
        .collect();
    let radii: Vec<f64> = (0..positions.len()).map(|i| 5.0 + (i % 3) as f64 * 0.5).collect();
    let expected = sequential_collide(&positions, &radii, 0.1);

    let radius_table = radii.clone();
    let mut state = state_of(positions);
    let mut force = CollideForce::new()
        .with_strength(0.1)
        .with_radius(NodeValue::varied(move |id: &usize| radius_table[*id]));
    force.initialize(&state).unwrap();
    force.apply(&mut state).unwrap();

    for (velocity, expected) in state.velocities.iter().zip(&expected) {
        assert_abs_diff_eq!(*velocity, *expected, epsilon = 1e-9);
    }
}

#[test]
fn test_coincident_nodes_are_separated() {
    let mut state = state_of(vec![Vector2::new([4.0, 4.0]), Vector2::new([4.0, 4.0])]);
    let mut force = CollideForce::new();
    force.initialize(&state).unwrap();
    force.apply(&mut state).unwrap();

    let push = state.velocities[0];
    assert!(push.components().iter().all(|c| c.is_finite()));
    // The whole overlap of 6 is split evenly along a random direction.
    assert_abs_diff_eq!(push.length(), 3.0, epsilon = 1e-3);
    assert_abs_diff_eq!(state.velocities[1], -push, epsilon = 1e-9);
}

#[test]
fn test_distant_nodes_are_untouched() {
    let mut state = state_of(vec![
        Vector2::new([0.0, 0.0]),
        Vector2::new([20.0, 0.0]),
        Vector2::new([0.0, 20.0]),
    ]);
    let mut force = CollideForce::new();
    force.initialize(&state).unwrap();
    force.apply(&mut state).unwrap();

    assert!(state.velocities.iter().all(|v| *v == Vector2::zero()));
}

#[test]
fn test_only_the_overlapping_pair_moves() {
    let mut positions: Vec<Vector2> = (0..5)
        .flat_map(|x| (0..5).map(move |y| Vector2::new([x as f64 * 50.0, y as f64 * 50.0])))
        .collect();
    positions.push(Vector2::new([102.0, 101.0]));
    let last = positions.len() - 1;
    let mut state = state_of(positions);

    let mut force = CollideForce::new();
    force.initialize(&state).unwrap();
    force.apply(&mut state).unwrap();

    // Node 12 sits at (100, 100), next to the extra node.
    for (i, velocity) in state.velocities.iter().enumerate() {
        if i == 12 || i == last {
            assert_ne!(*velocity, Vector2::zero(), "node {} should move", i);
        } else {
            assert_eq!(*velocity, Vector2::zero(), "node {} should not move", i);
        }
    }
    assert_abs_diff_eq!(state.velocities[12], -state.velocities[last], epsilon = 1e-12);
}

#[test]
fn test_smaller_node_takes_most_of_the_push() {
    let mut state = state_of(vec![Vector2::new([0.0, 0.0]), Vector2::new([2.0, 0.0])]);
    let mut force = CollideForce::new().with_radius(NodeValue::varied(|id: &usize| if *id == 0 { 1.0 } else { 3.0 }));
    force.initialize(&state).unwrap();
    force.apply(&mut state).unwrap();

    assert!(state.velocities[0][0] < 0.0);
    assert_abs_diff_eq!(state.velocities[0][0], -9.0 * state.velocities[1][0], epsilon = 1e-6);
}

#[test]
fn test_more_iterations_push_further() {
    let positions = vec![Vector2::new([0.0, 0.0]), Vector2::new([3.0, 0.0])];

    let mut once = state_of(positions.clone());
    let mut force = CollideForce::new().with_radius(NodeValue::Constant(5.0)).with_strength(0.5);
    force.initialize(&once).unwrap();
    force.apply(&mut once).unwrap();

    let mut twice = state_of(positions);
    let mut force = CollideForce::new()
        .with_radius(NodeValue::Constant(5.0))
        .with_strength(0.5)
        .with_iterations_per_tick(2);
    force.initialize(&twice).unwrap();
    force.apply(&mut twice).unwrap();

    assert!(twice.velocities[1][0] > once.velocities[1][0]);
}

#[test]
fn test_collides_in_three_dimensions() {
    let mut state = state_of(vec![Vector3::new([0.0, 0.0, 0.0]), Vector3::new([1.0, 1.0, 1.0])]);
    let mut force = CollideForce::new();
    force.initialize(&state).unwrap();
    force.apply(&mut state).unwrap();

    for axis in 0..3 {
        assert!(state.velocities[0][axis] < 0.0);
        assert!(state.velocities[1][axis] > 0.0);
    }
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let state = state_of(vec![Vector2::new([0.0, 0.0])]);

    let mut negative_radius = CollideForce::new().with_radius(NodeValue::Constant(-1.0));
    assert!(matches!(negative_radius.initialize(&state), Err(ForceError::InvalidParameter(_))));

    let mut no_iterations: CollideForce<usize> = CollideForce::new().with_iterations_per_tick(0);
    assert!(matches!(no_iterations.initialize(&state), Err(ForceError::InvalidParameter(_))));
}

#[test]
fn test_apply_requires_matching_initialize() {
    let mut state = state_of(vec![Vector2::new([0.0, 0.0]), Vector2::new([1.0, 0.0])]);
    let mut force = CollideForce::new();
    assert_eq!(force.apply(&mut state), Err(ForceError::NotInitialized));

    force.initialize(&state).unwrap();
    state.node_ids.pop();
    state.positions.pop();
    state.velocities.pop();
    assert_eq!(
        force.apply(&mut state),
        Err(ForceError::NodeCountMismatch { expected: 2, found: 1 })
    );
}
