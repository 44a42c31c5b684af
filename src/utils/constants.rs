use crate::utils;

/// Barnes-Hut opening angle used when none is configured.
pub const DEFAULT_THETA: f64 = 0.9;

/// Points closer than this are stored in the same leaf bucket.
pub const DEFAULT_CLUSTER_DISTANCE: f64 = 1e-5;

/// Near-field distance floor of the many-body force.
pub const DEFAULT_DISTANCE_MIN: f64 = 1.0;

pub const DEFAULT_COLLIDE_RADIUS: f64 = 3.0;

pub const DEFAULT_CENTER_STRENGTH: f64 = 0.1;

/// Width of the interval zero components are perturbed into by `Vector::jiggled`.
pub const JIGGLE_MAGNITUDE: f64 = 1e-6;

pub const DEFAULT_SIMULATION_CONSTANTS: utils::SimulationConstants = utils::SimulationConstants {
    alpha: 1.0,
    alpha_min: 0.001,
    // 1 - 0.001^(1/300): cools from 1 to alpha_min in roughly 300 ticks
    alpha_decay: 0.022_763_920_827_3,
    alpha_target: 0.0,
    velocity_decay: 0.6,
};
