//! Force-directed layout in `D` dimensions.
//!
//! Nodes live in a [`simulation::SimulationState`]; [`forces`] such as the
//! Barnes-Hut many-body force and the collision force update their velocities
//! each tick, and [`simulation::Simulation`] cools alpha and integrates. Both
//! tree-based forces rebuild an [`tree::NdTree`] every application, a `2^D`-ary
//! spatial tree (a quadtree in 2D, an octree in 3D) carrying per-subtree
//! aggregates.
pub mod utils;
pub mod models;
pub mod tree;
pub mod forces;
pub mod simulation;
