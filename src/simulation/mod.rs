mod state;
mod engine;

pub use state::*;
pub use engine::*;

#[cfg(test)]
mod simulation_tests;
