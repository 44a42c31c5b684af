mod aggregates;
mod nd_tree;

pub use aggregates::*;
pub use nd_tree::*;
