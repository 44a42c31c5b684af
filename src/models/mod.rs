mod vector;
mod bounding_box;

pub use vector::*;
pub use bounding_box::*;
