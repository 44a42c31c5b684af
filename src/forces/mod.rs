mod force;
mod many_body;
mod collide;
mod center;
mod direction;

pub use force::*;
pub use many_body::*;
pub use collide::*;
pub use center::*;
pub use direction::*;

#[cfg(test)]
mod collide_tests;
#[cfg(test)]
mod center_direction_tests;
