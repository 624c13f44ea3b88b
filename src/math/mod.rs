mod aabb;
mod capsule;
pub mod sampling;

pub use aabb::{safe_invert, Aabb};
pub use capsule::{Capsule, T_MIN};
