//! Board, piece and coordinate model

mod geometry;
mod types;

pub use geometry::{in_bounds, midpoint, DIRECTIONS};
pub use types::*;
