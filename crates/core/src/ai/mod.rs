//! Move selection for the automated opponent

mod level;
mod policy;

pub use level::AiLevel;
pub use policy::{MovePolicy, TieredPolicy};
