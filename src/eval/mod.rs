//! The N-tuple evaluator: pattern catalogue, weight storage, and checkpoint IO
//! (§4.E, §4.I).

pub mod network;
pub mod patterns;
pub mod persistence;

pub mod prelude {
    pub use super::network::Network;
    pub use super::patterns::{NUM_PATTERNS, PATTERN_SIZE, PATTERNS};
}

pub use prelude::*;
