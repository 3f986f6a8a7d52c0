pub mod core;
pub mod errors;
pub mod eval;
pub mod mcts;
pub mod policy;
pub mod train;

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::errors::{ContrastError, Result};
    pub use crate::eval::prelude::*;
    pub use crate::mcts::Mcts;
    pub use crate::policy::prelude::*;
    pub use crate::train::{Opponent, Trainer, TrainerConfig};
}
