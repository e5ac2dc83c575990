pub mod events;
pub use events::*;

pub mod staker;
pub use staker::*;

pub mod staking_pool;
pub use staking_pool::*;
