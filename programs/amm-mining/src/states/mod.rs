pub mod events;
pub use events::*;

pub mod miner;
pub use miner::*;

pub mod mining_pool;
pub use mining_pool::*;
