pub mod stake;
pub use stake::*;

pub mod collect;
pub use collect::*;

pub mod unstake;
pub use unstake::*;
