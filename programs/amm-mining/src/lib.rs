//! Mining distributor: streams a funded reward token to miners of a staking
//! token at a constant per-block rate over fixed-length epochs.

pub mod curve;
pub mod error;
pub mod instructions;
pub mod states;

pub use states::*;
