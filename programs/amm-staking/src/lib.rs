//! Staking distributor: holders of a pool's liquidity receipts lock them here
//! and share the protocol-fee liquidity the pool mints to this distributor.
//!
//! The distributor must be the pool's `fee_to`. Fee receipts are shared per
//! staked receipt among the stakes present when the distributor first sees
//! them; each stake's weight tracks its value at the pool's growth index.

pub mod curve;
pub mod error;
pub mod instructions;
pub mod states;

pub use states::*;
