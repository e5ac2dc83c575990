//! Constant-product exchange pool for a native base asset and one token.
//!
//! The pool keeps its own liquidity-receipt ledger and reaches every other
//! asset through the [`ExternalLedger`] host boundary.

use anchor_lang::prelude::Pubkey;

pub mod curve;
pub mod error;
pub mod host;
pub mod instructions;
pub mod states;
pub mod storage;
pub mod utils;

pub use host::*;
pub use states::*;
pub use utils::U256;

/// Liquidity permanently locked at the zero address by the first mint.
pub const MINIMUM_LIQUIDITY: u64 = 1_000;

/// Swap fee of 0.3%, applied inside the invariant check.
pub const FEE_NUMERATOR: u64 = 3;
pub const FEE_DENOMINATOR: u64 = 1_000;

/// `rootK * PROTOCOL_FEE_DIVISOR + rootKLast` is the protocol fee denominator,
/// which hands the fee recipient 1/6 of the growth in `sqrt(k)`.
pub const PROTOCOL_FEE_DIVISOR: u64 = 5;

/// Fixed-point scale shared by the reward engines.
pub const PRECISION: u64 = 100_000_000;

/// Holder of the permanently locked `MINIMUM_LIQUIDITY`.
pub const ZERO_ADDRESS: Pubkey = Pubkey::new_from_array([0u8; 32]);
