//! Per-receipt share of realized protocol fees.
//!
//! Fee receipts are credited to the stake present when the distributor first
//! sees them, as a growing amount per staked receipt scaled by `PRECISION^2`.
//! A stake entered later snapshots the current share, so it never takes fees
//! realized before it joined.

use amm_pool::{utils::CheckedMulDiv, PRECISION, U256};
use anchor_lang::prelude::*;

use crate::error::ErrorCode;

pub struct FeeShare {}

impl FeeShare {
    fn scale() -> U256 {
        U256::from(PRECISION * PRECISION)
    }

    /// Spread `realized` receipts over `total_staked`. Returns the
    /// per-receipt increment and the receipts it actually accounts for; the
    /// rounding remainder stays uncredited for the next round.
    pub fn credit(realized: U256, total_staked: U256) -> Result<(U256, U256)> {
        if realized.is_zero() || total_staked.is_zero() {
            return Ok((U256::zero(), U256::zero()));
        }
        let increment = realized.checked_mul_div(Self::scale(), total_staked)?;
        let credited = increment.checked_mul_div(total_staked, Self::scale())?;
        Ok((increment, credited))
    }

    /// staked * (per_receipt - paid) / PRECISION^2
    pub fn earned(staked: U256, per_receipt: U256, paid: U256) -> Result<U256> {
        let delta = per_receipt.checked_sub(paid).ok_or(ErrorCode::MathOverflow)?;
        staked.checked_mul_div(delta, Self::scale())
    }
}
