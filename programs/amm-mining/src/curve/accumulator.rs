//! Reward-per-token accumulator.
//!
//! `reward_per_token` only ever grows. A miner's entitlement is the growth
//! since their last snapshot times their balance, so no iteration over
//! miners is needed.

use amm_pool::{utils::CheckedMulDiv, PRECISION, U256};
use anchor_lang::prelude::*;

use crate::error::ErrorCode;

pub struct RewardAccumulator {}

impl RewardAccumulator {
    /// stored + (applicable - last_update) * rate * PRECISION / total_supply
    pub fn reward_per_token(
        stored: U256,
        last_update_block: u64,
        applicable_block: u64,
        reward_rate: U256,
        total_supply: U256,
    ) -> Result<U256> {
        if total_supply.is_zero() {
            return Ok(stored);
        }
        let blocks = U256::from(applicable_block.saturating_sub(last_update_block));
        let accrued = blocks
            .checked_mul(reward_rate)
            .and_then(|v| v.checked_mul(U256::from(PRECISION)))
            .ok_or(ErrorCode::MathOverflow)?
            / total_supply;
        Ok(stored.checked_add(accrued).ok_or(ErrorCode::MathOverflow)?)
    }

    /// balance * (reward_per_token - paid) / PRECISION + reward
    pub fn earned(balance: U256, reward_per_token: U256, paid: U256, reward: U256) -> Result<U256> {
        let delta = reward_per_token
            .checked_sub(paid)
            .ok_or(ErrorCode::MathOverflow)?;
        let accrued = balance.checked_mul_div(delta, U256::from(PRECISION))?;
        Ok(accrued.checked_add(reward).ok_or(ErrorCode::MathOverflow)?)
    }
}
