use amm_pool::{host::emit, ExternalLedger, U256};
use anchor_lang::prelude::*;

use crate::{
    error::ErrorCode,
    states::{EpochEnabled, MiningPool},
};

impl MiningPool {
    /// Starts an epoch paying `reward` over `duration` blocks, or restarts the
    /// running one with its unpaid remainder folded into the new rate. The
    /// reward must already be held by the pool.
    ///
    /// Steps:
    /// 1) Settle the accumulator at the current block.
    /// 2) New rate: `reward / duration`, or `(reward + remaining) / duration`
    ///    while an epoch is running.
    /// 3) The held fund must be non-empty and cover `rate * duration`.
    /// 4) Epoch runs `[now, now + duration]`; emit `EpochEnabled`.
    pub fn notify_reward_amount(
        &mut self,
        ledger: &mut dyn ExternalLedger,
        caller: &Pubkey,
        reward: U256,
    ) -> Result<()> {
        require_keys_eq!(*caller, self.governance, ErrorCode::Unauthorized);
        self.with_lock(|mining| {
            let now = ledger.block_height();

            // --- 1) Freeze prior accrual ---
            mining.update_reward(now, None)?;

            // --- 2) Rate ---
            let duration = U256::from(mining.duration);
            let reward_rate = if now >= mining.mining_period_end_block {
                reward / duration
            } else {
                let remaining = U256::from(mining.mining_period_end_block - now);
                let leftover = remaining
                    .checked_mul(mining.reward_rate)
                    .ok_or(ErrorCode::MathOverflow)?;
                reward.checked_add(leftover).ok_or(ErrorCode::MathOverflow)? / duration
            };

            // --- 3) Fund check ---
            let balance = mining.reward_balance(ledger)?;
            require!(!balance.is_zero(), ErrorCode::InvalidBalance);
            let promised = reward_rate
                .checked_mul(duration)
                .ok_or(ErrorCode::MathOverflow)?;
            require!(promised <= balance, ErrorCode::ProvidedRewardTooHigh);

            // --- 4) Open the epoch ---
            mining.reward_rate = reward_rate;
            mining.last_update_block = now;
            mining.mining_period_end_block = now
                .checked_add(mining.duration)
                .ok_or(ErrorCode::MathOverflow)?;
            emit(
                ledger,
                EpochEnabled {
                    mining_pool: mining.address,
                    reward,
                    reward_rate,
                    start_block: now,
                    end_block: mining.mining_period_end_block,
                },
            );
            Ok(())
        })
    }
}
