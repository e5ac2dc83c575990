use amm_pool::U256;
use anchor_lang::prelude::*;

/// Per-account stake record. Zeroed, not removed, on a full unstake.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Staker {
    pub staked_balance: U256,
    /// Entry value of the stake at the growth index; never decreases while
    /// the account only adds stake.
    pub weight: U256,
    /// Fee share per receipt at the last settle; every settle pays out in
    /// full, so nothing else is carried.
    pub reward_per_receipt_paid: U256,
}
