//! Stake weight arithmetic.
//!
//! The growth index is the pool's liquidity value per receipt,
//! `sqrt(reserve_base * reserve_token) * PRECISION / total_supply`. A stake's
//! weight is its value at the index it was entered at, so the part of its
//! current value above the weight is growth earned while staked.

use amm_pool::{utils::CheckedMulDiv, Pool, PRECISION, U256};
use anchor_lang::prelude::*;

use crate::error::ErrorCode;

pub struct WeightCalculator {}

impl WeightCalculator {
    pub fn growth_index(pool: &Pool) -> Result<U256> {
        let total_supply = pool.total_supply();
        require!(!total_supply.is_zero(), ErrorCode::EmptyPool);
        pool.root_k()?
            .checked_mul_div(U256::from(PRECISION), total_supply)
    }

    /// `amount` receipts valued at `index`.
    pub fn value(amount: U256, index: U256) -> Result<U256> {
        amount.checked_mul_div(index, U256::from(PRECISION))
    }

    /// Growth of `staked` above its entry `weight`. Never negative: a dip in
    /// the index exposes nothing.
    pub fn exposure(staked: U256, weight: U256, index: U256) -> Result<U256> {
        Ok(Self::value(staked, index)?.saturating_sub(weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(v: u64) -> U256 {
        U256::from(v)
    }

    #[test]
    fn exposure_is_growth_since_entry() {
        let entry = u(PRECISION);
        let weight = WeightCalculator::value(u(1_000), entry).unwrap();
        assert_eq!(weight, u(1_000));
        // index grew 5%
        let now = u(PRECISION + PRECISION / 20);
        assert_eq!(WeightCalculator::exposure(u(1_000), weight, now).unwrap(), u(50));
        // and dipped back below entry
        assert_eq!(
            WeightCalculator::exposure(u(1_000), weight, u(PRECISION - 1)).unwrap(),
            U256::zero()
        );
    }

    #[test]
    fn empty_pool_has_no_index() {
        let pool = Pool::new(Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        assert!(WeightCalculator::growth_index(&pool).is_err());
    }
}
