//! Protocol fee minted on growth of sqrt(k).

use anchor_lang::prelude::*;

use crate::{
    utils::{CheckedMulDiv, U256},
    PROTOCOL_FEE_DIVISOR,
};

pub struct Fees {}

impl Fees {
    /// Liquidity to mint to the fee recipient so that it owns 1/6 of the
    /// growth in `sqrt(k)` since `root_k_last`:
    ///
    /// total_supply * (root_k - root_k_last) / (root_k * 5 + root_k_last)
    ///
    /// Returns zero when the pool has not grown.
    pub fn protocol_fee_liquidity(
        total_supply: U256,
        root_k: U256,
        root_k_last: U256,
    ) -> Result<U256> {
        if root_k <= root_k_last {
            return Ok(U256::zero());
        }
        let growth = root_k.checked_sub_err(root_k_last)?;
        let denominator = root_k
            .checked_mul_err(U256::from(PROTOCOL_FEE_DIVISOR))?
            .checked_add_err(root_k_last)?;
        total_supply.checked_mul_div(growth, denominator)
    }
}
