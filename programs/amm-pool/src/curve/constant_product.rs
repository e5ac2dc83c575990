//! The Uniswap invariant x * y = k with the 0.3% fee folded into the check.

use anchor_lang::prelude::*;

use crate::{
    error::ErrorCode,
    utils::{CheckedMulDiv, U256},
    FEE_DENOMINATOR, FEE_NUMERATOR,
};

/// ConstantProductCurve carries the pure quoting formulas used by routers
/// and the invariant check used by `Pool::swap`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConstantProductCurve;

impl ConstantProductCurve {
    fn fee_factor() -> U256 {
        U256::from(FEE_DENOMINATOR - FEE_NUMERATOR)
    }

    /// Maximum output for an exact input, after the 0.3% fee.
    ///
    /// amount_out = amount_in * 997 * reserve_out / (reserve_in * 1000 + amount_in * 997)
    pub fn get_amount_out(amount_in: U256, reserve_in: U256, reserve_out: U256) -> Result<U256> {
        require!(!amount_in.is_zero(), ErrorCode::InsufficientInputAmount);
        require!(
            !reserve_in.is_zero() && !reserve_out.is_zero(),
            ErrorCode::InsufficientLiquidity
        );
        let amount_in_with_fee = amount_in.checked_mul_err(Self::fee_factor())?;
        let numerator = amount_in_with_fee.checked_mul_err(reserve_out)?;
        let denominator = reserve_in
            .checked_mul_err(U256::from(FEE_DENOMINATOR))?
            .checked_add_err(amount_in_with_fee)?;
        numerator.checked_div_err(denominator)
    }

    /// Minimum input for an exact output. Rounds up by one unit so the
    /// resulting swap always clears the invariant.
    pub fn get_amount_in(amount_out: U256, reserve_in: U256, reserve_out: U256) -> Result<U256> {
        require!(!amount_out.is_zero(), ErrorCode::InsufficientOutputAmount);
        require!(
            !reserve_in.is_zero() && amount_out < reserve_out,
            ErrorCode::InsufficientLiquidity
        );
        let numerator = reserve_in
            .checked_mul_err(amount_out)?
            .checked_mul_err(U256::from(FEE_DENOMINATOR))?;
        let denominator = reserve_out
            .checked_sub_err(amount_out)?
            .checked_mul_err(Self::fee_factor())?;
        numerator
            .checked_div_err(denominator)?
            .checked_add_err(U256::one())
    }

    /// Amount of the other asset matching `amount_a` at the current price.
    pub fn get_liquidity_quote(amount_a: U256, reserve_a: U256, reserve_b: U256) -> Result<U256> {
        require!(!amount_a.is_zero(), ErrorCode::InsufficientInputAmount);
        require!(
            !reserve_a.is_zero() && !reserve_b.is_zero(),
            ErrorCode::InsufficientLiquidity
        );
        amount_a.checked_mul_div(reserve_b, reserve_a)
    }

    /// Post-swap invariant with the fee charged on the observed inputs:
    /// (b0 * 1000 - in0 * 3) * (b1 * 1000 - in1 * 3) >= r0 * r1 * 1000^2
    pub fn is_invariant_satisfied(
        balance_base: U256,
        balance_token: U256,
        amount_base_in: U256,
        amount_token_in: U256,
        reserve_base: U256,
        reserve_token: U256,
    ) -> Result<bool> {
        let denominator = U256::from(FEE_DENOMINATOR);
        let fee = U256::from(FEE_NUMERATOR);
        let base_adjusted = balance_base
            .checked_mul_err(denominator)?
            .checked_sub_err(amount_base_in.checked_mul_err(fee)?)?;
        let token_adjusted = balance_token
            .checked_mul_err(denominator)?
            .checked_sub_err(amount_token_in.checked_mul_err(fee)?)?;
        let k_after = base_adjusted.checked_mul_err(token_adjusted)?;
        let k_before = reserve_base
            .checked_mul_err(reserve_token)?
            .checked_mul_err(denominator.checked_mul_err(denominator)?)?;
        Ok(k_after >= k_before)
    }
}
