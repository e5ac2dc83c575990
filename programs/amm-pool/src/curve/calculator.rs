//! Liquidity issuance, redemption and swap quoting.

use anchor_lang::prelude::*;

use crate::{
    curve::constant_product::ConstantProductCurve,
    error::ErrorCode,
    utils::{sqrt_product, CheckedMulDiv, U256},
    MINIMUM_LIQUIDITY,
};

/// The direction of a trade through the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TradeDirection {
    /// Input base, output token
    BaseForToken,
    /// Input token, output base
    TokenForBase,
}

impl TradeDirection {
    /// Given a trade direction, gives the opposite direction of the trade.
    pub fn opposite(&self) -> TradeDirection {
        match self {
            TradeDirection::BaseForToken => TradeDirection::TokenForBase,
            TradeDirection::TokenForBase => TradeDirection::BaseForToken,
        }
    }
}

/// Amounts of both pool assets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AssetAmounts {
    pub base: u64,
    pub token: U256,
}

/// Outputs to request from `Pool::swap` for an exact-input trade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapQuote {
    pub amount_in: U256,
    pub amount_base_out: u64,
    pub amount_token_out: U256,
}

pub struct CurveCalculator {}

impl CurveCalculator {
    /// Receipts for the first deposit: the geometric mean of the deposit,
    /// less `MINIMUM_LIQUIDITY` which the caller locks away.
    pub fn initial_liquidity(amount_base: u64, amount_token: U256) -> Result<U256> {
        let root = sqrt_product(U256::from(amount_base), amount_token)?;
        Ok(root
            .checked_sub(U256::from(MINIMUM_LIQUIDITY))
            .ok_or(ErrorCode::InsufficientLiquidity)?)
    }

    /// Receipts for a later deposit: the smaller of the two proportional claims,
    /// so a one-sided excess is donated to the pool.
    pub fn proportional_liquidity(
        amount_base: u64,
        amount_token: U256,
        reserve_base: u64,
        reserve_token: U256,
        total_supply: U256,
    ) -> Result<U256> {
        let by_base = U256::from(amount_base).checked_mul_div(total_supply, U256::from(reserve_base))?;
        let by_token = amount_token.checked_mul_div(total_supply, reserve_token)?;
        Ok(by_base.min(by_token))
    }

    /// Pro-rata share of the held balances for `liquidity` receipts, floored
    /// in favor of the pool.
    pub fn liquidity_to_assets(
        liquidity: U256,
        total_supply: U256,
        balance_base: u64,
        balance_token: U256,
    ) -> Result<AssetAmounts> {
        require!(!total_supply.is_zero(), ErrorCode::InsufficientLiquidity);
        let base = liquidity
            .checked_mul_div(U256::from(balance_base), total_supply)?
            .checked_as_u64()?;
        let token = liquidity.checked_mul_div(balance_token, total_supply)?;
        Ok(AssetAmounts { base, token })
    }

    /// Quote an exact-input trade against the given reserves.
    pub fn swap_exact_input(
        amount_in: U256,
        direction: TradeDirection,
        reserve_base: u64,
        reserve_token: U256,
    ) -> Result<SwapQuote> {
        let quote = match direction {
            TradeDirection::BaseForToken => SwapQuote {
                amount_in,
                amount_base_out: 0,
                amount_token_out: ConstantProductCurve::get_amount_out(
                    amount_in,
                    U256::from(reserve_base),
                    reserve_token,
                )?,
            },
            TradeDirection::TokenForBase => SwapQuote {
                amount_in,
                amount_base_out: ConstantProductCurve::get_amount_out(
                    amount_in,
                    reserve_token,
                    U256::from(reserve_base),
                )?
                .checked_as_u64()?,
                amount_token_out: U256::zero(),
            },
        };
        require!(
            quote.amount_base_out > 0 || !quote.amount_token_out.is_zero(),
            ErrorCode::InsufficientOutputAmount
        );
        Ok(quote)
    }

    /// Quote an exact-output trade; `amount_out` is in the output asset of `direction`.
    pub fn swap_exact_output(
        amount_out: U256,
        direction: TradeDirection,
        reserve_base: u64,
        reserve_token: U256,
    ) -> Result<SwapQuote> {
        Ok(match direction {
            TradeDirection::BaseForToken => SwapQuote {
                amount_in: ConstantProductCurve::get_amount_in(
                    amount_out,
                    U256::from(reserve_base),
                    reserve_token,
                )?,
                amount_base_out: 0,
                amount_token_out: amount_out,
            },
            TradeDirection::TokenForBase => SwapQuote {
                amount_in: ConstantProductCurve::get_amount_in(
                    amount_out,
                    reserve_token,
                    U256::from(reserve_base),
                )?,
                amount_base_out: amount_out.checked_as_u64()?,
                amount_token_out: U256::zero(),
            },
        })
    }
}
