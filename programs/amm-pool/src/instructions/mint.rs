use anchor_lang::prelude::*;

use crate::{
    curve::CurveCalculator,
    error::ErrorCode,
    host::{emit, ExternalLedger, MarketAction},
    states::{LiquidityMinted, Pool},
    utils::U256,
    MINIMUM_LIQUIDITY, ZERO_ADDRESS,
};

impl Pool {
    /// Issues receipts to `to` for whatever the pool received above its
    /// reserves since the last update.
    ///
    /// Steps:
    /// 1) Read held balances; the deposit is the excess over the reserves.
    /// 2) Mint the protocol fee on sqrt(k) growth, against the old reserves.
    /// 3) Price the deposit: geometric mean on the first mint (locking
    ///    `MINIMUM_LIQUIDITY` at the zero address), smaller proportional claim after.
    /// 4) Mint the receipts, sync reserves, record `k_last` if the fee is on.
    /// 5) Emit `LiquidityMinted`.
    pub fn mint(&mut self, ledger: &mut dyn ExternalLedger, caller: &Pubkey, to: &Pubkey) -> Result<U256> {
        self.with_lock(|pool| {
            pool.check_authorized(ledger, MarketAction::ProvideLiquidity, caller)?;

            // --- 1) Deposit = held - reserves ---
            let (reserve_base, reserve_token) = pool.reserves();
            let (balance_base, balance_token) = pool.held_balances(ledger)?;
            let amount_base = balance_base
                .checked_sub(reserve_base)
                .ok_or(ErrorCode::MathOverflow)?;
            let amount_token = balance_token.checked_sub_err(reserve_token)?;

            // --- 2) Protocol fee, before the supply is read ---
            let fee_on = pool.mint_fee(ledger, reserve_base, reserve_token)?;

            // --- 3) Price the deposit ---
            let total_supply = pool.liquidity.total_supply;
            let liquidity = if total_supply.is_zero() {
                let liquidity = CurveCalculator::initial_liquidity(amount_base, amount_token)?;
                pool.liquidity.mint(&ZERO_ADDRESS, U256::from(MINIMUM_LIQUIDITY))?;
                liquidity
            } else {
                CurveCalculator::proportional_liquidity(
                    amount_base,
                    amount_token,
                    reserve_base,
                    reserve_token,
                    total_supply,
                )?
            };
            require!(!liquidity.is_zero(), ErrorCode::InsufficientLiquidity);

            // --- 4) Issue and sync ---
            pool.liquidity.mint(to, liquidity)?;
            pool.update_reserves(ledger, balance_base, balance_token);
            if fee_on {
                pool.record_k_last()?;
            }

            // --- 5) Notify ---
            emit(
                ledger,
                LiquidityMinted {
                    pool: pool.address,
                    sender: *caller,
                    to: *to,
                    amount_base,
                    amount_token,
                    liquidity,
                },
            );
            Ok(liquidity)
        })
    }
}
