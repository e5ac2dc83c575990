use anchor_lang::prelude::*;

use crate::{
    curve::{AssetAmounts, CurveCalculator},
    error::ErrorCode,
    host::{emit, Asset, ExternalLedger, MarketAction},
    states::{LiquidityBurned, Pool},
    utils::U256,
};

impl Pool {
    /// Redeems the receipts the pool holds for itself, paying the underlying
    /// assets to `to`.
    ///
    /// Steps:
    /// 1) The receipts to burn are the pool's own receipt balance.
    /// 2) Mint the protocol fee against the current reserves.
    /// 3) Pro-rata share of the held balances, floored.
    /// 4) Burn, pay out, re-sync, record `k_last` if the fee is on.
    /// 5) Emit `LiquidityBurned`.
    pub fn burn(&mut self, ledger: &mut dyn ExternalLedger, caller: &Pubkey, to: &Pubkey) -> Result<AssetAmounts> {
        self.with_lock(|pool| {
            pool.check_authorized(ledger, MarketAction::RemoveLiquidity, caller)?;

            // --- 1) Receipts sent back to the pool ---
            let (reserve_base, reserve_token) = pool.reserves();
            let (balance_base, balance_token) = pool.held_balances(ledger)?;
            let liquidity = pool.liquidity.balance_of(&pool.address);
            require!(!liquidity.is_zero(), ErrorCode::InsufficientLiquidityBurned);

            // --- 2) Protocol fee ---
            let fee_on = pool.mint_fee(ledger, reserve_base, reserve_token)?;

            // --- 3) Pro-rata amounts ---
            let amounts = CurveCalculator::liquidity_to_assets(
                liquidity,
                pool.liquidity.total_supply,
                balance_base,
                balance_token,
            )?;
            require!(
                amounts.base > 0 && !amounts.token.is_zero(),
                ErrorCode::InsufficientLiquidityBurned
            );

            // --- 4) Burn, pay out, sync ---
            let address = pool.address;
            pool.liquidity.burn(&address, liquidity)?;
            ledger.transfer_to(Asset::Native, &address, to, U256::from(amounts.base))?;
            ledger.transfer_to(pool.token_asset(), &address, to, amounts.token)?;
            let (balance_base, balance_token) = pool.held_balances(ledger)?;
            pool.update_reserves(ledger, balance_base, balance_token);
            if fee_on {
                pool.record_k_last()?;
            }

            // --- 5) Notify ---
            emit(
                ledger,
                LiquidityBurned {
                    pool: address,
                    sender: *caller,
                    to: *to,
                    amount_base: amounts.base,
                    amount_token: amounts.token,
                    liquidity,
                },
            );
            Ok(amounts)
        })
    }
}
