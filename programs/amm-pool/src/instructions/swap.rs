use anchor_lang::prelude::*;

use crate::{
    curve::ConstantProductCurve,
    error::ErrorCode,
    host::{emit, Asset, ExternalLedger, MarketAction, SwapCallback},
    states::{Pool, Swapped},
    utils::U256,
};

impl Pool {
    /// Sends the requested outputs to `to` first and collects payment after.
    ///
    /// Steps:
    /// 1) Validate the request against the reserves and the recipient.
    /// 2) Optimistically transfer the outputs.
    /// 3) If `data` is non-empty, run the recipient's flash-swap callback.
    /// 4) Whatever arrived beyond `reserve - out` is the input.
    /// 5) Check the fee-adjusted constant-product invariant.
    /// 6) Sync reserves and emit `Swapped`.
    ///
    /// Failures after step 2 leave the outputs sent; the host's all-or-nothing
    /// call semantics undo them.
    pub fn swap(
        &mut self,
        ledger: &mut dyn ExternalLedger,
        caller: &Pubkey,
        amount_base_out: u64,
        amount_token_out: U256,
        to: &Pubkey,
        data: &[u8],
    ) -> Result<()> {
        self.with_lock(|pool| {
            pool.check_authorized(ledger, MarketAction::Trade, caller)?;

            // --- 1) Validate ---
            require!(
                amount_base_out > 0 || !amount_token_out.is_zero(),
                ErrorCode::InsufficientOutputAmount
            );
            let (reserve_base, reserve_token) = pool.reserves();
            require!(
                amount_base_out < reserve_base && amount_token_out < reserve_token,
                ErrorCode::InsufficientLiquidity
            );
            require!(*to != pool.address && *to != pool.token, ErrorCode::InvalidTo);

            // --- 2) Optimistic transfer ---
            let address = pool.address;
            if amount_base_out > 0 {
                ledger.transfer_to(Asset::Native, &address, to, U256::from(amount_base_out))?;
            }
            if !amount_token_out.is_zero() {
                ledger.transfer_to(pool.token_asset(), &address, to, amount_token_out)?;
            }

            // --- 3) Flash-swap hop, pool still locked ---
            if !data.is_empty() {
                ledger.invoke_callback(
                    pool,
                    SwapCallback {
                        target: *to,
                        sender: *caller,
                        amount_base_out,
                        amount_token_out,
                        data,
                    },
                )?;
            }

            // --- 4) Inputs ---
            let (balance_base, balance_token) = pool.held_balances(ledger)?;
            let expected_base = reserve_base - amount_base_out;
            let expected_token = reserve_token - amount_token_out;
            let amount_base_in = balance_base.saturating_sub(expected_base);
            let amount_token_in = balance_token.saturating_sub(expected_token);
            require!(
                amount_base_in > 0 || !amount_token_in.is_zero(),
                ErrorCode::ZeroInputAmount
            );

            // --- 5) Invariant with the 0.3% fee ---
            require!(
                ConstantProductCurve::is_invariant_satisfied(
                    U256::from(balance_base),
                    balance_token,
                    U256::from(amount_base_in),
                    amount_token_in,
                    U256::from(reserve_base),
                    reserve_token,
                )?,
                ErrorCode::InsufficientInputAmount
            );

            // --- 6) Sync and notify ---
            pool.update_reserves(ledger, balance_base, balance_token);
            emit(
                ledger,
                Swapped {
                    pool: address,
                    sender: *caller,
                    to: *to,
                    amount_base_in,
                    amount_token_in,
                    amount_base_out,
                    amount_token_out,
                },
            );
            Ok(())
        })
    }
}
