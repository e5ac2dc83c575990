use anchor_lang::prelude::*;

use crate::{
    host::{emit, Asset, ExternalLedger},
    states::{Pool, Skimmed},
    utils::U256,
};

impl Pool {
    /// Send balances above the recorded reserves to `to`.
    pub fn skim(&mut self, ledger: &mut dyn ExternalLedger, to: &Pubkey) -> Result<()> {
        self.with_lock(|pool| {
            let (balance_base, balance_token) = pool.held_balances(ledger)?;
            let amount_base = balance_base.saturating_sub(pool.reserve_base);
            let amount_token = balance_token.saturating_sub(pool.reserve_token);

            if amount_base > 0 {
                ledger.transfer_to(Asset::Native, &pool.address, to, U256::from(amount_base))?;
            }
            if !amount_token.is_zero() {
                ledger.transfer_to(pool.token_asset(), &pool.address, to, amount_token)?;
            }

            emit(
                ledger,
                Skimmed {
                    pool: pool.address,
                    to: *to,
                    amount_base,
                    amount_token,
                },
            );
            Ok(())
        })
    }
}
