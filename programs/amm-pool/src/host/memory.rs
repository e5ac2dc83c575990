//! Deterministic host used by tests and the simulator client.

use anchor_lang::{prelude::*, Event};
use std::collections::{BTreeMap, BTreeSet};

use super::{Asset, ExternalLedger, MarketAction, SwapCallback};
use crate::{
    error::ErrorCode,
    states::Pool,
    storage::{self, Persist, StateStore},
    utils::U256,
};

/// A flash-swap recipient registered with the [`InMemoryLedger`].
pub trait FlashBorrower {
    fn on_swap(&mut self, ledger: &mut InMemoryLedger, pool: &mut Pool, call: &SwapCallback<'_>) -> Result<()>;
}

#[derive(Default)]
pub struct InMemoryLedger {
    balances: BTreeMap<(Asset, Pubkey), U256>,
    block_height: u64,
    events: Vec<Vec<u8>>,
    denied: BTreeSet<(MarketAction, Pubkey)>,
    borrowers: BTreeMap<Pubkey, Box<dyn FlashBorrower>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self, asset: Asset, holder: &Pubkey) -> U256 {
        self.balances
            .get(&(asset, *holder))
            .copied()
            .unwrap_or_default()
    }

    /// Mint `amount` of `asset` out of thin air, the faucet of the simulator.
    pub fn credit(&mut self, asset: Asset, holder: &Pubkey, amount: U256) -> Result<()> {
        let balance = self.balance(asset, holder).checked_add_err(amount)?;
        if asset == Asset::Native {
            balance.checked_as_u64()?;
        }
        self.balances.insert((asset, *holder), balance);
        Ok(())
    }

    fn debit(&mut self, asset: Asset, holder: &Pubkey, amount: U256) -> Result<()> {
        let balance = self
            .balance(asset, holder)
            .checked_sub(amount)
            .ok_or(ErrorCode::InsufficientBalance)?;
        if balance.is_zero() {
            self.balances.remove(&(asset, *holder));
        } else {
            self.balances.insert((asset, *holder), balance);
        }
        Ok(())
    }

    fn move_funds(&mut self, asset: Asset, from: &Pubkey, to: &Pubkey, amount: U256) -> Result<()> {
        self.debit(asset, from, amount)?;
        self.credit(asset, to, amount)
    }

    pub fn set_block_height(&mut self, height: u64) {
        self.block_height = height;
    }

    pub fn advance_blocks(&mut self, blocks: u64) -> Result<u64> {
        self.block_height = self
            .block_height
            .checked_add(blocks)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(self.block_height)
    }

    pub fn register_borrower(&mut self, address: Pubkey, borrower: impl FlashBorrower + 'static) {
        self.borrowers.insert(address, Box::new(borrower));
    }

    /// Make the market refuse `action` for `caller`.
    pub fn deny(&mut self, action: MarketAction, caller: Pubkey) {
        self.denied.insert((action, caller));
    }

    pub fn allow(&mut self, action: MarketAction, caller: &Pubkey) {
        self.denied.remove(&(action, *caller));
    }

    /// Raw notifications in emission order.
    pub fn events(&self) -> &[Vec<u8>] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.events)
    }

    /// Every recorded notification of type `E`, decoded.
    pub fn decode_events<E: Event>(&self) -> Vec<E> {
        self.events
            .iter()
            .filter_map(|data| {
                let mut body = data.strip_prefix(E::DISCRIMINATOR)?;
                E::deserialize(&mut body).ok()
            })
            .collect()
    }

    /// Run `f` with all-or-nothing semantics: if it fails, balances, recorded
    /// notifications and `state` are restored to their values before the call.
    pub fn atomically<S, T, F>(&mut self, state: &mut S, f: F) -> Result<T>
    where
        S: Clone,
        F: FnOnce(&mut Self, &mut S) -> Result<T>,
    {
        let balances = self.balances.clone();
        let emitted = self.events.len();
        let snapshot = state.clone();

        let result = f(self, state);
        if result.is_err() {
            self.balances = balances;
            self.events.truncate(emitted);
            *state = snapshot;
        }
        result
    }
}

impl ExternalLedger for InMemoryLedger {
    fn transfer_from(&mut self, asset: Asset, from: &Pubkey, to: &Pubkey, amount: U256) -> Result<()> {
        self.move_funds(asset, from, to, amount)
    }

    fn transfer_to(&mut self, asset: Asset, from: &Pubkey, to: &Pubkey, amount: U256) -> Result<()> {
        self.move_funds(asset, from, to, amount)
    }

    fn get_balance(&self, asset: Asset, holder: &Pubkey) -> Result<U256> {
        Ok(self.balance(asset, holder))
    }

    fn invoke_callback(&mut self, pool: &mut Pool, call: SwapCallback<'_>) -> Result<()> {
        let mut borrower = self
            .borrowers
            .remove(&call.target)
            .ok_or(ErrorCode::CallbackTargetMissing)?;
        let result = borrower.on_swap(self, pool, &call);
        self.borrowers.insert(call.target, borrower);
        result
    }

    fn block_height(&self) -> u64 {
        self.block_height
    }

    fn is_authorized(&self, action: MarketAction, caller: &Pubkey) -> bool {
        !self.denied.contains(&(action, *caller))
    }

    fn emit_event(&mut self, data: Vec<u8>) {
        self.events.push(data);
    }
}

impl Persist for InMemoryLedger {
    fn save(&self, namespace: &str, store: &mut dyn StateStore) -> Result<()> {
        storage::clear(store, namespace);
        storage::put(store, &storage::field_key(namespace, "BlockHeight"), &self.block_height)?;
        for ((asset, holder), balance) in &self.balances {
            let key = storage::field_key(namespace, &format!("Balance:{}:{}", asset, holder));
            storage::put(store, &key, balance)?;
        }
        let denied: Vec<(MarketAction, Pubkey)> = self.denied.iter().copied().collect();
        storage::put(store, &storage::field_key(namespace, "Denied"), &denied)?;
        Ok(())
    }

    fn load(namespace: &str, store: &dyn StateStore) -> Result<Self> {
        let mut ledger = InMemoryLedger::new();
        ledger.block_height = storage::get(store, &storage::field_key(namespace, "BlockHeight"))?.unwrap_or_default();
        for (parts, balance) in storage::scan::<U256>(store, namespace, "Balance")? {
            let [asset, holder] = storage::key_parts::<2>(&parts)?;
            let asset = match asset.as_str() {
                "native" => Asset::Native,
                token => Asset::Token(storage::parse_address(token)?),
            };
            ledger.balances.insert((asset, storage::parse_address(holder)?), balance);
        }
        let denied: Vec<(MarketAction, Pubkey)> =
            storage::get(store, &storage::field_key(namespace, "Denied"))?.unwrap_or_default();
        ledger.denied.extend(denied);
        Ok(ledger)
    }
}
