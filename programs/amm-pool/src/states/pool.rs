use anchor_lang::prelude::*;

use crate::{
    curve::Fees,
    error::ErrorCode,
    host::{emit, Asset, ExternalLedger, MarketAction},
    states::{LiquidityApproved, LiquidityLedger, LiquidityTransferred, ProtocolFeeMinted, ReservesSynced},
    storage::{self, Persist, StateStore},
    utils::{sqrt_product, U256},
};

/// Reserve and receipt state of one base/token pair.
///
/// Fields are crate-private: a flash-swap borrower holds `&mut Pool` while the
/// guard is held and must only reach it through the locked entry points.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct Pool {
    /// Address the pool holds its assets under.
    pub(crate) address: Pubkey,
    /// Token contract of the non-native side.
    pub(crate) token: Pubkey,
    /// Party allowed to change `fee_to` and permissioning.
    pub(crate) governance: Pubkey,
    pub(crate) reserve_base: u64,
    pub(crate) reserve_token: U256,
    /// `reserve_base * reserve_token` as of the last mint or burn, zero while
    /// the protocol fee is off.
    pub(crate) k_last: U256,
    pub(crate) fee_to: Option<Pubkey>,
    pub(crate) permissioned: bool,
    pub(crate) liquidity: LiquidityLedger,
    locked: bool,
}

impl Pool {
    pub fn new(address: Pubkey, token: Pubkey, governance: Pubkey) -> Self {
        Self {
            address,
            token,
            governance,
            reserve_base: 0,
            reserve_token: U256::zero(),
            k_last: U256::zero(),
            fee_to: None,
            permissioned: false,
            liquidity: LiquidityLedger::default(),
            locked: false,
        }
    }

    pub fn address(&self) -> Pubkey {
        self.address
    }

    pub fn token(&self) -> Pubkey {
        self.token
    }

    pub fn governance(&self) -> Pubkey {
        self.governance
    }

    pub fn k_last(&self) -> U256 {
        self.k_last
    }

    pub fn fee_to(&self) -> Option<Pubkey> {
        self.fee_to
    }

    pub fn permissioned(&self) -> bool {
        self.permissioned
    }

    pub fn token_asset(&self) -> Asset {
        Asset::Token(self.token)
    }

    pub fn reserves(&self) -> (u64, U256) {
        (self.reserve_base, self.reserve_token)
    }

    pub fn total_supply(&self) -> U256 {
        self.liquidity.total_supply
    }

    pub fn balance_of(&self, owner: &Pubkey) -> U256 {
        self.liquidity.balance_of(owner)
    }

    pub fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> U256 {
        self.liquidity.allowance(owner, spender)
    }

    pub fn root_k(&self) -> Result<U256> {
        sqrt_product(U256::from(self.reserve_base), self.reserve_token)
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Run `f` with the reentrancy guard held. The guard is released whether
    /// or not `f` succeeds.
    pub(crate) fn with_lock<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        require!(!self.locked, ErrorCode::Locked);
        self.locked = true;
        let result = f(self);
        self.locked = false;
        result
    }

    pub(crate) fn check_authorized(
        &self,
        ledger: &dyn ExternalLedger,
        action: MarketAction,
        caller: &Pubkey,
    ) -> Result<()> {
        if self.permissioned {
            require!(ledger.is_authorized(action, caller), ErrorCode::Unauthorized);
        }
        Ok(())
    }

    /// Balances actually held by the pool.
    pub fn held_balances(&self, ledger: &dyn ExternalLedger) -> Result<(u64, U256)> {
        let base = ledger
            .get_balance(Asset::Native, &self.address)?
            .checked_as_u64()?;
        let token = ledger.get_balance(self.token_asset(), &self.address)?;
        Ok((base, token))
    }

    pub(crate) fn update_reserves(&mut self, ledger: &mut dyn ExternalLedger, balance_base: u64, balance_token: U256) {
        self.reserve_base = balance_base;
        self.reserve_token = balance_token;
        emit(
            ledger,
            ReservesSynced {
                pool: self.address,
                reserve_base: balance_base,
                reserve_token: balance_token,
            },
        );
    }

    /// Mint the protocol's 1/6 share of the growth in sqrt(k) to `fee_to`.
    /// Returns whether fee accrual is on.
    pub(crate) fn mint_fee(&mut self, ledger: &mut dyn ExternalLedger, reserve_base: u64, reserve_token: U256) -> Result<bool> {
        let Some(fee_to) = self.fee_to else {
            self.k_last = U256::zero();
            return Ok(false);
        };
        if self.k_last.is_zero() {
            return Ok(true);
        }

        let root_k = sqrt_product(U256::from(reserve_base), reserve_token)?;
        let root_k_last = self.k_last.integer_sqrt();
        let liquidity = Fees::protocol_fee_liquidity(self.liquidity.total_supply, root_k, root_k_last)?;
        if !liquidity.is_zero() {
            self.liquidity.mint(&fee_to, liquidity)?;
            emit(
                ledger,
                ProtocolFeeMinted {
                    pool: self.address,
                    fee_to,
                    liquidity,
                    root_k,
                    root_k_last,
                },
            );
        }
        Ok(true)
    }

    pub(crate) fn record_k_last(&mut self) -> Result<()> {
        self.k_last = U256::from(self.reserve_base).checked_mul_err(self.reserve_token)?;
        Ok(())
    }

    pub fn approve(&mut self, ledger: &mut dyn ExternalLedger, owner: &Pubkey, spender: &Pubkey, amount: U256) {
        self.liquidity.approve(owner, spender, amount);
        emit(
            ledger,
            LiquidityApproved {
                pool: self.address,
                owner: *owner,
                spender: *spender,
                amount,
            },
        );
    }

    pub fn transfer(&mut self, ledger: &mut dyn ExternalLedger, from: &Pubkey, to: &Pubkey, amount: U256) -> Result<()> {
        self.liquidity.transfer(from, to, amount)?;
        emit(
            ledger,
            LiquidityTransferred {
                pool: self.address,
                from: *from,
                to: *to,
                amount,
            },
        );
        Ok(())
    }

    /// Move `from`'s receipts on the strength of `spender`'s allowance.
    pub fn transfer_from(
        &mut self,
        ledger: &mut dyn ExternalLedger,
        spender: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: U256,
    ) -> Result<()> {
        self.liquidity.transfer_from(spender, from, to, amount)?;
        emit(
            ledger,
            LiquidityTransferred {
                pool: self.address,
                from: *from,
                to: *to,
                amount,
            },
        );
        Ok(())
    }
}

impl Persist for Pool {
    fn save(&self, namespace: &str, store: &mut dyn StateStore) -> Result<()> {
        require!(!self.locked, ErrorCode::Locked);
        storage::clear(store, namespace);
        let key = |field: &str| storage::field_key(namespace, field);
        storage::put(store, &key("Address"), &self.address)?;
        storage::put(store, &key("Token"), &self.token)?;
        storage::put(store, &key("Governance"), &self.governance)?;
        storage::put(store, &key("ReserveBase"), &self.reserve_base)?;
        storage::put(store, &key("ReserveToken"), &self.reserve_token)?;
        storage::put(store, &key("KLast"), &self.k_last)?;
        storage::put(store, &key("FeeTo"), &self.fee_to)?;
        storage::put(store, &key("Permissioned"), &self.permissioned)?;
        storage::put(store, &key("TotalSupply"), &self.liquidity.total_supply)?;
        for (owner, balance) in &self.liquidity.balances {
            storage::put(store, &key(&format!("Balance:{}", owner)), balance)?;
        }
        for ((owner, spender), allowance) in &self.liquidity.allowances {
            storage::put(store, &key(&format!("Allowance:{}:{}", owner, spender)), allowance)?;
        }
        Ok(())
    }

    fn load(namespace: &str, store: &dyn StateStore) -> Result<Self> {
        let mut pool = Pool::new(
            storage::require_field(store, namespace, "Address")?,
            storage::require_field(store, namespace, "Token")?,
            storage::require_field(store, namespace, "Governance")?,
        );
        pool.reserve_base = storage::require_field(store, namespace, "ReserveBase")?;
        pool.reserve_token = storage::require_field(store, namespace, "ReserveToken")?;
        pool.k_last = storage::require_field(store, namespace, "KLast")?;
        pool.fee_to = storage::require_field(store, namespace, "FeeTo")?;
        pool.permissioned = storage::require_field(store, namespace, "Permissioned")?;
        pool.liquidity.total_supply = storage::require_field(store, namespace, "TotalSupply")?;
        for (parts, balance) in storage::scan::<U256>(store, namespace, "Balance")? {
            let [owner] = storage::key_parts::<1>(&parts)?;
            pool.liquidity.balances.insert(storage::parse_address(owner)?, balance);
        }
        for (parts, allowance) in storage::scan::<U256>(store, namespace, "Allowance")? {
            let [owner, spender] = storage::key_parts::<2>(&parts)?;
            pool.liquidity.allowances.insert(
                (storage::parse_address(owner)?, storage::parse_address(spender)?),
                allowance,
            );
        }
        Ok(pool)
    }
}
