#![allow(dead_code)]

use amm_pool::{
    curve::AssetAmounts, error::ErrorCode, Asset, ExternalLedger, InMemoryLedger, Pool, U256,
};
use anchor_lang::prelude::*;

pub fn u(value: u64) -> U256 {
    U256::from(value)
}

/// Assert that `result` failed with exactly `code`.
pub fn assert_error<T: std::fmt::Debug>(result: Result<T>, code: ErrorCode) {
    let name = format!("{:?}", code);
    let number = u32::from(code);
    match result {
        Err(anchor_lang::error::Error::AnchorError(e)) => {
            assert_eq!(e.error_name, name);
            assert_eq!(e.error_code_number, number);
        }
        other => panic!("expected {}, got {:?}", name, other),
    }
}

/// One pool over an in-memory host with a few funded accounts.
pub struct Fixture {
    pub ledger: InMemoryLedger,
    pub pool: Pool,
    pub governance: Pubkey,
    pub alice: Pubkey,
    pub bob: Pubkey,
    pub carol: Pubkey,
}

impl Fixture {
    pub fn new() -> Self {
        let governance = Pubkey::new_unique();
        let pool = Pool::new(Pubkey::new_unique(), Pubkey::new_unique(), governance);
        Self {
            ledger: InMemoryLedger::new(),
            pool,
            governance,
            alice: Pubkey::new_unique(),
            bob: Pubkey::new_unique(),
            carol: Pubkey::new_unique(),
        }
    }

    pub fn token(&self) -> Asset {
        self.pool.token_asset()
    }

    pub fn fund(&mut self, who: &Pubkey, base: u64, token: U256) {
        self.ledger.credit(Asset::Native, who, u(base)).unwrap();
        let asset = self.token();
        self.ledger.credit(asset, who, token).unwrap();
    }

    pub fn base_balance(&self, who: &Pubkey) -> U256 {
        self.ledger.balance(Asset::Native, who)
    }

    pub fn token_balance(&self, who: &Pubkey) -> U256 {
        self.ledger.balance(self.token(), who)
    }

    /// Deposit both assets into the pool and mint in one atomic call.
    pub fn add_liquidity(&mut self, who: &Pubkey, base: u64, token: U256) -> Result<U256> {
        let who = *who;
        self.ledger.atomically(&mut self.pool, |ledger, pool| {
            ledger.transfer_from(Asset::Native, &who, &pool.address(), u(base))?;
            ledger.transfer_from(pool.token_asset(), &who, &pool.address(), token)?;
            pool.mint(ledger, &who, &who)
        })
    }

    /// Return `liquidity` receipts to the pool and burn them in one atomic call.
    pub fn remove_liquidity(&mut self, who: &Pubkey, liquidity: U256) -> Result<AssetAmounts> {
        let who = *who;
        self.ledger.atomically(&mut self.pool, |ledger, pool| {
            let address = pool.address();
            pool.transfer(ledger, &who, &address, liquidity)?;
            pool.burn(ledger, &who, &who)
        })
    }

    /// Pay `base_in` into the pool and ask for `token_out`.
    pub fn swap_base_for_token(&mut self, who: &Pubkey, base_in: u64, token_out: U256) -> Result<()> {
        let who = *who;
        self.ledger.atomically(&mut self.pool, |ledger, pool| {
            ledger.transfer_from(Asset::Native, &who, &pool.address(), u(base_in))?;
            pool.swap(ledger, &who, 0, token_out, &who, &[])
        })
    }

    pub fn swap_token_for_base(&mut self, who: &Pubkey, token_in: U256, base_out: u64) -> Result<()> {
        let who = *who;
        self.ledger.atomically(&mut self.pool, |ledger, pool| {
            ledger.transfer_from(pool.token_asset(), &who, &pool.address(), token_in)?;
            pool.swap(ledger, &who, base_out, U256::zero(), &who, &[])
        })
    }

    /// Seed the pool with `(base, token)` from a fresh provider.
    pub fn seeded(base: u64, token: U256) -> Self {
        let mut fixture = Self::new();
        let provider = Pubkey::new_unique();
        fixture.fund(&provider, base, token);
        fixture.add_liquidity(&provider, base, token).unwrap();
        fixture
    }

    pub fn pool_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        self.pool.serialize(&mut bytes).unwrap();
        bytes
    }
}
