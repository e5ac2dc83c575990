#![allow(dead_code)]

use amm_pool::{curve::ConstantProductCurve, Asset, ExternalLedger, InMemoryLedger, Pool, U256};
use amm_staking::StakingPool;
use anchor_lang::prelude::*;

pub fn u(value: u64) -> U256 {
    U256::from(value)
}

pub fn assert_error_name<T: std::fmt::Debug>(result: Result<T>, name: &str) {
    match result {
        Err(anchor_lang::error::Error::AnchorError(e)) => assert_eq!(e.error_name, name),
        other => panic!("expected {}, got {:?}", name, other),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Engines {
    pub pool: Pool,
    pub staking: StakingPool,
}

/// A 1e9/1e9 pool whose protocol fee goes to a staking distributor, with
/// two receipt holders who approved the distributor.
pub struct Fixture {
    pub ledger: InMemoryLedger,
    pub engines: Engines,
    pub governance: Pubkey,
    pub provider: Pubkey,
    pub trader: Pubkey,
    pub alice: Pubkey,
    pub bob: Pubkey,
}

impl Fixture {
    pub fn new() -> Self {
        let governance = Pubkey::new_unique();
        let mut pool = Pool::new(Pubkey::new_unique(), Pubkey::new_unique(), governance);
        let staking = StakingPool::new(Pubkey::new_unique(), pool.address());
        let mut ledger = InMemoryLedger::new();
        pool.set_fee_to(&mut ledger, &governance, Some(staking.address)).unwrap();

        let mut f = Self {
            ledger,
            engines: Engines { pool, staking },
            governance,
            provider: Pubkey::new_unique(),
            trader: Pubkey::new_unique(),
            alice: Pubkey::new_unique(),
            bob: Pubkey::new_unique(),
        };
        for who in [f.provider, f.trader, f.alice, f.bob] {
            f.fund(&who, 10_000_000_000, u(10_000_000_000));
        }
        let provider = f.provider;
        f.add_liquidity(&provider, 1_000_000_000, u(1_000_000_000)).unwrap();
        for who in [f.alice, f.bob] {
            f.add_liquidity(&who, 100_000_000, u(100_000_000)).unwrap();
            let distributor = f.engines.staking.address;
            f.engines.pool.approve(&mut f.ledger, &who, &distributor, U256::MAX);
        }
        f
    }

    pub fn fund(&mut self, who: &Pubkey, base: u64, token: U256) {
        self.ledger.credit(Asset::Native, who, u(base)).unwrap();
        let asset = self.engines.pool.token_asset();
        self.ledger.credit(asset, who, token).unwrap();
    }

    /// Run `f` against both engines with all-or-nothing semantics.
    pub fn run<T>(&mut self, f: impl FnOnce(&mut InMemoryLedger, &mut Engines) -> Result<T>) -> Result<T> {
        self.ledger.atomically(&mut self.engines, f)
    }

    pub fn add_liquidity(&mut self, who: &Pubkey, base: u64, token: U256) -> Result<U256> {
        let who = *who;
        self.run(|ledger, e| {
            let pool = &mut e.pool;
            ledger.transfer_from(Asset::Native, &who, &pool.address(), u(base))?;
            ledger.transfer_from(pool.token_asset(), &who, &pool.address(), token)?;
            pool.mint(ledger, &who, &who)
        })
    }

    /// Round-trip trades that leave fees in the pool.
    pub fn trade(&mut self, rounds: usize, size: u64) {
        let trader = self.trader;
        for _ in 0..rounds {
            self.run(|ledger, e| {
                let pool = &mut e.pool;
                let (reserve_base, reserve_token) = pool.reserves();
                let out = ConstantProductCurve::get_amount_out(u(size), u(reserve_base), reserve_token)?;
                ledger.transfer_from(Asset::Native, &trader, &pool.address(), u(size))?;
                pool.swap(ledger, &trader, 0, out, &trader, &[])?;

                let (reserve_base, reserve_token) = pool.reserves();
                let back = ConstantProductCurve::get_amount_out(out, reserve_token, u(reserve_base))?;
                ledger.transfer_from(pool.token_asset(), &trader, &pool.address(), out)?;
                pool.swap(ledger, &trader, back.low_u64(), U256::zero(), &trader, &[])
            })
            .unwrap();
        }
    }

    /// Trade, then let a small deposit realize the protocol fee.
    pub fn grow(&mut self) {
        self.trade(10, 10_000_000);
        let provider = self.provider;
        self.add_liquidity(&provider, 1_000_000, u(1_000_000)).unwrap();
    }

    pub fn stake(&mut self, who: &Pubkey, amount: U256) -> Result<U256> {
        let who = *who;
        self.run(|ledger, e| e.staking.stake(ledger, &mut e.pool, &who, amount))
    }

    pub fn rewards(&self) -> U256 {
        self.engines.staking.staking_rewards_balance(&self.engines.pool)
    }

    pub fn pending(&self, who: &Pubkey) -> U256 {
        self.engines
            .staking
            .pending_reward(&self.engines.pool, who)
            .unwrap()
    }

    pub fn receipts(&self, who: &Pubkey) -> U256 {
        self.engines.pool.balance_of(who)
    }
}
