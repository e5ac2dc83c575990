#![allow(dead_code)]

use amm_mining::MiningPool;
use amm_pool::{Asset, InMemoryLedger, U256};
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

pub struct Fixture {
    pub ledger: InMemoryLedger,
    pub mining: MiningPool,
    pub governance: Pubkey,
    pub alice: Pubkey,
    pub bob: Pubkey,
}

impl Fixture {
    /// 100-block epochs, distinct staking and reward tokens.
    pub fn new() -> Self {
        Self::with_tokens(Asset::Token(Pubkey::new_unique()), Asset::Token(Pubkey::new_unique()))
    }

    pub fn with_tokens(staking_token: Asset, reward_token: Asset) -> Self {
        let governance = Pubkey::new_unique();
        let mining = MiningPool::new(Pubkey::new_unique(), governance, staking_token, reward_token, 100).unwrap();
        let mut f = Self {
            ledger: InMemoryLedger::new(),
            mining,
            governance,
            alice: Pubkey::new_unique(),
            bob: Pubkey::new_unique(),
        };
        for who in [f.alice, f.bob] {
            f.ledger
                .credit(staking_token, &who, u(1_000_000_000_000))
                .unwrap();
        }
        f
    }

    pub fn block(&self) -> u64 {
        amm_pool::ExternalLedger::block_height(&self.ledger)
    }

    pub fn advance_to(&mut self, block: u64) {
        self.ledger.set_block_height(block);
    }

    /// Move `reward` into the pool and announce it, atomically.
    pub fn fund_and_notify(&mut self, reward: U256) -> Result<()> {
        let governance = self.governance;
        self.ledger.atomically(&mut self.mining, |ledger, mining| {
            let (asset, address) = (mining.reward_token, mining.address);
            ledger.credit(asset, &address, reward)?;
            mining.notify_reward_amount(ledger, &governance, reward)
        })
    }

    pub fn mine(&mut self, who: &Pubkey, amount: U256) -> Result<()> {
        let who = *who;
        self.ledger
            .atomically(&mut self.mining, |ledger, mining| mining.mine(ledger, &who, amount))
    }

    pub fn withdraw(&mut self, who: &Pubkey, amount: U256) -> Result<()> {
        let who = *who;
        self.ledger
            .atomically(&mut self.mining, |ledger, mining| mining.withdraw(ledger, &who, amount))
    }

    pub fn collect(&mut self, who: &Pubkey) -> Result<U256> {
        let who = *who;
        self.ledger
            .atomically(&mut self.mining, |ledger, mining| mining.collect(ledger, &who))
    }

    pub fn exit(&mut self, who: &Pubkey) -> Result<U256> {
        let who = *who;
        self.ledger
            .atomically(&mut self.mining, |ledger, mining| mining.exit(ledger, &who))
    }

    pub fn earned(&self, who: &Pubkey) -> U256 {
        self.mining.earned(who, self.block()).unwrap()
    }

    pub fn reward_balance(&self, who: &Pubkey) -> U256 {
        self.ledger.balance(self.mining.reward_token, who)
    }

    pub fn staking_balance(&self, who: &Pubkey) -> U256 {
        self.ledger.balance(self.mining.staking_token, who)
    }
}
