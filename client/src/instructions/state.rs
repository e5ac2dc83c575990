use amm_mining::MiningPool;
use amm_pool::{
    storage::{MemoryStore, Persist},
    InMemoryLedger, Pool,
};
use amm_staking::StakingPool;
use anyhow::{anyhow, Context, Result};
use std::{collections::BTreeMap, fs, path::PathBuf};

use super::config::{address_of, ClientConfig, MINING_NAME, POOL_NAME, STAKING_NAME};

const LEDGER_NAMESPACE: &str = "Ledger";
const POOL_NAMESPACE: &str = "Pool";
const STAKING_NAMESPACE: &str = "Staking";
const MINING_NAMESPACE: &str = "Mining";

/// Engine state rolled back together when a command fails.
#[derive(Clone, Debug, PartialEq)]
pub struct Engines {
    pub pool: Pool,
    pub staking: StakingPool,
    pub mining: MiningPool,
}

pub struct Simulation {
    pub ledger: InMemoryLedger,
    pub engines: Engines,
    state_path: PathBuf,
}

impl Simulation {
    /// Load the saved state, or deploy fresh engines when there is none.
    pub fn open(config: &ClientConfig) -> Result<Self> {
        if !config.state_path.exists() {
            return Self::genesis(config);
        }
        let bytes = fs::read(&config.state_path)
            .with_context(|| format!("failed to read {}", config.state_path.display()))?;
        let entries: BTreeMap<String, Vec<u8>> = bincode::deserialize(&bytes)
            .with_context(|| format!("{} is not a state file", config.state_path.display()))?;
        let store = MemoryStore::from(entries);

        let load_err = |e: anchor_lang::error::Error| anyhow!("corrupted state: {}", e);
        Ok(Self {
            ledger: InMemoryLedger::load(LEDGER_NAMESPACE, &store).map_err(load_err)?,
            engines: Engines {
                pool: Pool::load(POOL_NAMESPACE, &store).map_err(load_err)?,
                staking: StakingPool::load(STAKING_NAMESPACE, &store).map_err(load_err)?,
                mining: MiningPool::load(MINING_NAMESPACE, &store).map_err(load_err)?,
            },
            state_path: config.state_path.clone(),
        })
    }

    /// The staking distributor starts as the pool's fee recipient.
    fn genesis(config: &ClientConfig) -> Result<Self> {
        let pool = Pool::new(address_of(POOL_NAME), config.token, config.governance);
        let staking = StakingPool::new(address_of(STAKING_NAME), pool.address());
        let mining = MiningPool::new(
            address_of(MINING_NAME),
            config.governance,
            config.mining_staking_token,
            config.mining_reward_token,
            config.mining_duration,
        )
        .map_err(|e| anyhow!("invalid mining configuration: {}", e))?;

        let mut simulation = Self {
            ledger: InMemoryLedger::new(),
            engines: Engines { pool, staking, mining },
            state_path: config.state_path.clone(),
        };
        let governance = config.governance;
        let permissioned = config.permissioned;
        simulation.execute(|ledger, engines| {
            let fee_to = engines.staking.address;
            engines.pool.set_fee_to(ledger, &governance, Some(fee_to))?;
            engines.pool.set_permissioned(ledger, &governance, permissioned)
        })?;
        Ok(simulation)
    }

    /// Run one command all-or-nothing and hand back the notifications it produced.
    pub fn execute<T, F>(&mut self, f: F) -> Result<(T, Vec<Vec<u8>>)>
    where
        F: FnOnce(&mut InMemoryLedger, &mut Engines) -> anchor_lang::Result<T>,
    {
        self.ledger.take_events();
        let value = self
            .ledger
            .atomically(&mut self.engines, f)
            .map_err(|e| anyhow!("{}", e))?;
        Ok((value, self.ledger.take_events()))
    }

    pub fn save(&self) -> Result<()> {
        let mut store = MemoryStore::default();
        let save_err = |e: anchor_lang::error::Error| anyhow!("failed to save state: {}", e);
        self.ledger.save(LEDGER_NAMESPACE, &mut store).map_err(save_err)?;
        self.engines.pool.save(POOL_NAMESPACE, &mut store).map_err(save_err)?;
        self.engines.staking.save(STAKING_NAMESPACE, &mut store).map_err(save_err)?;
        self.engines.mining.save(MINING_NAMESPACE, &mut store).map_err(save_err)?;

        let bytes = bincode::serialize(&store.into_entries())?;
        fs::write(&self.state_path, bytes)
            .with_context(|| format!("failed to write {}", self.state_path.display()))
    }
}

#[cfg(test)]
pub(crate) fn test_config(name: &str) -> ClientConfig {
    ClientConfig {
        state_path: std::env::temp_dir().join(format!("amm-client-{}-{}.bin", name, std::process::id())),
        governance: address_of("governance"),
        token: address_of("usdc"),
        mining_staking_token: amm_pool::Asset::Native,
        mining_reward_token: amm_pool::Asset::Token(address_of("gov")),
        mining_duration: 100,
        permissioned: false,
    }
}
