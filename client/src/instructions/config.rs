use amm_pool::{Asset, U256};
use anchor_lang::{prelude::Pubkey, solana_program::hash::hash};
use anyhow::{anyhow, bail, Result};
use configparser::ini::Ini;
use std::path::PathBuf;

/// Account names reserved for the three engines.
pub const POOL_NAME: &str = "pool";
pub const STAKING_NAME: &str = "staking";
pub const MINING_NAME: &str = "mining";

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub state_path: PathBuf,
    pub governance: Pubkey,
    pub token: Pubkey,
    pub mining_staking_token: Asset,
    pub mining_reward_token: Asset,
    pub mining_duration: u64,
    pub permissioned: bool,
}

fn required(config: &Ini, key: &str) -> Result<String> {
    let value = config
        .get("Global", key)
        .ok_or_else(|| anyhow!("{} is missing from [Global]", key))?;
    if value.is_empty() {
        bail!("{} must not be empty", key);
    }
    Ok(value)
}

pub fn load_cfg(client_config: &str) -> Result<ClientConfig> {
    let mut config = Ini::new();
    config
        .load(client_config)
        .map_err(|e| anyhow!("failed to read {}: {}", client_config, e))?;

    let state_path = PathBuf::from(required(&config, "state_path")?);
    let governance = address_of(&required(&config, "governance")?);
    let token = address_of(&required(&config, "token")?);
    let mining_staking_token = parse_asset(&required(&config, "mining_staking_token")?);
    let mining_reward_token = parse_asset(&required(&config, "mining_reward_token")?);
    let mining_duration = config
        .getuint("Global", "mining_duration")
        .map_err(|e| anyhow!("mining_duration: {}", e))?
        .ok_or_else(|| anyhow!("mining_duration is missing from [Global]"))?;
    let permissioned = config
        .getbool("Global", "permissioned")
        .map_err(|e| anyhow!("permissioned: {}", e))?
        .unwrap_or(false);

    Ok(ClientConfig {
        state_path,
        governance,
        token,
        mining_staking_token,
        mining_reward_token,
        mining_duration,
        permissioned,
    })
}

/// Simulated accounts are named; the address is the hash of the name.
pub fn address_of(name: &str) -> Pubkey {
    Pubkey::new_from_array(hash(name.as_bytes()).to_bytes())
}

/// `native` is the base asset, any other name a token.
pub fn parse_asset(name: &str) -> Asset {
    if name.eq_ignore_ascii_case("native") {
        Asset::Native
    } else {
        Asset::Token(address_of(name))
    }
}

pub fn parse_amount(value: &str) -> Result<U256, String> {
    U256::from_dec_str(value).map_err(|e| format!("invalid amount {}: {:?}", value, e))
}
