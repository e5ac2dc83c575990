use amm_pool::{ExternalLedger, U256};
use amm_staking::instructions::CollectedReward;
use anyhow::Result;
use serde_json::{json, Value};

use super::{config::address_of, state::Simulation};

fn collected_json(reward: &CollectedReward) -> Value {
    json!({
        "liquidity": reward.liquidity.to_string(),
        "burned_base": reward.burned.map(|a| a.base.to_string()),
        "burned_token": reward.burned.map(|a| a.token.to_string()),
    })
}

/// Approve the distributor for `amount` receipts, then stake them.
pub fn stake(sim: &mut Simulation, account: &str, amount: U256) -> Result<(Value, Vec<Vec<u8>>)> {
    let caller = address_of(account);
    let (weight, events) = sim.execute(|ledger, engines| {
        let spender = engines.staking.address;
        engines.pool.approve(ledger, &caller, &spender, amount);
        engines.staking.stake(ledger, &mut engines.pool, &caller, amount)
    })?;
    Ok((json!({ "weight": weight.to_string() }), events))
}

pub fn collect(sim: &mut Simulation, account: &str, to: Option<&str>, burn: bool) -> Result<(Value, Vec<Vec<u8>>)> {
    let caller = address_of(account);
    let to = address_of(to.unwrap_or(account));
    let (reward, events) = sim.execute(|ledger, engines| {
        engines.staking.collect(ledger, &mut engines.pool, &caller, &to, burn)
    })?;
    Ok((collected_json(&reward), events))
}

pub fn unstake(sim: &mut Simulation, account: &str, to: Option<&str>, burn: bool) -> Result<(Value, Vec<Vec<u8>>)> {
    let caller = address_of(account);
    let to = address_of(to.unwrap_or(account));
    let (reward, events) = sim.execute(|ledger, engines| {
        engines.staking.unstake(ledger, &mut engines.pool, &caller, &to, burn)
    })?;
    Ok((collected_json(&reward), events))
}

/// Governance moves `amount` of the reward token into the mining pool and
/// opens an epoch for it.
pub fn notify_reward(sim: &mut Simulation, caller: &str, amount: U256) -> Result<(Value, Vec<Vec<u8>>)> {
    let caller = address_of(caller);
    let ((), events) = sim.execute(|ledger, engines| {
        let mining = &mut engines.mining;
        let address = mining.address;
        ledger.transfer_from(mining.reward_token, &caller, &address, amount)?;
        mining.notify_reward_amount(ledger, &caller, amount)
    })?;
    let mining = &sim.engines.mining;
    Ok((
        json!({
            "reward_rate": mining.reward_rate.to_string(),
            "end_block": mining.mining_period_end_block,
        }),
        events,
    ))
}

pub fn mine(sim: &mut Simulation, account: &str, amount: U256) -> Result<(Value, Vec<Vec<u8>>)> {
    let caller = address_of(account);
    let ((), events) = sim.execute(|ledger, engines| engines.mining.mine(ledger, &caller, amount))?;
    let balance = sim.engines.mining.balance_of(&caller);
    Ok((json!({ "balance": balance.to_string() }), events))
}

pub fn mine_collect(sim: &mut Simulation, account: &str) -> Result<(Value, Vec<Vec<u8>>)> {
    let caller = address_of(account);
    let (reward, events) = sim.execute(|ledger, engines| engines.mining.collect(ledger, &caller))?;
    Ok((json!({ "reward": reward.to_string() }), events))
}

pub fn withdraw(sim: &mut Simulation, account: &str, amount: U256) -> Result<(Value, Vec<Vec<u8>>)> {
    let caller = address_of(account);
    let ((), events) = sim.execute(|ledger, engines| engines.mining.withdraw(ledger, &caller, amount))?;
    let balance = sim.engines.mining.balance_of(&caller);
    Ok((json!({ "balance": balance.to_string() }), events))
}

pub fn exit(sim: &mut Simulation, account: &str) -> Result<(Value, Vec<Vec<u8>>)> {
    let caller = address_of(account);
    let (reward, events) = sim.execute(|ledger, engines| engines.mining.exit(ledger, &caller))?;
    Ok((json!({ "reward": reward.to_string() }), events))
}

pub fn advance(sim: &mut Simulation, blocks: u64) -> Result<(Value, Vec<Vec<u8>>)> {
    let (height, events) = sim.execute(|ledger, _| ledger.advance_blocks(blocks))?;
    Ok((json!({ "block_height": height }), events))
}

/// Snapshot of the three engines plus the named accounts.
pub fn show(sim: &Simulation, accounts: &[String]) -> Result<Value> {
    let err = |e: anchor_lang::error::Error| anyhow::anyhow!("{}", e);
    let ledger = &sim.ledger;
    let block = ledger.block_height();
    let pool = &sim.engines.pool;
    let staking = &sim.engines.staking;
    let mining = &sim.engines.mining;
    let (reserve_base, reserve_token) = pool.reserves();

    let mut holders = Vec::with_capacity(accounts.len());
    for name in accounts {
        let holder = address_of(name);
        holders.push(json!({
            "name": name,
            "address": holder.to_string(),
            "native": ledger.balance(amm_pool::Asset::Native, &holder).to_string(),
            "token": ledger.balance(pool.token_asset(), &holder).to_string(),
            "liquidity": pool.balance_of(&holder).to_string(),
            "staked": staking.staker(&holder).staked_balance.to_string(),
            "pending_staking_reward": staking.pending_reward(pool, &holder).map_err(err)?.to_string(),
            "mining_balance": mining.balance_of(&holder).to_string(),
            "mining_earned": mining.earned(&holder, block).map_err(err)?.to_string(),
            "reward_token": ledger.balance(mining.reward_token, &holder).to_string(),
        }));
    }

    Ok(json!({
        "block_height": block,
        "pool": {
            "address": pool.address().to_string(),
            "reserve_base": reserve_base.to_string(),
            "reserve_token": reserve_token.to_string(),
            "total_supply": pool.total_supply().to_string(),
            "k_last": pool.k_last().to_string(),
            "fee_to": pool.fee_to().map(|a| a.to_string()),
            "permissioned": pool.permissioned(),
        },
        "staking": {
            "address": staking.address.to_string(),
            "total_staked": staking.total_staked.to_string(),
            "total_weight": staking.total_weight.to_string(),
            "rewards_balance": staking.staking_rewards_balance(pool).to_string(),
            "rewards_credited": staking.rewards_credited.to_string(),
            "uncredited_rewards": staking.uncredited_rewards(pool).to_string(),
        },
        "mining": {
            "address": mining.address.to_string(),
            "total_supply": mining.total_supply.to_string(),
            "reward_rate": mining.reward_rate.to_string(),
            "period_end_block": mining.mining_period_end_block,
            "reward_per_token": mining.reward_per_token(block).map_err(err)?.to_string(),
            "reward_for_duration": mining.reward_for_duration().map_err(err)?.to_string(),
            "reward_balance": mining.reward_balance(ledger).map_err(err)?.to_string(),
        },
        "accounts": holders,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::{
        config::parse_asset,
        pool_commands::{add_liquidity, faucet},
        state::test_config,
    };
    use amm_pool::Asset;

    fn seeded(name: &str) -> Simulation {
        let mut sim = Simulation::open(&test_config(name)).unwrap();
        faucet(&mut sim, "alice", Asset::Native, U256::from(1_000_000_000u64)).unwrap();
        faucet(&mut sim, "alice", parse_asset("usdc"), U256::from(1_000_000_000u64)).unwrap();
        add_liquidity(&mut sim, "alice", 100_000_000, U256::from(100_000_000u64), None).unwrap();
        sim
    }

    #[test]
    fn stake_then_unstake_returns_the_receipts() {
        let mut sim = seeded("stake");
        let alice = address_of("alice");

        let (result, _) = stake(&mut sim, "alice", U256::from(50_000_000u64)).unwrap();
        assert_eq!(result["weight"], "50000000");
        assert_eq!(sim.engines.pool.balance_of(&alice), U256::from(49_999_000u64));

        let (collected, _) = collect(&mut sim, "alice", None, false).unwrap();
        assert_eq!(collected["liquidity"], "0");

        unstake(&mut sim, "alice", None, false).unwrap();
        assert_eq!(sim.engines.pool.balance_of(&alice), U256::from(99_999_000u64));
        assert!(sim.engines.staking.total_staked.is_zero());
    }

    #[test]
    fn mining_epoch_pays_out_on_exit() {
        let mut sim = seeded("mining");
        faucet(&mut sim, "governance", parse_asset("gov"), U256::from(10_000_000_000u64)).unwrap();

        let (epoch, _) = notify_reward(&mut sim, "governance", U256::from(10_000_000_000u64)).unwrap();
        assert_eq!(epoch["reward_rate"], "100000000");
        assert_eq!(epoch["end_block"], 100);

        mine(&mut sim, "alice", U256::from(1_000u64)).unwrap();
        advance(&mut sim, 50).unwrap();
        let (paid, _) = exit(&mut sim, "alice").unwrap();
        assert_eq!(paid["reward"], "5000000000");
        assert_eq!(
            sim.ledger.balance(parse_asset("gov"), &address_of("alice")),
            U256::from(5_000_000_000u64)
        );
    }

    #[test]
    fn show_lists_named_accounts() {
        let sim = seeded("show");
        let snapshot = show(&sim, &["alice".to_string()]).unwrap();
        assert_eq!(snapshot["pool"]["total_supply"], "100000000");
        assert_eq!(snapshot["accounts"][0]["liquidity"], "99999000");
        assert_eq!(snapshot["accounts"][0]["native"], "900000000");
        assert_eq!(snapshot["pool"]["fee_to"], address_of("staking").to_string());
        assert_eq!(snapshot["staking"]["uncredited_rewards"], "0");
    }
}
