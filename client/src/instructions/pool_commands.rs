use amm_pool::{
    curve::{CurveCalculator, SwapQuote, TradeDirection},
    Asset, ExternalLedger, MarketAction, U256,
};
use anyhow::{bail, Result};
use clap::ValueEnum;
use serde_json::{json, Value};

use super::{config::address_of, state::Simulation};

/// Asset a trader sells into the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Side {
    Base,
    Token,
}

impl Side {
    pub fn direction(self) -> TradeDirection {
        match self {
            Side::Base => TradeDirection::BaseForToken,
            Side::Token => TradeDirection::TokenForBase,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Action {
    ProvideLiquidity,
    RemoveLiquidity,
    Trade,
}

impl From<Action> for MarketAction {
    fn from(action: Action) -> Self {
        match action {
            Action::ProvideLiquidity => MarketAction::ProvideLiquidity,
            Action::RemoveLiquidity => MarketAction::RemoveLiquidity,
            Action::Trade => MarketAction::Trade,
        }
    }
}

fn quote_json(quote: &SwapQuote) -> Value {
    json!({
        "amount_in": quote.amount_in.to_string(),
        "amount_base_out": quote.amount_base_out.to_string(),
        "amount_token_out": quote.amount_token_out.to_string(),
    })
}

pub fn faucet(sim: &mut Simulation, account: &str, asset: Asset, amount: U256) -> Result<(Value, Vec<Vec<u8>>)> {
    let holder = address_of(account);
    let (balance, events) = sim.execute(|ledger, _| {
        ledger.credit(asset, &holder, amount)?;
        Ok(ledger.balance(asset, &holder))
    })?;
    Ok((json!({ "asset": asset.to_string(), "balance": balance.to_string() }), events))
}

/// Deposit both assets and mint receipts to `to`.
pub fn add_liquidity(
    sim: &mut Simulation,
    account: &str,
    base: u64,
    token: U256,
    to: Option<&str>,
) -> Result<(Value, Vec<Vec<u8>>)> {
    let caller = address_of(account);
    let to = address_of(to.unwrap_or(account));
    let (liquidity, events) = sim.execute(|ledger, engines| {
        let pool = &mut engines.pool;
        let address = pool.address();
        ledger.transfer_from(Asset::Native, &caller, &address, U256::from(base))?;
        ledger.transfer_from(pool.token_asset(), &caller, &address, token)?;
        pool.mint(ledger, &caller, &to)
    })?;
    Ok((json!({ "liquidity": liquidity.to_string() }), events))
}

/// Return receipts to the pool and burn them for the underlying assets.
pub fn remove_liquidity(
    sim: &mut Simulation,
    account: &str,
    liquidity: U256,
    to: Option<&str>,
) -> Result<(Value, Vec<Vec<u8>>)> {
    let caller = address_of(account);
    let to = address_of(to.unwrap_or(account));
    let (amounts, events) = sim.execute(|ledger, engines| {
        let pool = &mut engines.pool;
        let address = pool.address();
        pool.transfer(ledger, &caller, &address, liquidity)?;
        pool.burn(ledger, &caller, &to)
    })?;
    Ok((
        json!({ "amount_base": amounts.base.to_string(), "amount_token": amounts.token.to_string() }),
        events,
    ))
}

/// Exact-input trade: pay `amount_in`, receive the quoted output if it
/// clears `min_out`.
pub fn swap(
    sim: &mut Simulation,
    account: &str,
    sell: Side,
    amount_in: U256,
    min_out: U256,
    to: Option<&str>,
) -> Result<(Value, Vec<Vec<u8>>)> {
    let caller = address_of(account);
    let to = address_of(to.unwrap_or(account));
    let (reserve_base, reserve_token) = sim.engines.pool.reserves();
    let quote = CurveCalculator::swap_exact_input(amount_in, sell.direction(), reserve_base, reserve_token)
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let amount_out = U256::from(quote.amount_base_out).max(quote.amount_token_out);
    if amount_out < min_out {
        bail!("output {} is below the minimum {}", amount_out, min_out);
    }

    let ((), events) = sim.execute(|ledger, engines| {
        let pool = &mut engines.pool;
        let asset_in = match sell {
            Side::Base => Asset::Native,
            Side::Token => pool.token_asset(),
        };
        let address = pool.address();
        ledger.transfer_from(asset_in, &caller, &address, amount_in)?;
        pool.swap(ledger, &caller, quote.amount_base_out, quote.amount_token_out, &to, &[])
    })?;
    Ok((quote_json(&quote), events))
}

/// Price a trade against the current reserves without executing it.
pub fn quote(sim: &Simulation, sell: Side, amount_in: Option<U256>, amount_out: Option<U256>) -> Result<Value> {
    let (reserve_base, reserve_token) = sim.engines.pool.reserves();
    let quote = match (amount_in, amount_out) {
        (Some(amount_in), None) => {
            CurveCalculator::swap_exact_input(amount_in, sell.direction(), reserve_base, reserve_token)
        }
        (None, Some(amount_out)) => {
            CurveCalculator::swap_exact_output(amount_out, sell.direction(), reserve_base, reserve_token)
        }
        _ => bail!("pass exactly one of --amount-in and --amount-out"),
    }
    .map_err(|e| anyhow::anyhow!("{}", e))?;
    Ok(quote_json(&quote))
}

pub fn sync(sim: &mut Simulation) -> Result<(Value, Vec<Vec<u8>>)> {
    let (reserves, events) = sim.execute(|ledger, engines| {
        engines.pool.sync(ledger)?;
        Ok(engines.pool.reserves())
    })?;
    Ok((
        json!({ "reserve_base": reserves.0.to_string(), "reserve_token": reserves.1.to_string() }),
        events,
    ))
}

pub fn skim(sim: &mut Simulation, to: &str) -> Result<(Value, Vec<Vec<u8>>)> {
    let to = address_of(to);
    let ((), events) = sim.execute(|ledger, engines| engines.pool.skim(ledger, &to))?;
    Ok((json!({}), events))
}

/// `recipient` of `None` turns the protocol fee off.
pub fn set_fee_to(sim: &mut Simulation, caller: &str, recipient: Option<&str>) -> Result<(Value, Vec<Vec<u8>>)> {
    let caller = address_of(caller);
    let fee_to = recipient.map(address_of);
    let ((), events) = sim.execute(|ledger, engines| engines.pool.set_fee_to(ledger, &caller, fee_to))?;
    Ok((json!({ "fee_to": fee_to.map(|a| a.to_string()) }), events))
}

pub fn set_permissioned(sim: &mut Simulation, caller: &str, enabled: bool) -> Result<(Value, Vec<Vec<u8>>)> {
    let caller = address_of(caller);
    let ((), events) = sim.execute(|ledger, engines| engines.pool.set_permissioned(ledger, &caller, enabled))?;
    Ok((json!({ "permissioned": enabled }), events))
}

/// Market decision for `account`: denied accounts fail the gated action
/// while permissioning is on.
pub fn set_market_access(
    sim: &mut Simulation,
    account: &str,
    action: Action,
    allowed: bool,
) -> Result<(Value, Vec<Vec<u8>>)> {
    let holder = address_of(account);
    let ((), events) = sim.execute(|ledger, _| {
        if allowed {
            ledger.allow(action.into(), &holder);
        } else {
            ledger.deny(action.into(), holder);
        }
        Ok(())
    })?;
    Ok((json!({ "account": holder.to_string(), "allowed": allowed }), events))
}
