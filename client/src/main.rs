use amm_pool::U256;
use anyhow::Result;
use clap::Parser;

mod instructions;
use instructions::config::{load_cfg, parse_amount, parse_asset};
use instructions::events::report;
use instructions::pool_commands::{self, Action, Side};
use instructions::reward_commands;
use instructions::state::Simulation;

#[derive(Debug, Parser)]
pub struct Opts {
    /// Client configuration file.
    #[arg(long, default_value = "client_config.ini")]
    pub config: String,
    /// Print results and notifications as JSON.
    #[arg(long)]
    pub json: bool,
    #[clap(subcommand)]
    pub command: AmmCommands,
}

#[derive(Debug, Parser)]
pub enum AmmCommands {
    /// Credit an account with native or token balance.
    Faucet {
        #[arg(long)]
        account: String,
        /// `native` or a token name.
        #[arg(long)]
        asset: String,
        #[arg(long, value_parser = parse_amount)]
        amount: U256,
    },
    AddLiquidity {
        #[arg(long)]
        account: String,
        #[arg(long)]
        base: u64,
        #[arg(long, value_parser = parse_amount)]
        token: U256,
        #[arg(long)]
        to: Option<String>,
    },
    RemoveLiquidity {
        #[arg(long)]
        account: String,
        #[arg(long, value_parser = parse_amount)]
        liquidity: U256,
        #[arg(long)]
        to: Option<String>,
    },
    Swap {
        #[arg(long)]
        account: String,
        #[arg(long, value_enum)]
        sell: Side,
        #[arg(long, value_parser = parse_amount)]
        amount_in: U256,
        #[arg(long, value_parser = parse_amount, default_value = "0")]
        min_out: U256,
        #[arg(long)]
        to: Option<String>,
    },
    Quote {
        #[arg(long, value_enum)]
        sell: Side,
        #[arg(long, value_parser = parse_amount)]
        amount_in: Option<U256>,
        #[arg(long, value_parser = parse_amount)]
        amount_out: Option<U256>,
    },
    Sync {},
    Skim {
        #[arg(long)]
        to: String,
    },
    /// Without `--recipient` the protocol fee is switched off.
    SetFeeTo {
        #[arg(long)]
        caller: String,
        #[arg(long)]
        recipient: Option<String>,
    },
    SetPermissioned {
        #[arg(long)]
        caller: String,
        #[arg(long)]
        enabled: bool,
    },
    Deny {
        #[arg(long)]
        account: String,
        #[arg(long, value_enum)]
        action: Action,
    },
    Allow {
        #[arg(long)]
        account: String,
        #[arg(long, value_enum)]
        action: Action,
    },
    Stake {
        #[arg(long)]
        account: String,
        #[arg(long, value_parser = parse_amount)]
        amount: U256,
    },
    Collect {
        #[arg(long)]
        account: String,
        #[arg(long)]
        to: Option<String>,
        /// Burn the collected receipts for the underlying assets.
        #[arg(long)]
        burn: bool,
    },
    Unstake {
        #[arg(long)]
        account: String,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        burn: bool,
    },
    NotifyReward {
        #[arg(long)]
        caller: String,
        #[arg(long, value_parser = parse_amount)]
        amount: U256,
    },
    Mine {
        #[arg(long)]
        account: String,
        #[arg(long, value_parser = parse_amount)]
        amount: U256,
    },
    MineCollect {
        #[arg(long)]
        account: String,
    },
    Withdraw {
        #[arg(long)]
        account: String,
        #[arg(long, value_parser = parse_amount)]
        amount: U256,
    },
    Exit {
        #[arg(long)]
        account: String,
    },
    /// Move the block clock forward.
    Advance {
        #[arg(long)]
        blocks: u64,
    },
    Show {
        #[arg(long)]
        account: Vec<String>,
    },
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    let config = load_cfg(&opts.config)?;
    let mut sim = Simulation::open(&config)?;

    let (result, events) = match opts.command {
        AmmCommands::Faucet {
            account,
            asset,
            amount,
        } => pool_commands::faucet(&mut sim, &account, parse_asset(&asset), amount)?,
        AmmCommands::AddLiquidity {
            account,
            base,
            token,
            to,
        } => pool_commands::add_liquidity(&mut sim, &account, base, token, to.as_deref())?,
        AmmCommands::RemoveLiquidity {
            account,
            liquidity,
            to,
        } => pool_commands::remove_liquidity(&mut sim, &account, liquidity, to.as_deref())?,
        AmmCommands::Swap {
            account,
            sell,
            amount_in,
            min_out,
            to,
        } => pool_commands::swap(&mut sim, &account, sell, amount_in, min_out, to.as_deref())?,
        AmmCommands::Quote {
            sell,
            amount_in,
            amount_out,
        } => (pool_commands::quote(&sim, sell, amount_in, amount_out)?, Vec::new()),
        AmmCommands::Sync {} => pool_commands::sync(&mut sim)?,
        AmmCommands::Skim { to } => pool_commands::skim(&mut sim, &to)?,
        AmmCommands::SetFeeTo { caller, recipient } => {
            pool_commands::set_fee_to(&mut sim, &caller, recipient.as_deref())?
        }
        AmmCommands::SetPermissioned { caller, enabled } => {
            pool_commands::set_permissioned(&mut sim, &caller, enabled)?
        }
        AmmCommands::Deny { account, action } => {
            pool_commands::set_market_access(&mut sim, &account, action, false)?
        }
        AmmCommands::Allow { account, action } => {
            pool_commands::set_market_access(&mut sim, &account, action, true)?
        }
        AmmCommands::Stake { account, amount } => reward_commands::stake(&mut sim, &account, amount)?,
        AmmCommands::Collect { account, to, burn } => {
            reward_commands::collect(&mut sim, &account, to.as_deref(), burn)?
        }
        AmmCommands::Unstake { account, to, burn } => {
            reward_commands::unstake(&mut sim, &account, to.as_deref(), burn)?
        }
        AmmCommands::NotifyReward { caller, amount } => {
            reward_commands::notify_reward(&mut sim, &caller, amount)?
        }
        AmmCommands::Mine { account, amount } => reward_commands::mine(&mut sim, &account, amount)?,
        AmmCommands::MineCollect { account } => reward_commands::mine_collect(&mut sim, &account)?,
        AmmCommands::Withdraw { account, amount } => {
            reward_commands::withdraw(&mut sim, &account, amount)?
        }
        AmmCommands::Exit { account } => reward_commands::exit(&mut sim, &account)?,
        AmmCommands::Advance { blocks } => reward_commands::advance(&mut sim, blocks)?,
        AmmCommands::Show { account } => (reward_commands::show(&sim, &account)?, Vec::new()),
    };

    sim.save()?;
    report(result, &events, opts.json)
}
