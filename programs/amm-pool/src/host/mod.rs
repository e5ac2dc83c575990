//! Boundary between the engines and the environment they run in: asset
//! transfers, balances, the flash-swap callback hop, the block clock, market
//! authorization and the notification sink.

use anchor_lang::{prelude::*, Event};
use std::fmt::{self, Debug};

use crate::{states::Pool, utils::U256};

pub mod memory;
pub use memory::*;

/// An asset reachable through the host.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Asset {
    /// The chain's native base asset, balances bounded by `u64`.
    Native,
    /// A fungible token contract.
    Token(Pubkey),
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asset::Native => write!(f, "native"),
            Asset::Token(address) => write!(f, "{}", address),
        }
    }
}

/// Pool operations a market may gate when permissioning is on.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum MarketAction {
    ProvideLiquidity,
    RemoveLiquidity,
    Trade,
}

/// Arguments of the flash-swap hop, delivered to `target` after the outputs
/// were sent.
#[derive(Clone, Copy, Debug)]
pub struct SwapCallback<'a> {
    pub target: Pubkey,
    pub sender: Pubkey,
    pub amount_base_out: u64,
    pub amount_token_out: U256,
    pub data: &'a [u8],
}

pub trait ExternalLedger {
    /// Pull `amount` owned by `from` into the contract `to`.
    fn transfer_from(&mut self, asset: Asset, from: &Pubkey, to: &Pubkey, amount: U256) -> Result<()>;

    /// Pay `amount` held by the contract `from` out to `to`.
    fn transfer_to(&mut self, asset: Asset, from: &Pubkey, to: &Pubkey, amount: U256) -> Result<()>;

    fn get_balance(&self, asset: Asset, holder: &Pubkey) -> Result<U256>;

    /// Run the recipient's flash-swap hook. The pool is handed over still
    /// locked, so any reentry observes `Locked`.
    fn invoke_callback(&mut self, pool: &mut Pool, call: SwapCallback<'_>) -> Result<()>;

    fn block_height(&self) -> u64;

    /// Market authorization; everything is allowed unless a market says otherwise.
    fn is_authorized(&self, _action: MarketAction, _caller: &Pubkey) -> bool {
        true
    }

    fn emit_event(&mut self, data: Vec<u8>);
}

/// Encode `event` with its discriminator and hand it to the host.
pub fn emit<E: Event + Debug>(ledger: &mut dyn ExternalLedger, event: E) {
    #[cfg(feature = "enable-log")]
    msg!("{:?}", event);
    ledger.emit_event(event.data());
}
