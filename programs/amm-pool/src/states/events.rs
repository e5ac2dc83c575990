use anchor_lang::prelude::*;

use crate::utils::U256;

//
// ──────────────────────────────────────────────────────────────────────────────
// Events: handed to the host on every state change, the pool's audit trail
// ──────────────────────────────────────────────────────────────────────────────
//

/// Emitted whenever recorded reserves are rewritten from held balances.
#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct ReservesSynced {
    pub pool: Pubkey,
    pub reserve_base: u64,
    pub reserve_token: U256,
}

/// Emitted after receipts are issued against a deposit.
#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidityMinted {
    pub pool: Pubkey,
    /// Caller that triggered the mint (usually a router).
    pub sender: Pubkey,
    /// Receiver of the new receipts.
    pub to: Pubkey,
    pub amount_base: u64,
    pub amount_token: U256,
    pub liquidity: U256,
}

/// Emitted after receipts are redeemed for the underlying assets.
#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidityBurned {
    pub pool: Pubkey,
    pub sender: Pubkey,
    /// Receiver of the withdrawn assets.
    pub to: Pubkey,
    pub amount_base: u64,
    pub amount_token: U256,
    pub liquidity: U256,
}

/// Swap summary with every in/out amount as observed after the callback.
#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct Swapped {
    pub pool: Pubkey,
    pub sender: Pubkey,
    pub to: Pubkey,
    pub amount_base_in: u64,
    pub amount_token_in: U256,
    pub amount_base_out: u64,
    pub amount_token_out: U256,
}

/// Emitted when protocol fee receipts are minted on growth of sqrt(k).
#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolFeeMinted {
    pub pool: Pubkey,
    pub fee_to: Pubkey,
    pub liquidity: U256,
    pub root_k: U256,
    pub root_k_last: U256,
}

/// Emitted when balances above the reserves are swept out.
#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct Skimmed {
    pub pool: Pubkey,
    pub to: Pubkey,
    pub amount_base: u64,
    pub amount_token: U256,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidityTransferred {
    pub pool: Pubkey,
    pub from: Pubkey,
    pub to: Pubkey,
    pub amount: U256,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidityApproved {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub spender: Pubkey,
    pub amount: U256,
}

/// Emitted when governance changes who receives the protocol fee.
#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct FeeToUpdated {
    pub pool: Pubkey,
    pub fee_to: Option<Pubkey>,
}

/// Emitted when governance toggles market permissioning.
#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct PermissioningUpdated {
    pub pool: Pubkey,
    pub permissioned: bool,
}
