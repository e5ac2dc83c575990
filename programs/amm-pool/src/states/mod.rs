pub mod events;
pub use events::*;

pub mod liquidity_ledger;
pub use liquidity_ledger::*;

pub mod pool;
pub use pool::*;
