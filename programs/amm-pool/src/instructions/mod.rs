//! Pool entry points, one `impl Pool` block per operation.

pub mod burn;
pub mod governance;
pub mod mint;
pub mod skim;
pub mod swap;
pub mod sync;
