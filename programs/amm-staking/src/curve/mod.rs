pub mod fee_share;
pub mod weight;
pub use fee_share::*;
pub use weight::*;
