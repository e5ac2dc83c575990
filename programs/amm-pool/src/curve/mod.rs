pub mod calculator;
pub mod constant_product;
pub mod fees;

pub use calculator::*;
pub use constant_product::*;
pub use fees::*;
