pub mod math;
pub use math::*;

pub mod u256;
pub use u256::*;
