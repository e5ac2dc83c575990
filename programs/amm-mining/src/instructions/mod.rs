pub mod notify_reward_amount;
pub use notify_reward_amount::*;

pub mod mine;
pub use mine::*;

pub mod withdraw;
pub use withdraw::*;

pub mod collect;
pub use collect::*;

pub mod exit;
pub use exit::*;
