pub mod config;
pub mod events;
pub mod pool_commands;
pub mod reward_commands;
pub mod state;
