pub mod events;
pub use events::*;

pub mod global_config;
pub use global_config::*;

pub mod reward_pool;
pub use reward_pool::*;

pub mod user_stake_info;
pub use user_stake_info::*;
