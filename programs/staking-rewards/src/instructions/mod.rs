pub mod initialize;
pub use initialize::*;

pub mod stake;
pub use stake::*;

pub mod withdraw;
pub use withdraw::*;

pub mod get_reward;
pub use get_reward::*;

pub mod exit;
pub use exit::*;

pub mod notify_reward_amount;
pub use notify_reward_amount::*;

pub mod update_pool_params;
pub use update_pool_params::*;

pub mod update_config;
pub use update_config::*;

pub mod recover_tokens;
pub use recover_tokens::*;
