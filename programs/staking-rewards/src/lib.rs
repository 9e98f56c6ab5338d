use anchor_lang::prelude::*;

declare_id!("87cGNCbdJQVM1CQYtDfSRdC18sndzC7qxHTQbqRnXFpR");

/// Key allowed to run `initialize` once the program is deployed.
pub mod admin {
    use anchor_lang::prelude::declare_id;
    declare_id!("HxwZk1uabT7XVFwkWkwnBVRxz7fVKut2Jj8pwBb8RZKG");
}

pub const AUTH_SEED: &str = "vault_authority";
pub const STAKING_VAULT_SEED: &str = "staking_vault";
pub const REWARD_VAULT_SEED: &str = "reward_vault";

/// Default funding period: 180 days.
pub const DEFAULT_REWARDS_DURATION: u64 = 180 * 24 * 60 * 60;

pub mod accounting;
pub mod error;
pub mod instructions;
pub mod states;
pub mod utils;

use instructions::*;

#[cfg(not(feature = "no-entrypoint"))]
solana_security_txt::security_txt! {
    name: "staking-rewards",
    project_url: "https://github.com/staking-rewards/staking-rewards",
    contacts: "email:security@staking-rewards.dev",
    policy: "https://github.com/staking-rewards/staking-rewards/blob/main/SECURITY.md"
}

#[program]
pub mod staking_rewards {

    use super::*;

    pub fn initialize(
        ctx: Context<Initialize>,
        owner: Pubkey,
        rewards_distribution: Pubkey,
        rewards_duration: u64,
        minimum_stake_time: u64,
    ) -> Result<()> {
        instructions::initialize(
            ctx,
            owner,
            rewards_distribution,
            rewards_duration,
            minimum_stake_time,
        )
    }

    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        instructions::stake(ctx, amount)
    }

    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        instructions::withdraw(ctx, amount)
    }

    pub fn get_reward(ctx: Context<GetReward>) -> Result<()> {
        instructions::get_reward(ctx)
    }

    pub fn exit(ctx: Context<Exit>) -> Result<()> {
        instructions::exit(ctx)
    }

    pub fn notify_reward_amount(ctx: Context<NotifyRewardAmount>, reward: u64) -> Result<()> {
        instructions::notify_reward_amount(ctx, reward)
    }

    pub fn update_period_finish(ctx: Context<UpdatePoolParams>, timestamp: u64) -> Result<()> {
        instructions::update_period_finish(ctx, timestamp)
    }

    pub fn set_rewards_duration(ctx: Context<UpdatePoolParams>, duration: u64) -> Result<()> {
        instructions::set_rewards_duration(ctx, duration)
    }

    pub fn set_minimum_stake_time(ctx: Context<UpdatePoolParams>, value: u64) -> Result<()> {
        instructions::set_minimum_stake_time(ctx, value)
    }

    pub fn set_paused(ctx: Context<UpdateConfig>, paused: bool) -> Result<()> {
        instructions::set_paused(ctx, paused)
    }

    pub fn set_rewards_distribution(
        ctx: Context<UpdateConfig>,
        rewards_distribution: Pubkey,
    ) -> Result<()> {
        instructions::set_rewards_distribution(ctx, rewards_distribution)
    }

    pub fn nominate_owner(ctx: Context<UpdateConfig>, candidate: Pubkey) -> Result<()> {
        instructions::nominate_owner(ctx, candidate)
    }

    pub fn accept_ownership(ctx: Context<UpdateConfig>) -> Result<()> {
        instructions::accept_ownership(ctx)
    }

    pub fn recover_tokens(ctx: Context<RecoverTokens>, amount: u64) -> Result<()> {
        instructions::recover_tokens(ctx, amount)
    }
}
