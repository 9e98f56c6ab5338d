use crate::accounting::StakingEngine;
use crate::states::{GlobalConfig, RewardPool, GLOBAL_CONFIG_SEED};
use crate::utils::{current_timestamp, NoCustody, ProgramLog};
use anchor_lang::prelude::*;
use std::ops::DerefMut;

/// Accounts context for the owner's reward-period parameters:
/// `update_period_finish`, `set_rewards_duration` and `set_minimum_stake_time`.
///
/// # Accounts
/// - `owner`: must be `global_config.owner`; checked by the engine (`Unauthorized`).
/// - `global_config`: capability gates.
/// - `reward_pool`: period state being changed.
#[derive(Accounts)]
pub struct UpdatePoolParams<'info> {
    pub owner: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    #[account(
        mut,
        address = global_config.reward_pool,
    )]
    pub reward_pool: Account<'info, RewardPool>,
}

macro_rules! pool_engine {
    ($ctx:expr, $custody:ident, $log:ident) => {
        StakingEngine::new(
            $ctx.accounts.reward_pool.deref_mut(),
            &*$ctx.accounts.global_config,
            &mut $custody,
            &mut $log,
            current_timestamp()?,
        )
    };
}

/// Moves the end of the running period; the rate is unchanged.
///
/// # Errors
/// - `Unauthorized`: caller is not the owner.
/// - `InvalidPeriodFinish`: `timestamp <= last_update_time` after the checkpoint.
pub fn update_period_finish(ctx: Context<UpdatePoolParams>, timestamp: u64) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    let mut custody = NoCustody;
    let mut log = ProgramLog;
    pool_engine!(ctx, custody, log).update_period_finish(&caller, timestamp)?;

    msg!("period_finish set to {}", timestamp);
    Ok(())
}

/// # Errors
/// - `Unauthorized`: caller is not the owner.
/// - `InvalidAmount`: `duration == 0`.
/// - `PeriodInProgress`: the current period has not ended yet.
pub fn set_rewards_duration(ctx: Context<UpdatePoolParams>, duration: u64) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    let mut custody = NoCustody;
    let mut log = ProgramLog;
    pool_engine!(ctx, custody, log).set_rewards_duration(&caller, duration)?;

    msg!("rewards_duration set to {}", duration);
    Ok(())
}

/// `0` disables the lock.
pub fn set_minimum_stake_time(ctx: Context<UpdatePoolParams>, value: u64) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    let mut custody = NoCustody;
    let mut log = ProgramLog;
    pool_engine!(ctx, custody, log).set_minimum_stake_time(&caller, value)?;

    msg!("minimum_stake_time set to {}", value);
    Ok(())
}
