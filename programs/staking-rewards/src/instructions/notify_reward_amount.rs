use crate::accounting::StakingEngine;
use crate::states::{GlobalConfig, RewardPool, GLOBAL_CONFIG_SEED};
use crate::utils::{current_timestamp, ProgramLog, VaultCustody};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{TokenAccount, TokenInterface};
use std::ops::DerefMut;

/// Start a new reward period, or extend the running one.
///
/// The funding authority transfers the reward tokens into `reward_vault`
/// beforehand (typically in the same transaction). The resulting rate is
/// capped by the vault balance: `rate * duration <= reward_vault.amount`.
#[derive(Accounts)]
pub struct NotifyRewardAmount<'info> {
    /// Must equal `global_config.rewards_distribution`.
    pub rewards_distribution: Signer<'info>,

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

    #[account(address = global_config.reward_vault)]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Steps:
/// 1) Read the reward vault balance for the solvency check.
/// 2) Run the engine: authority gate, global checkpoint, new rate, `RewardAdded`.
pub fn notify_reward_amount(ctx: Context<NotifyRewardAmount>, reward: u64) -> Result<()> {
    let now = current_timestamp()?;
    let caller = ctx.accounts.rewards_distribution.key();

    // --- 1) Custody (balance only; nothing moves) ---
    let mut custody = VaultCustody::new(ctx.accounts.token_program.to_account_info())
        .with_reward_balance(ctx.accounts.reward_vault.amount);

    // --- 2) Engine ---
    let mut log = ProgramLog;
    let mut engine = StakingEngine::new(
        ctx.accounts.reward_pool.deref_mut(),
        &*ctx.accounts.global_config,
        &mut custody,
        &mut log,
        now,
    );
    engine.notify_reward_amount(&caller, reward)?;

    Ok(())
}
