use crate::accounting::StakingEngine;
use crate::states::{GlobalConfig, RewardPool, UserStakeInfo, GLOBAL_CONFIG_SEED, USER_STAKE_INFO_SEED};
use crate::utils::{current_timestamp, ProgramLog, TokenLeg, VaultCustody};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use std::ops::DerefMut;

/// Deposit staking tokens into the pool.
///
/// The user's ledger entry is created on first use. The pool is checkpointed
/// before the credit, so the new amount earns from `now` onward; the lock clock
/// starts only if the balance was empty.
#[derive(Accounts)]
pub struct Stake<'info> {
    /// Depositor; pays for the ledger entry on first stake.
    #[account(mut)]
    pub user: Signer<'info>,

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

    /// Per-user staking record (derived by USER_STAKE_INFO_SEED + user).
    #[account(
        init_if_needed,
        payer = user,
        space = UserStakeInfo::LEN,
        seeds = [
            USER_STAKE_INFO_SEED.as_bytes(),
            user.key().as_ref()
        ],
        bump,
    )]
    pub user_stake_info: Account<'info, UserStakeInfo>,

    #[account(address = global_config.staking_mint)]
    pub staking_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Source of the deposit.
    #[account(
        mut,
        token::mint = staking_mint,
        token::authority = user,
        token::token_program = token_program,
    )]
    pub user_staking_token: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, address = global_config.staking_vault)]
    pub staking_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

/// Steps:
/// 1) Bind a freshly created ledger entry to the user.
/// 2) Wire custody: user token account → staking vault.
/// 3) Run the engine: pause gate, amount check, checkpoint, credit, transfer, `Staked`.
pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
    let now = current_timestamp()?;

    // --- 1) Ledger entry ---
    let user = ctx.accounts.user.key();
    ctx.accounts
        .user_stake_info
        .bind(user, ctx.bumps.user_stake_info);

    // --- 2) Custody ---
    let mut custody = VaultCustody::new(ctx.accounts.token_program.to_account_info())
        .with_depositor(ctx.accounts.user.to_account_info())
        .with_staking(TokenLeg {
            vault: ctx.accounts.staking_vault.to_account_info(),
            counterparty: ctx.accounts.user_staking_token.to_account_info(),
            mint: ctx.accounts.staking_mint.to_account_info(),
            decimals: ctx.accounts.staking_mint.decimals,
        });

    // --- 3) Engine ---
    let mut log = ProgramLog;
    let mut engine = StakingEngine::new(
        ctx.accounts.reward_pool.deref_mut(),
        &*ctx.accounts.global_config,
        &mut custody,
        &mut log,
        now,
    );
    engine.stake(ctx.accounts.user_stake_info.deref_mut(), amount)?;

    msg!(
        "staked {}, balance {}, total staked {}",
        amount,
        ctx.accounts.user_stake_info.balance,
        ctx.accounts.reward_pool.total_staked
    );
    Ok(())
}
