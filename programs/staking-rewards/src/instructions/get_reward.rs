use crate::accounting::StakingEngine;
use crate::states::{GlobalConfig, RewardPool, UserStakeInfo, GLOBAL_CONFIG_SEED, USER_STAKE_INFO_SEED};
use crate::utils::{current_timestamp, ProgramLog, TokenLeg, VaultCustody};
use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};
use std::ops::DerefMut;

/// Claim every reward accrued so far.
///
/// Reward math overview:
/// - Global index: `reward_pool.reward_per_unit_stored`, scaled by `SCALE`.
/// - Per-user checkpoint: `user_stake_info.reward_per_unit_paid`.
/// - Claimable = `owed_reward + balance * (index - checkpoint) / SCALE`.
///
/// The owed amount is zeroed before the transfer out; a claim of zero moves
/// nothing and emits nothing.
#[derive(Accounts)]
pub struct GetReward<'info> {
    /// Claimer (payer for ATA creation if needed).
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

    #[account(
        mut,
        seeds = [
            USER_STAKE_INFO_SEED.as_bytes(),
            user.key().as_ref()
        ],
        bump = user_stake_info.bump,
    )]
    pub user_stake_info: Account<'info, UserStakeInfo>,

    /// Program authority PDA (token authority of the vaults).
    ///
    /// CHECK: PDA derivation enforced by seeds; used only as a signer.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(address = global_config.reward_mint)]
    pub reward_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut, address = global_config.reward_vault)]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// User's reward ATA; created on demand to receive rewards.
    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = reward_mint,
        associated_token::authority = user,
        associated_token::token_program = token_program,
    )]
    pub user_reward_token: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub system_program: Program<'info, System>,
}

/// Steps:
/// 1) Wire custody: reward vault → user reward ATA, signed by the vault authority.
/// 2) Run the engine: lock check, checkpoint, zero owed, transfer, `RewardPaid`.
pub fn get_reward(ctx: Context<GetReward>) -> Result<()> {
    let now = current_timestamp()?;

    // --- 1) Custody ---
    let mut custody = VaultCustody::new(ctx.accounts.token_program.to_account_info())
        .with_authority(
            ctx.accounts.authority.to_account_info(),
            ctx.bumps.authority,
        )
        .with_reward(
            TokenLeg {
                vault: ctx.accounts.reward_vault.to_account_info(),
                counterparty: ctx.accounts.user_reward_token.to_account_info(),
                mint: ctx.accounts.reward_mint.to_account_info(),
                decimals: ctx.accounts.reward_mint.decimals,
            },
            ctx.accounts.reward_vault.amount,
        );

    // --- 2) Engine ---
    let mut log = ProgramLog;
    let mut engine = StakingEngine::new(
        ctx.accounts.reward_pool.deref_mut(),
        &*ctx.accounts.global_config,
        &mut custody,
        &mut log,
        now,
    );
    let reward = engine.get_reward(ctx.accounts.user_stake_info.deref_mut())?;

    msg!(
        "paid reward {}, lifetime {}",
        reward,
        ctx.accounts.user_stake_info.total_reward_paid
    );
    Ok(())
}
