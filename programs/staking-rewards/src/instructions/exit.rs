use crate::accounting::StakingEngine;
use crate::states::{GlobalConfig, RewardPool, UserStakeInfo, GLOBAL_CONFIG_SEED, USER_STAKE_INFO_SEED};
use crate::utils::{current_timestamp, ProgramLog, TokenLeg, VaultCustody};
use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};
use std::ops::DerefMut;

/// Withdraw the whole balance and claim every reward in one instruction.
#[derive(Accounts)]
pub struct Exit<'info> {
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

    #[account(address = global_config.staking_mint)]
    pub staking_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = staking_mint,
        token::authority = user,
        token::token_program = token_program,
    )]
    pub user_staking_token: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, address = global_config.staking_vault)]
    pub staking_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(address = global_config.reward_mint)]
    pub reward_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut, address = global_config.reward_vault)]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,

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

pub fn exit(ctx: Context<Exit>) -> Result<()> {
    let now = current_timestamp()?;

    let mut custody = VaultCustody::new(ctx.accounts.token_program.to_account_info())
        .with_authority(
            ctx.accounts.authority.to_account_info(),
            ctx.bumps.authority,
        )
        .with_staking(TokenLeg {
            vault: ctx.accounts.staking_vault.to_account_info(),
            counterparty: ctx.accounts.user_staking_token.to_account_info(),
            mint: ctx.accounts.staking_mint.to_account_info(),
            decimals: ctx.accounts.staking_mint.decimals,
        })
        .with_reward(
            TokenLeg {
                vault: ctx.accounts.reward_vault.to_account_info(),
                counterparty: ctx.accounts.user_reward_token.to_account_info(),
                mint: ctx.accounts.reward_mint.to_account_info(),
                decimals: ctx.accounts.reward_mint.decimals,
            },
            ctx.accounts.reward_vault.amount,
        );

    let mut log = ProgramLog;
    let mut engine = StakingEngine::new(
        ctx.accounts.reward_pool.deref_mut(),
        &*ctx.accounts.global_config,
        &mut custody,
        &mut log,
        now,
    );
    let (withdrawn, reward) = engine.exit(ctx.accounts.user_stake_info.deref_mut())?;

    msg!("exit: withdrew {}, paid reward {}", withdrawn, reward);
    Ok(())
}
