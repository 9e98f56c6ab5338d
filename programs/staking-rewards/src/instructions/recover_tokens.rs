use crate::accounting::StakingEngine;
use crate::states::{GlobalConfig, RewardPool, GLOBAL_CONFIG_SEED};
use crate::utils::{current_timestamp, ProgramLog, TokenLeg, VaultCustody};
use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};
use std::ops::DerefMut;

/// Sweep tokens the program holds but does not account for (airdrops, stray
/// transfers, reward stranded by idle intervals) to the owner.
///
/// Any token account controlled by the vault authority can be drained except
/// those of the staking mint, so staked principal is never reachable.
#[derive(Accounts)]
pub struct RecoverTokens<'info> {
    /// Must equal `global_config.owner`; pays for the destination ATA if needed.
    #[account(mut)]
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

    /// Program authority PDA (token authority of the source account).
    ///
    /// CHECK: PDA derivation enforced by seeds; used only as a signer.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    pub token_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Program-controlled account the tokens are taken from.
    #[account(
        mut,
        token::mint = token_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub source: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = token_mint,
        associated_token::authority = owner,
        associated_token::token_program = token_program,
    )]
    pub owner_token: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub system_program: Program<'info, System>,
}

/// # Errors
/// - `Unauthorized`: caller is not the owner.
/// - `ForbiddenAsset`: `token_mint` is the staking mint.
pub fn recover_tokens(ctx: Context<RecoverTokens>, amount: u64) -> Result<()> {
    let now = current_timestamp()?;
    let caller = ctx.accounts.owner.key();
    let token = ctx.accounts.token_mint.key();
    let staking_mint = ctx.accounts.global_config.staking_mint;

    let mut custody = VaultCustody::new(ctx.accounts.token_program.to_account_info())
        .with_authority(
            ctx.accounts.authority.to_account_info(),
            ctx.bumps.authority,
        )
        .with_foreign(TokenLeg {
            vault: ctx.accounts.source.to_account_info(),
            counterparty: ctx.accounts.owner_token.to_account_info(),
            mint: ctx.accounts.token_mint.to_account_info(),
            decimals: ctx.accounts.token_mint.decimals,
        });

    let mut log = ProgramLog;
    let mut engine = StakingEngine::new(
        ctx.accounts.reward_pool.deref_mut(),
        &*ctx.accounts.global_config,
        &mut custody,
        &mut log,
        now,
    );
    engine.recover(&caller, token, &staking_mint, amount)?;

    msg!("recovered {} of {}", amount, token);
    Ok(())
}
