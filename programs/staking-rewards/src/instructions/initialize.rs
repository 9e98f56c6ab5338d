use crate::error::ErrorCode;
use crate::utils::ensure_supported_mint;
use crate::{states::*, REWARD_VAULT_SEED, STAKING_VAULT_SEED};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use std::ops::DerefMut;

/// Accounts context for `initialize`.
///
/// This handler:
/// - Creates the global configuration (owner, funding authority, mints, vaults).
/// - Creates the reward pool with an idle period (`period_finish == 0`).
/// - Creates the staking and reward vaults, both owned by the vault authority PDA.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Admin signer (must match the program-level admin id). Pays for every
    /// account created here.
    #[account(
        mut,
        address = crate::admin::id() @ ErrorCode::InvalidOwner
    )]
    pub payer: Signer<'info>,

    /// Program authority PDA; owner of both vaults.
    ///
    /// CHECK: PDA derivation enforced via seeds. Not read as an account; used as Pubkey.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(
        init,
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump,
        payer = payer,
        space = GlobalConfig::LEN
    )]
    pub global_config: Account<'info, GlobalConfig>,

    #[account(
        init,
        seeds = [REWARD_POOL_SEED.as_bytes()],
        bump,
        payer = payer,
        space = RewardPool::LEN
    )]
    pub reward_pool: Account<'info, RewardPool>,

    /// Deposit token mint.
    pub staking_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Reward token mint. May equal the staking mint.
    pub reward_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Program-owned vault holding staked principal.
    #[account(
        init,
        seeds = [STAKING_VAULT_SEED.as_bytes()],
        bump,
        payer = payer,
        token::mint = staking_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub staking_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Program-owned vault holding rewards to be streamed.
    #[account(
        init,
        seeds = [REWARD_VAULT_SEED.as_bytes()],
        bump,
        payer = payer,
        token::mint = reward_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program interface (required for vault creation).
    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

/// Creates the pool.
///
/// Steps:
/// 1. Validate the period length (it divides every funding) and refuse mints
///    that charge a transfer fee.
/// 2. Write `global_config`.
/// 3. Write `reward_pool`: idle, nothing staked, lock set to `minimum_stake_time`.
/// 4. Emit `PoolInitialized`.
pub fn initialize(
    ctx: Context<Initialize>,
    owner: Pubkey,
    rewards_distribution: Pubkey,
    rewards_duration: u64,
    minimum_stake_time: u64,
) -> Result<()> {
    // --- 1) Parameters ---
    require!(rewards_duration > 0, ErrorCode::InvalidAmount);
    require_keys_neq!(owner, Pubkey::default(), ErrorCode::InvalidOwner);
    ensure_supported_mint(&ctx.accounts.staking_mint.to_account_info())?;
    ensure_supported_mint(&ctx.accounts.reward_mint.to_account_info())?;

    // --- 2) Global config ---
    let global_config = ctx.accounts.global_config.deref_mut();
    global_config.bump = ctx.bumps.global_config;
    global_config.owner = owner;
    global_config.nominated_owner = Pubkey::default();
    global_config.rewards_distribution = rewards_distribution;
    global_config.paused = false;
    global_config.staking_mint = ctx.accounts.staking_mint.key();
    global_config.reward_mint = ctx.accounts.reward_mint.key();
    global_config.staking_vault = ctx.accounts.staking_vault.key();
    global_config.reward_vault = ctx.accounts.reward_vault.key();
    global_config.reward_pool = ctx.accounts.reward_pool.key();
    msg!("Global Config initialized");

    // --- 3) Reward pool ---
    let reward_pool = ctx.accounts.reward_pool.deref_mut();
    reward_pool.bump = ctx.bumps.reward_pool;
    reward_pool.rewards_duration = rewards_duration;
    reward_pool.minimum_stake_time = minimum_stake_time;
    msg!(
        "Reward pool initialized: duration {}s, minimum stake time {}s",
        rewards_duration,
        minimum_stake_time
    );

    // --- 4) Event ---
    emit!(PoolInitialized {
        owner,
        rewards_distribution,
        staking_mint: ctx.accounts.staking_mint.key(),
        reward_mint: ctx.accounts.reward_mint.key(),
        rewards_duration,
        minimum_stake_time,
    });

    Ok(())
}
