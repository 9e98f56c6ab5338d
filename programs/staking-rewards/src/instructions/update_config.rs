use crate::accounting::{Gatekeeper, Role};
use crate::error::ErrorCode;
use crate::states::{
    GlobalConfig, OwnerChanged, OwnerNominated, PauseChanged, RewardsDistributionUpdated,
    GLOBAL_CONFIG_SEED,
};
use anchor_lang::prelude::*;

/// Accounts context for the capability switches stored in `global_config`:
/// pause, funding authority and the two-step ownership handover.
///
/// # Accounts
/// - `signer`: the owner, or the nominated owner for `accept_ownership`.
/// - `global_config`: configuration being updated.
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    pub signer: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,
}

fn require_owner(global_config: &GlobalConfig, signer: &Pubkey) -> Result<()> {
    require!(
        global_config.is_authorized(signer, Role::Owner),
        ErrorCode::Unauthorized
    );
    Ok(())
}

/// Toggles the pause gate. Only new stakes are refused while paused.
pub fn set_paused(ctx: Context<UpdateConfig>, paused: bool) -> Result<()> {
    let global_config = &mut ctx.accounts.global_config;
    require_owner(global_config, &ctx.accounts.signer.key())?;

    if !global_config.set_paused(paused) {
        return Ok(());
    }

    msg!("paused: {}", paused);
    emit!(PauseChanged { paused });
    Ok(())
}

/// Replaces the key allowed to call `notify_reward_amount`.
pub fn set_rewards_distribution(
    ctx: Context<UpdateConfig>,
    rewards_distribution: Pubkey,
) -> Result<()> {
    let global_config = &mut ctx.accounts.global_config;
    require_owner(global_config, &ctx.accounts.signer.key())?;

    global_config.rewards_distribution = rewards_distribution;

    emit!(RewardsDistributionUpdated {
        rewards_distribution
    });
    Ok(())
}

/// First half of an ownership transfer. Nominating `Pubkey::default()` cancels.
pub fn nominate_owner(ctx: Context<UpdateConfig>, candidate: Pubkey) -> Result<()> {
    let global_config = &mut ctx.accounts.global_config;
    require_owner(global_config, &ctx.accounts.signer.key())?;

    global_config.nominated_owner = candidate;

    emit!(OwnerNominated { candidate });
    Ok(())
}

/// Second half: the nominee signs to take over.
pub fn accept_ownership(ctx: Context<UpdateConfig>) -> Result<()> {
    let global_config = &mut ctx.accounts.global_config;
    let signer = ctx.accounts.signer.key();
    let old_owner = global_config.accept_ownership(signer)?;

    msg!("ownership moved from {} to {}", old_owner, signer);
    emit!(OwnerChanged {
        old_owner,
        new_owner: signer,
    });
    Ok(())
}
