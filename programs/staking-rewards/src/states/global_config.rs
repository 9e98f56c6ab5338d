use anchor_lang::prelude::*;

use crate::accounting::{Gatekeeper, Role};
use crate::error::ErrorCode;

//
// ──────────────────────────────────────────────────────────────────────────────
// Global Configuration Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive the global configuration account.
pub const GLOBAL_CONFIG_SEED: &str = "global_config";

/// Holds the capability gates (owner, funding authority, pause switch) and the
/// fixed addresses of the pool's mints and vaults.
///
/// The accounting engine never reads this account directly: it only asks the
/// questions exposed by [`Gatekeeper`].
#[account]
#[derive(Default, Debug)]
pub struct GlobalConfig {
    /// PDA bump for this account (for seed derivation).
    pub bump: u8,

    /// Owner of the pool: may pause, tune the period and recover stray tokens.
    pub owner: Pubkey,

    /// Candidate set by `nominate_owner`; becomes `owner` on `accept_ownership`.
    pub nominated_owner: Pubkey,

    /// Funding authority, the only key allowed to call `notify_reward_amount`.
    pub rewards_distribution: Pubkey,

    /// Global switch: if `true`, new stakes are rejected.
    pub paused: bool,

    /// Mint of the deposit token.
    pub staking_mint: Pubkey,

    /// Mint of the reward token.
    pub reward_mint: Pubkey,

    /// Program-owned vault holding staked principal.
    pub staking_vault: Pubkey,

    /// Program-owned vault holding undistributed and unclaimed rewards.
    pub reward_vault: Pubkey,

    /// Account holding the reward accumulator and period state.
    pub reward_pool: Pubkey,
}

impl GlobalConfig {
    /// Fixed serialized size of the account (for allocation at initialization).
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 1: bump
    /// - 32 * 8: eight Pubkeys
    /// - 1: paused flag
    pub const LEN: usize = 8 + 1 + 32 * 8 + 1;

    /// Returns `false` when the flag already had this value.
    pub fn set_paused(&mut self, paused: bool) -> bool {
        if self.paused == paused {
            return false;
        }
        self.paused = paused;
        true
    }

    /// Completes a two-step ownership transfer. Returns the previous owner.
    pub fn accept_ownership(&mut self, signer: Pubkey) -> Result<Pubkey> {
        require!(
            self.is_authorized(&signer, Role::NominatedOwner),
            ErrorCode::NotNominated
        );
        let old_owner = self.owner;
        self.owner = signer;
        self.nominated_owner = Pubkey::default();
        Ok(old_owner)
    }
}

impl Gatekeeper for GlobalConfig {
    fn is_authorized(&self, caller: &Pubkey, role: Role) -> bool {
        match role {
            Role::Owner => *caller == self.owner,
            Role::RewardsDistribution => *caller == self.rewards_distribution,
            Role::NominatedOwner => {
                self.nominated_owner != Pubkey::default() && *caller == self.nominated_owner
            }
        }
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_resolve_against_stored_keys() {
        let owner = Pubkey::new_unique();
        let funder = Pubkey::new_unique();
        let config = GlobalConfig {
            owner,
            rewards_distribution: funder,
            ..Default::default()
        };

        assert!(config.is_authorized(&owner, Role::Owner));
        assert!(!config.is_authorized(&funder, Role::Owner));
        assert!(config.is_authorized(&funder, Role::RewardsDistribution));
        assert!(!config.is_authorized(&owner, Role::RewardsDistribution));
    }

    #[test]
    fn ownership_moves_only_to_nominee() {
        let owner = Pubkey::new_unique();
        let nominee = Pubkey::new_unique();
        let mut config = GlobalConfig {
            owner,
            ..Default::default()
        };

        assert!(config.accept_ownership(nominee).is_err());

        config.nominated_owner = nominee;
        assert!(config.accept_ownership(Pubkey::new_unique()).is_err());
        assert_eq!(config.accept_ownership(nominee).unwrap(), owner);
        assert_eq!(config.owner, nominee);
        assert_eq!(config.nominated_owner, Pubkey::default());
        assert!(!config.is_authorized(&owner, Role::Owner));
    }

    #[test]
    fn pause_reports_changes_only() {
        let mut config = GlobalConfig::default();
        assert!(config.set_paused(true));
        assert!(!config.set_paused(true));
        assert!(config.is_paused());
        assert!(config.set_paused(false));
    }

    #[test]
    fn empty_nomination_authorizes_nobody() {
        let config = GlobalConfig::default();
        assert!(!config.is_authorized(&Pubkey::default(), Role::NominatedOwner));
    }
}
