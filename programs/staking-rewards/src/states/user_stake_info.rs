use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// UserStakeInfo Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive each user's stake info account.
pub const USER_STAKE_INFO_SEED: &str = "user_stake_info";

/// Ledger entry for a single staker.
///
/// Each staker has one `UserStakeInfo` account, derived from:
/// `USER_STAKE_INFO_SEED + user_pubkey`. It is created on first stake and is
/// never closed; a full withdrawal only clears `stake_timestamp`.
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct UserStakeInfo {
    /// PDA bump for this account.
    pub bump: u8,

    /// Owner (user) to whom this record belongs.
    pub owner: Pubkey,

    /// Amount currently staked.
    pub balance: u64,

    /// Time of the first deposit since the balance last hit zero; `0` when unlocked.
    pub stake_timestamp: u64,

    /// Snapshot of `reward_per_unit_stored` at this account's last checkpoint.
    pub reward_per_unit_paid: u128,

    /// Reward accrued up to the last checkpoint but not yet paid out.
    pub owed_reward: u64,

    /// Total reward transferred to this user over the account's lifetime.
    pub total_reward_paid: u64,
}

impl UserStakeInfo {
    /// Fixed serialized size of the account (for allocation at initialization).
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 1: bump
    /// - 32: owner pubkey
    /// - 8 * 4: four `u64` fields
    /// - 16: one `u128` field
    pub const LEN: usize = 8 + 1 + 32 + 8 * 4 + 16;

    /// Binds a freshly created record to its owner. Existing records are untouched.
    pub fn bind(&mut self, owner: Pubkey, bump: u8) {
        if self.owner == Pubkey::default() {
            self.owner = owner;
            self.bump = bump;
        }
    }
}
