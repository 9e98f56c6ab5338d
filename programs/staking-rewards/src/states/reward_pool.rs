use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// RewardPool Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive the reward pool account.
pub const REWARD_POOL_SEED: &str = "reward_pool";

/// Global reward state for the pool.
///
/// This account tracks:
/// - The running reward-per-staked-unit integral and when it was last advanced.
/// - The current emission rate and the end of the funding period.
/// - The total amount staked across every `UserStakeInfo`.
/// - The lock applied to fresh stakes and the re-entrancy flag.
///
/// It is mutated only by the checkpoint protocol and by the gated operations of
/// `accounting::StakingEngine`.
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct RewardPool {
    /// PDA bump for this account.
    pub bump: u8,

    /// Cumulative reward per staked unit, scaled by `SCALE`. Never decreases.
    pub reward_per_unit_stored: u128,

    /// Timestamp of the last checkpoint; always `<= min(now, period_finish)`.
    pub last_update_time: u64,

    /// Reward emitted per second across all stakers, scaled by `SCALE`.
    pub reward_rate: u128,

    /// End of the current funding period; `0` before the first funding.
    pub period_finish: u64,

    /// Length of a funding period in seconds.
    pub rewards_duration: u64,

    /// Sum of every staker's balance.
    pub total_staked: u64,

    /// Seconds a fresh stake must wait before withdraw or claim; `0` disables.
    pub minimum_stake_time: u64,

    /// Held for the duration of every mutating operation.
    pub locked: bool,
}

impl RewardPool {
    /// Fixed serialized size of the account (for allocation at initialization).
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 1: bump
    /// - 16 * 2: two `u128` fields
    /// - 8 * 5: five `u64` fields
    /// - 1: locked flag
    pub const LEN: usize = 8 + 1 + 16 * 2 + 8 * 5 + 1;
}
