use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// Events: Emitted for off-chain indexers/clients to track protocol state changes
// ──────────────────────────────────────────────────────────────────────────────
//

/// Emitted once when the pool is created.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PoolInitialized {
    /// Initial owner.
    pub owner: Pubkey,
    /// Initial funding authority.
    pub rewards_distribution: Pubkey,
    /// Deposit token mint.
    pub staking_mint: Pubkey,
    /// Reward token mint.
    pub reward_mint: Pubkey,
    /// Length of a funding period in seconds.
    pub rewards_duration: u64,
    /// Lock applied to fresh stakes in seconds.
    pub minimum_stake_time: u64,
}

/// Emitted when the funding authority adds reward to the pool.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct RewardAdded {
    /// Newly notified reward (base units), excluding any rolled-over leftover.
    pub reward: u64,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Staked {
    pub user: Pubkey,
    pub amount: u64,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Withdrawn {
    pub user: Pubkey,
    pub amount: u64,
}

/// Emitted when accrued reward leaves the reward vault for a staker.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct RewardPaid {
    pub user: Pubkey,
    pub reward: u64,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct RewardsDurationUpdated {
    pub new_duration: u64,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct MinimumStakeTimeUpdated {
    pub new_value: u64,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PeriodFinishUpdated {
    pub new_period_finish: u64,
}

/// Emitted when the owner pulls a non-staking token out of a program vault.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Recovered {
    /// Mint of the recovered token.
    pub token: Pubkey,
    pub amount: u64,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PauseChanged {
    pub paused: bool,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct RewardsDistributionUpdated {
    pub rewards_distribution: Pubkey,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct OwnerNominated {
    pub candidate: Pubkey,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct OwnerChanged {
    pub old_owner: Pubkey,
    pub new_owner: Pubkey,
}
