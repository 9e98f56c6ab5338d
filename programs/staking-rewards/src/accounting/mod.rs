//! Reward accounting engine.
//!
//! Everything in here is pure state manipulation over [`RewardPool`] and
//! [`UserStakeInfo`]. The program's instruction handlers bind the three
//! collaborator traits below to real accounts; tests bind them to in-memory
//! doubles.
//!
//! [`RewardPool`]: crate::states::RewardPool
//! [`UserStakeInfo`]: crate::states::UserStakeInfo

use anchor_lang::prelude::*;

pub mod accumulator;
pub mod checkpoint;
pub mod engine;
pub mod fixed_point;
pub mod guard;
pub mod ledger;
pub mod period;
pub mod views;

#[cfg(test)]
mod testing;

pub use engine::StakingEngine;
pub use fixed_point::{Scaled, SCALE};
pub use period::PeriodPhase;

/// Capabilities checked before privileged operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Owner,
    RewardsDistribution,
    NominatedOwner,
}

/// Access-control and pause gates consulted by the engine.
pub trait Gatekeeper {
    fn is_authorized(&self, caller: &Pubkey, role: Role) -> bool;
    fn is_paused(&self) -> bool;
}

/// Which vault a transfer out of the program draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Asset {
    /// Staked principal.
    Staking,
    /// Reward token.
    Reward,
    /// Any other token the program happens to hold.
    Foreign,
}

/// Token custody primitive. A failing transfer must abort the whole operation.
pub trait AssetTransfer {
    /// Pulls `amount` of the deposit token from the acting user into the staking vault.
    fn transfer_in(&mut self, amount: u64) -> Result<()>;

    /// Pushes `amount` of `asset` out of the program to the bound recipient.
    fn transfer_out(&mut self, asset: Asset, amount: u64) -> Result<()>;

    /// Reward tokens currently held by the program.
    fn reward_balance(&self) -> u64;
}

/// Outcome events, handed to the log only after an operation fully succeeds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolEvent {
    RewardAdded { reward: u64 },
    Staked { user: Pubkey, amount: u64 },
    Withdrawn { user: Pubkey, amount: u64 },
    RewardPaid { user: Pubkey, reward: u64 },
    RewardsDurationUpdated { new_duration: u64 },
    MinimumStakeTimeUpdated { new_value: u64 },
    PeriodFinishUpdated { new_period_finish: u64 },
    Recovered { token: Pubkey, amount: u64 },
}

pub trait EventLog {
    fn record(&mut self, event: PoolEvent);
}
