use anchor_lang::prelude::*;

use super::fixed_point::Scaled;
use super::period::PeriodPhase;
use crate::error::ErrorCode;
use crate::states::{RewardPool, UserStakeInfo};

/// Read-only snapshot of one staker's position, as reported to clients.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PositionView {
    pub balance: u64,
    pub earned: u64,
    pub remaining_lock_time: u64,
    pub total_reward_paid: u64,
}

/// Read-only snapshot of the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolView {
    pub total_staked: u64,
    pub reward_per_unit: Scaled,
    pub last_time_reward_applicable: u64,
    pub reward_for_duration: u64,
    pub remaining_period: u64,
    pub phase: PeriodPhase,
}

impl RewardPool {
    pub fn total_supply(&self) -> u64 {
        self.total_staked
    }

    /// Reward paid out over one full period at the current rate.
    pub fn reward_for_duration(&self) -> Result<u64> {
        Ok(Scaled::from_raw(self.reward_rate)
            .mul_div(self.rewards_duration as u128, 1)
            .and_then(Scaled::to_amount)
            .ok_or(ErrorCode::MathOverflow)?)
    }

    /// Seconds of emission left in the current period.
    pub fn remaining_period(&self, now: u64) -> u64 {
        self.period_finish.saturating_sub(now)
    }

    /// Seconds until `entry` may withdraw or claim.
    pub fn remaining_lock_time(&self, entry: &UserStakeInfo, now: u64) -> u64 {
        entry.remaining_lock_time(self.minimum_stake_time, now)
    }

    pub fn view(&self, now: u64) -> Result<PoolView> {
        Ok(PoolView {
            total_staked: self.total_supply(),
            reward_per_unit: self.reward_per_unit(now)?,
            last_time_reward_applicable: self.last_time_reward_applicable(now),
            reward_for_duration: self.reward_for_duration()?,
            remaining_period: self.remaining_period(now),
            phase: self.period_phase(now),
        })
    }

    pub fn position(&self, entry: &UserStakeInfo, now: u64) -> Result<PositionView> {
        Ok(PositionView {
            balance: entry.balance,
            earned: self.earned(entry, now)?,
            remaining_lock_time: self.remaining_lock_time(entry, now),
            total_reward_paid: entry.total_reward_paid,
        })
    }
}

impl UserStakeInfo {
    pub fn balance_of(&self) -> u64 {
        self.balance
    }
}
