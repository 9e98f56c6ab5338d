use anchor_lang::prelude::*;

use super::fixed_point::Scaled;
use crate::error::ErrorCode;
use crate::states::{RewardPool, UserStakeInfo};

// ── Core reward math ────────────────────────────────────────────────────────

/// Emission stops at `period_finish`; anything later is clamped to it.
pub fn last_time_reward_applicable(period_finish: u64, now: u64) -> u64 {
    now.min(period_finish)
}

/// Advance the reward-per-unit integral by `elapsed` seconds.
///
/// ```text
/// new = stored + elapsed × reward_rate / total_staked
/// ```
///
/// `reward_rate` already carries the fixed-point scale. When nothing is staked
/// the integral does not move, so time spent with an empty pool is never
/// distributed later.
pub fn reward_per_unit(
    stored: Scaled,
    reward_rate: Scaled,
    elapsed: u64,
    total_staked: u64,
) -> Result<Scaled> {
    if total_staked == 0 {
        return Ok(stored);
    }

    let delta = reward_rate
        .mul_div(elapsed as u128, total_staked as u128)
        .ok_or(ErrorCode::MathOverflow)?;

    Ok(stored.checked_add(delta).ok_or(ErrorCode::MathOverflow)?)
}

/// Reward owed to a staker.
///
/// ```text
/// earned = balance × (reward_per_unit − reward_per_unit_paid) / SCALE + owed
/// ```
pub fn earned(
    balance: u64,
    reward_per_unit: Scaled,
    reward_per_unit_paid: Scaled,
    owed: u64,
) -> Result<u64> {
    let pending = reward_per_unit
        .checked_sub(reward_per_unit_paid)
        .ok_or(ErrorCode::MathOverflow)?
        .apply_to(balance)
        .ok_or(ErrorCode::MathOverflow)?;

    Ok(owed.checked_add(pending).ok_or(ErrorCode::MathOverflow)?)
}

impl RewardPool {
    pub fn last_time_reward_applicable(&self, now: u64) -> u64 {
        last_time_reward_applicable(self.period_finish, now)
    }

    /// Reward-per-unit as of `now`, without writing it back.
    pub fn reward_per_unit(&self, now: u64) -> Result<Scaled> {
        let elapsed = self
            .last_time_reward_applicable(now)
            .checked_sub(self.last_update_time)
            .ok_or(ErrorCode::InvalidTimestamp)?;

        reward_per_unit(
            Scaled::from_raw(self.reward_per_unit_stored),
            Scaled::from_raw(self.reward_rate),
            elapsed,
            self.total_staked,
        )
    }

    /// Reward `entry` could claim at `now`. Pure; nothing is written.
    pub fn earned(&self, entry: &UserStakeInfo, now: u64) -> Result<u64> {
        earned(
            entry.balance,
            self.reward_per_unit(now)?,
            Scaled::from_raw(entry.reward_per_unit_paid),
            entry.owed_reward,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounting::SCALE;

    #[test]
    fn applicable_time_is_clamped_to_period_finish() {
        assert_eq!(last_time_reward_applicable(100, 40), 40);
        assert_eq!(last_time_reward_applicable(100, 400), 100);
        assert_eq!(last_time_reward_applicable(0, 400), 0);
    }

    #[test]
    fn integral_frozen_when_nothing_staked() {
        let stored = Scaled::from_raw(500);
        let rate = Scaled::from_amount(100).unwrap();
        assert_eq!(reward_per_unit(stored, rate, 60, 0).unwrap(), stored);
    }

    #[test]
    fn integral_accumulates_rate_over_stake() {
        // 10 tokens/s for 100 s over 1_000 staked is one token per staked unit
        let rate = Scaled::from_amount(10).unwrap();
        let rpu = reward_per_unit(Scaled::ZERO, rate, 100, 1_000).unwrap();
        assert_eq!(rpu.raw(), SCALE);
    }

    #[test]
    fn earned_without_new_accumulation_is_owed_only() {
        let rpu = Scaled::from_raw(100);
        assert_eq!(earned(500, rpu, rpu, 50).unwrap(), 50);
    }

    #[test]
    fn earned_proportional_to_balance() {
        let rpu = Scaled::from_raw(SCALE);
        assert_eq!(earned(1_000, rpu, Scaled::ZERO, 0).unwrap(), 1_000);
        assert_eq!(earned(3_000, rpu, Scaled::ZERO, 7).unwrap(), 3_007);
    }

    #[test]
    fn earned_rejects_checkpoint_ahead_of_integral() {
        let result = earned(1, Scaled::from_raw(1), Scaled::from_raw(2), 0);
        assert!(result.is_err());
    }

    #[test]
    fn pool_view_uses_elapsed_since_last_update() {
        let pool = RewardPool {
            reward_rate: SCALE,
            period_finish: 100,
            last_update_time: 20,
            total_staked: 10,
            ..Default::default()
        };
        // 30 s at 1 token/s over 10 units
        assert_eq!(pool.reward_per_unit(50).unwrap().raw(), 3 * SCALE);
        // capped at period_finish: 80 s
        assert_eq!(pool.reward_per_unit(1_000).unwrap().raw(), 8 * SCALE);
    }

    #[test]
    fn clock_behind_last_update_is_rejected() {
        let pool = RewardPool {
            period_finish: 100,
            last_update_time: 50,
            ..Default::default()
        };
        assert!(pool.reward_per_unit(10).is_err());
    }
}
