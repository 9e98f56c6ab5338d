use anchor_lang::prelude::*;

use super::fixed_point::Scaled;
use crate::error::ErrorCode;
use crate::states::RewardPool;

/// Where the funding period stands at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeriodPhase {
    /// Never funded (`period_finish == 0`).
    Idle,
    /// Emitting (`now < period_finish`).
    Funded,
    /// Period elapsed; the next funding starts a fresh one.
    Expired,
}

impl RewardPool {
    pub fn period_phase(&self, now: u64) -> PeriodPhase {
        if self.period_finish == 0 {
            PeriodPhase::Idle
        } else if now < self.period_finish {
            PeriodPhase::Funded
        } else {
            PeriodPhase::Expired
        }
    }

    /// Rate a new funding of `reward` would produce at `now`.
    ///
    /// Mid-period, the undistributed remainder of the current rate is folded in:
    ///
    /// ```text
    /// leftover = (period_finish − now) × reward_rate
    /// rate     = (reward × SCALE + leftover) / rewards_duration
    /// ```
    pub fn next_reward_rate(&self, reward: u64, now: u64) -> Result<Scaled> {
        let reward = Scaled::from_amount(reward).ok_or(ErrorCode::MathOverflow)?;
        let total = if now >= self.period_finish {
            reward
        } else {
            let remaining = self.period_finish - now;
            let leftover = Scaled::from_raw(self.reward_rate)
                .mul_div(remaining as u128, 1)
                .ok_or(ErrorCode::MathOverflow)?;
            reward.checked_add(leftover).ok_or(ErrorCode::MathOverflow)?
        };

        Ok(total
            .mul_div(1, self.rewards_duration as u128)
            .ok_or(ErrorCode::MathOverflow)?)
    }

    /// Highest rate the reward vault can sustain for a whole period.
    pub fn max_reward_rate(&self, reward_balance: u64) -> Result<Scaled> {
        Ok(Scaled::ratio(reward_balance, self.rewards_duration).ok_or(ErrorCode::MathOverflow)?)
    }

    /// Start a new period funded with `reward`. Run after a global checkpoint.
    ///
    /// Fails with `InsolventFunding`, leaving the pool untouched, when the
    /// resulting rate would pay out more than `reward_balance` over the period.
    pub fn start_period(&mut self, reward: u64, reward_balance: u64, now: u64) -> Result<Scaled> {
        let rate = self.next_reward_rate(reward, now)?;
        require!(
            rate <= self.max_reward_rate(reward_balance)?,
            ErrorCode::InsolventFunding
        );

        self.reward_rate = rate.raw();
        self.last_update_time = now;
        self.period_finish = now
            .checked_add(self.rewards_duration)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(rate)
    }

    /// Move the end of the current period without touching the rate.
    pub fn set_period_finish(&mut self, timestamp: u64) -> Result<()> {
        require!(
            timestamp > self.last_update_time,
            ErrorCode::InvalidPeriodFinish
        );
        self.period_finish = timestamp;
        Ok(())
    }

    /// Change the period length; only allowed once the current period is over.
    pub fn set_rewards_duration(&mut self, duration: u64, now: u64) -> Result<()> {
        require!(duration > 0, ErrorCode::InvalidAmount);
        require!(now > self.period_finish, ErrorCode::PeriodInProgress);
        self.rewards_duration = duration;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounting::SCALE;

    fn pool(duration: u64) -> RewardPool {
        RewardPool {
            rewards_duration: duration,
            ..Default::default()
        }
    }

    #[test]
    fn phases_follow_period_finish() {
        let mut p = pool(100);
        assert_eq!(p.period_phase(5), PeriodPhase::Idle);

        p.start_period(100, 100, 10).unwrap();
        assert_eq!(p.period_phase(50), PeriodPhase::Funded);
        assert_eq!(p.period_phase(110), PeriodPhase::Expired);
    }

    #[test]
    fn fresh_period_rate_is_reward_over_duration() {
        let mut p = pool(100);
        let rate = p.start_period(100, 100, 1_000).unwrap();

        assert_eq!(rate.raw(), SCALE);
        assert_eq!(p.last_update_time, 1_000);
        assert_eq!(p.period_finish, 1_100);
        assert_eq!(p.reward_for_duration().unwrap(), 100);
    }

    #[test]
    fn mid_period_funding_rolls_leftover_into_rate() {
        let mut p = pool(100);
        p.start_period(100, 100, 0).unwrap();

        // 50 s remain at 1 token/s: leftover 50, new rate (200 + 50) / 100
        let rate = p.start_period(200, 250, 50).unwrap();
        assert_eq!(rate.raw(), 250 * SCALE / 100);
        assert_eq!(p.period_finish, 150);
        assert_eq!(p.reward_for_duration().unwrap(), 250);
    }

    #[test]
    fn insolvent_funding_leaves_pool_unchanged() {
        let mut p = pool(100);
        let before = p.clone();

        assert!(p.start_period(101, 100, 0).is_err());
        assert_eq!(p, before);
    }

    #[test]
    fn period_finish_must_follow_last_update() {
        let mut p = pool(100);
        p.start_period(100, 100, 10).unwrap();

        assert!(p.set_period_finish(10).is_err());
        p.set_period_finish(11).unwrap();
        assert_eq!(p.period_finish, 11);
        p.set_period_finish(500).unwrap();
        assert_eq!(p.period_finish, 500);
    }

    #[test]
    fn duration_locked_while_period_runs() {
        let mut p = pool(100);
        p.start_period(100, 100, 0).unwrap();

        assert!(p.set_rewards_duration(50, 99).is_err());
        assert!(p.set_rewards_duration(50, 100).is_err());
        p.set_rewards_duration(50, 101).unwrap();
        assert_eq!(p.rewards_duration, 50);
        assert!(p.set_rewards_duration(0, 500).is_err());
    }
}
