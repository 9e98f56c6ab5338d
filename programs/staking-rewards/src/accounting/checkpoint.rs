use anchor_lang::prelude::*;

use super::accumulator::earned;
use super::fixed_point::Scaled;
use crate::states::{RewardPool, UserStakeInfo};

impl RewardPool {
    /// Bring the reward integral, and optionally one staker's entry, up to `now`.
    ///
    /// Must run before any change to `total_staked`, a balance, or the rate;
    /// otherwise the elapsed interval would be priced at the new values.
    ///
    /// 1. `reward_per_unit_stored ← reward_per_unit(now)`
    /// 2. `last_update_time ← min(now, period_finish)`
    /// 3. for `account`: `owed_reward ← earned`, `reward_per_unit_paid ← stored`
    pub fn checkpoint(&mut self, now: u64, account: Option<&mut UserStakeInfo>) -> Result<()> {
        let reward_per_unit = self.reward_per_unit(now)?;
        self.reward_per_unit_stored = reward_per_unit.raw();
        self.last_update_time = self.last_time_reward_applicable(now);

        if let Some(entry) = account {
            entry.owed_reward = earned(
                entry.balance,
                reward_per_unit,
                Scaled::from_raw(entry.reward_per_unit_paid),
                entry.owed_reward,
            )?;
            entry.reward_per_unit_paid = self.reward_per_unit_stored;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounting::SCALE;

    fn funded_pool() -> RewardPool {
        RewardPool {
            reward_rate: SCALE,
            period_finish: 100,
            rewards_duration: 100,
            total_staked: 100,
            ..Default::default()
        }
    }

    #[test]
    fn global_checkpoint_advances_integral_and_clock() {
        let mut pool = funded_pool();
        pool.checkpoint(40, None).unwrap();

        assert_eq!(pool.last_update_time, 40);
        assert_eq!(pool.reward_per_unit_stored, 40 * SCALE / 100);
    }

    #[test]
    fn account_checkpoint_moves_accrual_into_owed() {
        let mut pool = funded_pool();
        let mut entry = UserStakeInfo {
            balance: 100,
            ..Default::default()
        };

        pool.checkpoint(50, Some(&mut entry)).unwrap();
        assert_eq!(entry.owed_reward, 50);
        assert_eq!(entry.reward_per_unit_paid, pool.reward_per_unit_stored);

        // a second checkpoint at the same instant is a no-op
        pool.checkpoint(50, Some(&mut entry)).unwrap();
        assert_eq!(entry.owed_reward, 50);
    }

    #[test]
    fn checkpoint_after_period_end_stops_at_finish() {
        let mut pool = funded_pool();
        pool.checkpoint(250, None).unwrap();

        assert_eq!(pool.last_update_time, 100);
        assert_eq!(pool.reward_per_unit_stored, SCALE);
    }

    #[test]
    fn empty_pool_only_moves_the_clock() {
        let mut pool = RewardPool {
            total_staked: 0,
            ..funded_pool()
        };
        pool.checkpoint(60, None).unwrap();

        assert_eq!(pool.reward_per_unit_stored, 0);
        assert_eq!(pool.last_update_time, 60);
    }
}
