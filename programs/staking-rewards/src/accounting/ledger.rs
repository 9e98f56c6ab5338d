use anchor_lang::prelude::*;

use crate::error::ErrorCode;
use crate::states::{RewardPool, UserStakeInfo};

impl UserStakeInfo {
    /// Fails with `FundsLocked` while the stake is younger than `minimum_stake_time`.
    pub fn ensure_unlocked(&self, minimum_stake_time: u64, now: u64) -> Result<()> {
        if minimum_stake_time > 0 {
            require!(
                now.saturating_sub(self.stake_timestamp) >= minimum_stake_time,
                ErrorCode::FundsLocked
            );
        }
        Ok(())
    }

    /// Seconds until withdraw and claim open up; `0` when already unlocked.
    pub fn remaining_lock_time(&self, minimum_stake_time: u64, now: u64) -> u64 {
        if minimum_stake_time == 0 || self.stake_timestamp == 0 {
            return 0;
        }
        self.stake_timestamp
            .saturating_add(minimum_stake_time)
            .saturating_sub(now)
    }

    /// Zeroes the owed reward and returns it. Called before any transfer out.
    pub fn take_owed_reward(&mut self) -> Result<u64> {
        let reward = self.owed_reward;
        self.owed_reward = 0;
        self.total_reward_paid = self
            .total_reward_paid
            .checked_add(reward)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(reward)
    }
}

impl RewardPool {
    /// Adds `amount` to `entry` and the pool total. The lock clock starts only
    /// when the balance was empty; top-ups keep the original timestamp.
    pub fn credit_stake(&mut self, entry: &mut UserStakeInfo, amount: u64, now: u64) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        entry.balance = entry
            .balance
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        if entry.stake_timestamp == 0 {
            entry.stake_timestamp = now;
        }
        Ok(())
    }

    /// Removes `amount` from `entry` and the pool total, clearing the lock when
    /// the balance reaches zero.
    pub fn debit_stake(&mut self, entry: &mut UserStakeInfo, amount: u64) -> Result<()> {
        entry.balance = entry
            .balance
            .checked_sub(amount)
            .ok_or(ErrorCode::InsufficientBalance)?;
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        if entry.balance == 0 {
            entry.stake_timestamp = 0;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_up_keeps_original_lock_start() {
        let mut pool = RewardPool::default();
        let mut entry = UserStakeInfo::default();

        pool.credit_stake(&mut entry, 10, 1_000).unwrap();
        pool.credit_stake(&mut entry, 5, 2_000).unwrap();

        assert_eq!(entry.balance, 15);
        assert_eq!(entry.stake_timestamp, 1_000);
        assert_eq!(pool.total_staked, 15);
    }

    #[test]
    fn full_debit_clears_lock() {
        let mut pool = RewardPool::default();
        let mut entry = UserStakeInfo::default();
        pool.credit_stake(&mut entry, 10, 1_000).unwrap();

        pool.debit_stake(&mut entry, 4).unwrap();
        assert_eq!(entry.stake_timestamp, 1_000);

        pool.debit_stake(&mut entry, 6).unwrap();
        assert_eq!(entry.stake_timestamp, 0);
        assert_eq!(pool.total_staked, 0);
    }

    #[test]
    fn overdraw_is_insufficient_balance() {
        let mut pool = RewardPool::default();
        let mut entry = UserStakeInfo::default();
        pool.credit_stake(&mut entry, 3, 1).unwrap();

        assert!(pool.debit_stake(&mut entry, 4).is_err());
    }

    #[test]
    fn lock_opens_exactly_at_boundary() {
        let entry = UserStakeInfo {
            balance: 1,
            stake_timestamp: 1_000,
            ..Default::default()
        };

        assert!(entry.ensure_unlocked(60, 1_059).is_err());
        assert!(entry.ensure_unlocked(60, 1_060).is_ok());
        assert!(entry.ensure_unlocked(0, 1_000).is_ok());
        assert_eq!(entry.remaining_lock_time(60, 1_030), 30);
        assert_eq!(entry.remaining_lock_time(60, 2_000), 0);
    }

    #[test]
    fn take_owed_reward_zeroes_and_tallies() {
        let mut entry = UserStakeInfo {
            owed_reward: 42,
            total_reward_paid: 8,
            ..Default::default()
        };

        assert_eq!(entry.take_owed_reward().unwrap(), 42);
        assert_eq!(entry.owed_reward, 0);
        assert_eq!(entry.total_reward_paid, 50);
    }
}
