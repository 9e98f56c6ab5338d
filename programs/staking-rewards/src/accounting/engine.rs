use anchor_lang::prelude::*;

use super::{Asset, AssetTransfer, EventLog, Gatekeeper, PoolEvent, Role};
use crate::error::ErrorCode;
use crate::states::{RewardPool, UserStakeInfo};

/// Drives every mutating pool operation.
///
/// Each operation runs as one atomic section: the re-entrancy guard is taken,
/// the pool (and the acting entry) are snapshotted, and the body runs in the
/// order gates, preconditions, checkpoint, mutation, transfer, event. A failure
/// anywhere restores the snapshots and drops the buffered events.
pub struct StakingEngine<'a, G, T, E>
where
    G: Gatekeeper,
    T: AssetTransfer,
    E: EventLog,
{
    pool: &'a mut RewardPool,
    gate: &'a G,
    custody: &'a mut T,
    log: &'a mut E,
    now: u64,
    pending: Vec<PoolEvent>,
}

impl<'a, G, T, E> StakingEngine<'a, G, T, E>
where
    G: Gatekeeper,
    T: AssetTransfer,
    E: EventLog,
{
    pub fn new(
        pool: &'a mut RewardPool,
        gate: &'a G,
        custody: &'a mut T,
        log: &'a mut E,
        now: u64,
    ) -> Self {
        Self {
            pool,
            gate,
            custody,
            log,
            now,
            pending: Vec::new(),
        }
    }

    pub fn pool(&self) -> &RewardPool {
        &*self.pool
    }

    fn emit(&mut self, event: PoolEvent) {
        self.pending.push(event);
    }

    fn authorize(&self, caller: &Pubkey, role: Role) -> Result<()> {
        require!(
            self.gate.is_authorized(caller, role),
            ErrorCode::Unauthorized
        );
        Ok(())
    }

    fn atomically<R>(&mut self, op: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
        let saved = self.pool.clone();
        self.pool.enter()?;

        match op(self) {
            Ok(value) => {
                self.pool.leave();
                for event in self.pending.drain(..) {
                    self.log.record(event);
                }
                Ok(value)
            }
            Err(err) => {
                *self.pool = saved;
                self.pending.clear();
                Err(err)
            }
        }
    }

    fn with_account<R>(
        &mut self,
        entry: &mut UserStakeInfo,
        op: impl FnOnce(&mut Self, &mut UserStakeInfo) -> Result<R>,
    ) -> Result<R> {
        let saved = entry.clone();
        let outcome = self.atomically(|engine| op(engine, &mut *entry));
        if outcome.is_err() {
            *entry = saved;
        }
        outcome
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    pub fn stake(&mut self, entry: &mut UserStakeInfo, amount: u64) -> Result<()> {
        self.with_account(entry, |engine, entry| {
            require!(!engine.gate.is_paused(), ErrorCode::Paused);
            require!(amount > 0, ErrorCode::InvalidAmount);

            engine.pool.checkpoint(engine.now, Some(&mut *entry))?;
            engine.pool.credit_stake(entry, amount, engine.now)?;
            engine.custody.transfer_in(amount)?;

            engine.emit(PoolEvent::Staked {
                user: entry.owner,
                amount,
            });
            Ok(())
        })
    }

    pub fn withdraw(&mut self, entry: &mut UserStakeInfo, amount: u64) -> Result<()> {
        self.with_account(entry, |engine, entry| engine.withdraw_inner(entry, amount))
    }

    /// Pays out everything owed to `entry`. Returns the amount paid; `0` pays
    /// nothing and emits nothing.
    pub fn get_reward(&mut self, entry: &mut UserStakeInfo) -> Result<u64> {
        self.with_account(entry, |engine, entry| engine.get_reward_inner(entry))
    }

    /// Withdraw the full balance then claim, as one section. Returns `(withdrawn, reward)`.
    pub fn exit(&mut self, entry: &mut UserStakeInfo) -> Result<(u64, u64)> {
        self.with_account(entry, |engine, entry| {
            let balance = entry.balance;
            engine.withdraw_inner(entry, balance)?;
            let reward = engine.get_reward_inner(entry)?;
            Ok((balance, reward))
        })
    }

    fn withdraw_inner(&mut self, entry: &mut UserStakeInfo, amount: u64) -> Result<()> {
        require!(amount > 0, ErrorCode::InvalidAmount);
        entry.ensure_unlocked(self.pool.minimum_stake_time, self.now)?;

        self.pool.checkpoint(self.now, Some(&mut *entry))?;
        self.pool.debit_stake(entry, amount)?;
        self.custody.transfer_out(Asset::Staking, amount)?;

        self.emit(PoolEvent::Withdrawn {
            user: entry.owner,
            amount,
        });
        Ok(())
    }

    fn get_reward_inner(&mut self, entry: &mut UserStakeInfo) -> Result<u64> {
        entry.ensure_unlocked(self.pool.minimum_stake_time, self.now)?;

        self.pool.checkpoint(self.now, Some(&mut *entry))?;
        let reward = entry.take_owed_reward()?;
        if reward > 0 {
            self.custody.transfer_out(Asset::Reward, reward)?;
            self.emit(PoolEvent::RewardPaid {
                user: entry.owner,
                reward,
            });
        }
        Ok(reward)
    }

    // ── Funding ─────────────────────────────────────────────────────────────

    /// Starts or extends the reward period. The reward tokens must already sit
    /// in the reward vault; the rate is capped by what the vault holds.
    pub fn notify_reward_amount(&mut self, caller: &Pubkey, reward: u64) -> Result<()> {
        self.atomically(|engine| {
            engine.authorize(caller, Role::RewardsDistribution)?;

            engine.pool.checkpoint(engine.now, None)?;
            let balance = engine.custody.reward_balance();
            let rate = engine.pool.start_period(reward, balance, engine.now)?;

            msg!(
                "reward {} funded, rate {}, period_finish {}",
                reward,
                rate.raw(),
                engine.pool.period_finish
            );

            engine.emit(PoolEvent::RewardAdded { reward });
            Ok(())
        })
    }

    // ── Owner parameters ────────────────────────────────────────────────────

    pub fn update_period_finish(&mut self, caller: &Pubkey, timestamp: u64) -> Result<()> {
        self.atomically(|engine| {
            engine.authorize(caller, Role::Owner)?;

            engine.pool.checkpoint(engine.now, None)?;
            engine.pool.set_period_finish(timestamp)?;

            engine.emit(PoolEvent::PeriodFinishUpdated {
                new_period_finish: timestamp,
            });
            Ok(())
        })
    }

    pub fn set_rewards_duration(&mut self, caller: &Pubkey, duration: u64) -> Result<()> {
        self.atomically(|engine| {
            engine.authorize(caller, Role::Owner)?;
            engine.pool.set_rewards_duration(duration, engine.now)?;

            engine.emit(PoolEvent::RewardsDurationUpdated {
                new_duration: duration,
            });
            Ok(())
        })
    }

    pub fn set_minimum_stake_time(&mut self, caller: &Pubkey, value: u64) -> Result<()> {
        self.atomically(|engine| {
            engine.authorize(caller, Role::Owner)?;
            engine.pool.minimum_stake_time = value;

            engine.emit(PoolEvent::MinimumStakeTimeUpdated { new_value: value });
            Ok(())
        })
    }

    /// Sends `amount` of a non-staking token held by the program to the owner.
    pub fn recover(
        &mut self,
        caller: &Pubkey,
        token: Pubkey,
        staking_mint: &Pubkey,
        amount: u64,
    ) -> Result<()> {
        self.atomically(|engine| {
            engine.authorize(caller, Role::Owner)?;
            require_keys_neq!(token, *staking_mint, ErrorCode::ForbiddenAsset);

            engine.custody.transfer_out(Asset::Foreign, amount)?;

            engine.emit(PoolEvent::Recovered { token, amount });
            Ok(())
        })
    }
}
