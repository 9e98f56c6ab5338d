//! In-memory collaborators for driving [`StakingEngine`] without a validator.

use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use super::{Asset, AssetTransfer, EventLog, PoolEvent, StakingEngine};
use crate::error::ErrorCode;
use crate::states::{GlobalConfig, RewardPool, UserStakeInfo};

pub type TestEngine<'a> = StakingEngine<'a, GlobalConfig, MemoryCustody, RecordedEvents>;

/// Token balances the program would hold, plus a log of every movement.
#[derive(Clone, Debug, Default)]
pub struct MemoryCustody {
    pub staking_vault: u64,
    pub reward_vault: u64,
    pub foreign_vault: u64,
    pub transfers_in: Vec<u64>,
    pub transfers_out: Vec<(Asset, u64)>,
    /// When set, the next transfer in either direction fails.
    pub fail_next: bool,
}

impl MemoryCustody {
    fn take_failure(&mut self) -> Result<()> {
        if std::mem::take(&mut self.fail_next) {
            return Err(ProgramError::InsufficientFunds.into());
        }
        Ok(())
    }

    pub fn paid_out(&self, asset: Asset) -> u64 {
        self.transfers_out
            .iter()
            .filter(|(a, _)| *a == asset)
            .map(|(_, amount)| amount)
            .sum()
    }
}

impl AssetTransfer for MemoryCustody {
    fn transfer_in(&mut self, amount: u64) -> Result<()> {
        self.take_failure()?;
        self.staking_vault = self
            .staking_vault
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        self.transfers_in.push(amount);
        Ok(())
    }

    fn transfer_out(&mut self, asset: Asset, amount: u64) -> Result<()> {
        self.take_failure()?;
        let vault = match asset {
            Asset::Staking => &mut self.staking_vault,
            Asset::Reward => &mut self.reward_vault,
            Asset::Foreign => &mut self.foreign_vault,
        };
        *vault = match vault.checked_sub(amount) {
            Some(left) => left,
            None => return Err(ProgramError::InsufficientFunds.into()),
        };
        self.transfers_out.push((asset, amount));
        Ok(())
    }

    fn reward_balance(&self) -> u64 {
        self.reward_vault
    }
}

#[derive(Clone, Debug, Default)]
pub struct RecordedEvents(pub Vec<PoolEvent>);

impl EventLog for RecordedEvents {
    fn record(&mut self, event: PoolEvent) {
        self.0.push(event);
    }
}

/// A pool plus its ledger, owner and funding authority, with a settable clock.
pub struct Harness {
    pub config: GlobalConfig,
    pub pool: RewardPool,
    pub custody: MemoryCustody,
    pub events: RecordedEvents,
    pub accounts: BTreeMap<Pubkey, UserStakeInfo>,
    pub now: u64,
    /// Reward tokens deposited through [`Harness::fund`].
    pub funded: u64,
}

impl Harness {
    pub const START: u64 = 1_700_000_000;

    pub fn new(rewards_duration: u64, minimum_stake_time: u64) -> Self {
        let config = GlobalConfig {
            owner: Pubkey::new_unique(),
            rewards_distribution: Pubkey::new_unique(),
            staking_mint: Pubkey::new_unique(),
            reward_mint: Pubkey::new_unique(),
            ..Default::default()
        };
        let pool = RewardPool {
            rewards_duration,
            minimum_stake_time,
            ..Default::default()
        };
        Self {
            config,
            pool,
            custody: MemoryCustody::default(),
            events: RecordedEvents::default(),
            accounts: BTreeMap::new(),
            now: Self::START,
            funded: 0,
        }
    }

    pub fn owner(&self) -> Pubkey {
        self.config.owner
    }

    pub fn distributor(&self) -> Pubkey {
        self.config.rewards_distribution
    }

    pub fn advance(&mut self, seconds: u64) {
        self.now += seconds;
    }

    pub fn engine(&mut self) -> TestEngine<'_> {
        StakingEngine::new(
            &mut self.pool,
            &self.config,
            &mut self.custody,
            &mut self.events,
            self.now,
        )
    }

    pub fn entry(&self, user: &Pubkey) -> UserStakeInfo {
        self.accounts.get(user).cloned().unwrap_or_default()
    }

    pub fn on_account<R>(
        &mut self,
        user: Pubkey,
        op: impl FnOnce(&mut TestEngine<'_>, &mut UserStakeInfo) -> Result<R>,
    ) -> Result<R> {
        let mut entry = self.accounts.remove(&user).unwrap_or_default();
        entry.bind(user, 255);
        let mut engine = StakingEngine::new(
            &mut self.pool,
            &self.config,
            &mut self.custody,
            &mut self.events,
            self.now,
        );
        let result = op(&mut engine, &mut entry);
        self.accounts.insert(user, entry);
        result
    }

    pub fn stake(&mut self, user: Pubkey, amount: u64) -> Result<()> {
        self.on_account(user, |engine, entry| engine.stake(entry, amount))
    }

    pub fn withdraw(&mut self, user: Pubkey, amount: u64) -> Result<()> {
        self.on_account(user, |engine, entry| engine.withdraw(entry, amount))
    }

    pub fn get_reward(&mut self, user: Pubkey) -> Result<u64> {
        self.on_account(user, |engine, entry| engine.get_reward(entry))
    }

    pub fn exit(&mut self, user: Pubkey) -> Result<(u64, u64)> {
        self.on_account(user, |engine, entry| engine.exit(entry))
    }

    /// Deposits `reward` into the reward vault, then notifies as the funding authority.
    pub fn fund(&mut self, reward: u64) -> Result<()> {
        self.custody.reward_vault += reward;
        let distributor = self.distributor();
        let result = self.engine().notify_reward_amount(&distributor, reward);
        match result {
            Ok(()) => self.funded += reward,
            Err(_) => self.custody.reward_vault -= reward,
        }
        result
    }

    pub fn earned(&self, user: &Pubkey) -> u64 {
        self.pool.earned(&self.entry(user), self.now).unwrap()
    }

    pub fn sum_of_balances(&self) -> u64 {
        self.accounts.values().map(|e| e.balance).sum()
    }
}

/// Asserts that `result` failed with `expected`.
pub fn assert_error<T: std::fmt::Debug>(result: Result<T>, expected: ErrorCode) {
    match result {
        Err(anchor_lang::error::Error::AnchorError(e)) => {
            assert_eq!(
                e.error_code_number,
                u32::from(expected),
                "expected {:?}, got {}",
                expected,
                e.error_name
            );
        }
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}
