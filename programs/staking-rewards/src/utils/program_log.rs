use anchor_lang::prelude::*;

use crate::accounting::{EventLog, PoolEvent};
use crate::states::{
    MinimumStakeTimeUpdated, PeriodFinishUpdated, Recovered, RewardAdded, RewardPaid,
    RewardsDurationUpdated, Staked, Withdrawn,
};

/// Forwards engine events to the transaction log as Anchor events.
#[derive(Default)]
pub struct ProgramLog;

impl EventLog for ProgramLog {
    fn record(&mut self, event: PoolEvent) {
        match event {
            PoolEvent::RewardAdded { reward } => emit!(RewardAdded { reward }),
            PoolEvent::Staked { user, amount } => emit!(Staked { user, amount }),
            PoolEvent::Withdrawn { user, amount } => emit!(Withdrawn { user, amount }),
            PoolEvent::RewardPaid { user, reward } => emit!(RewardPaid { user, reward }),
            PoolEvent::RewardsDurationUpdated { new_duration } => {
                emit!(RewardsDurationUpdated { new_duration })
            }
            PoolEvent::MinimumStakeTimeUpdated { new_value } => {
                emit!(MinimumStakeTimeUpdated { new_value })
            }
            PoolEvent::PeriodFinishUpdated { new_period_finish } => {
                emit!(PeriodFinishUpdated { new_period_finish })
            }
            PoolEvent::Recovered { token, amount } => emit!(Recovered { token, amount }),
        }
    }
}
