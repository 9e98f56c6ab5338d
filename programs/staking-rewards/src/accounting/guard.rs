use anchor_lang::prelude::*;

use crate::error::ErrorCode;
use crate::states::RewardPool;

impl RewardPool {
    /// Acquire the re-entrancy guard.
    pub fn enter(&mut self) -> Result<()> {
        require!(!self.locked, ErrorCode::ReentrancyDetected);
        self.locked = true;
        Ok(())
    }

    /// Release the re-entrancy guard.
    pub fn leave(&mut self) {
        self.locked = false;
    }
}
