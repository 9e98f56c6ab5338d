use anchor_lang::prelude::*;

use crate::error::ErrorCode;

/// Current cluster time in seconds.
pub fn current_timestamp() -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    Ok(u64::try_from(now).map_err(|_| ErrorCode::InvalidTimestamp)?)
}
