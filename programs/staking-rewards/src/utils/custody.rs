use anchor_lang::prelude::*;

use super::token::{transfer_from_pool_vault_to_user, transfer_from_user_to_pool_vault};
use crate::accounting::{Asset, AssetTransfer};
use crate::error::ErrorCode;
use crate::AUTH_SEED;

/// One token route between a program vault and an outside account.
pub struct TokenLeg<'info> {
    pub vault: AccountInfo<'info>,
    /// The user (or owner) token account on the other side of the transfer.
    pub counterparty: AccountInfo<'info>,
    pub mint: AccountInfo<'info>,
    pub decimals: u8,
}

/// [`AssetTransfer`] backed by the program vaults.
///
/// Each instruction wires only the legs it needs; a transfer on a missing leg
/// fails with `MissingTokenAccount`.
pub struct VaultCustody<'info> {
    token_program: AccountInfo<'info>,
    /// Vault authority PDA and its bump; signs transfers out.
    authority: Option<(AccountInfo<'info>, u8)>,
    /// Signer pulling deposit tokens in on `transfer_in`.
    depositor: Option<AccountInfo<'info>>,
    staking: Option<TokenLeg<'info>>,
    reward: Option<TokenLeg<'info>>,
    foreign: Option<TokenLeg<'info>>,
    reward_balance: u64,
}

impl<'info> VaultCustody<'info> {
    pub fn new(token_program: AccountInfo<'info>) -> Self {
        Self {
            token_program,
            authority: None,
            depositor: None,
            staking: None,
            reward: None,
            foreign: None,
            reward_balance: 0,
        }
    }

    pub fn with_authority(mut self, authority: AccountInfo<'info>, bump: u8) -> Self {
        self.authority = Some((authority, bump));
        self
    }

    pub fn with_depositor(mut self, depositor: AccountInfo<'info>) -> Self {
        self.depositor = Some(depositor);
        self
    }

    pub fn with_staking(mut self, leg: TokenLeg<'info>) -> Self {
        self.staking = Some(leg);
        self
    }

    /// Reward route, with the reward vault's balance as loaded by the instruction.
    pub fn with_reward(mut self, leg: TokenLeg<'info>, vault_balance: u64) -> Self {
        self.reward = Some(leg);
        self.reward_balance = vault_balance;
        self
    }

    pub fn with_reward_balance(mut self, vault_balance: u64) -> Self {
        self.reward_balance = vault_balance;
        self
    }

    pub fn with_foreign(mut self, leg: TokenLeg<'info>) -> Self {
        self.foreign = Some(leg);
        self
    }

    fn leg(&self, asset: Asset) -> Result<&TokenLeg<'info>> {
        let leg = match asset {
            Asset::Staking => self.staking.as_ref(),
            Asset::Reward => self.reward.as_ref(),
            Asset::Foreign => self.foreign.as_ref(),
        };
        Ok(leg.ok_or(ErrorCode::MissingTokenAccount)?)
    }
}

impl<'info> AssetTransfer for VaultCustody<'info> {
    fn transfer_in(&mut self, amount: u64) -> Result<()> {
        let leg = self.leg(Asset::Staking)?;
        let depositor = self
            .depositor
            .clone()
            .ok_or(ErrorCode::MissingTokenAccount)?;

        transfer_from_user_to_pool_vault(
            depositor,
            leg.counterparty.clone(),
            leg.vault.clone(),
            leg.mint.clone(),
            self.token_program.clone(),
            amount,
            leg.decimals,
        )
    }

    fn transfer_out(&mut self, asset: Asset, amount: u64) -> Result<()> {
        let leg = self.leg(asset)?;
        let (authority, bump) = self
            .authority
            .clone()
            .ok_or(ErrorCode::MissingTokenAccount)?;

        transfer_from_pool_vault_to_user(
            authority,
            leg.vault.clone(),
            leg.counterparty.clone(),
            leg.mint.clone(),
            self.token_program.clone(),
            amount,
            leg.decimals,
            &[&[AUTH_SEED.as_bytes(), &[bump]]],
        )?;

        if asset == Asset::Reward {
            self.reward_balance = self.reward_balance.saturating_sub(amount);
        }
        Ok(())
    }

    fn reward_balance(&self) -> u64 {
        self.reward_balance
    }
}

/// [`AssetTransfer`] for operations that only change pool parameters.
///
/// Any attempt to move tokens fails with `MissingTokenAccount`.
pub struct NoCustody;

impl AssetTransfer for NoCustody {
    fn transfer_in(&mut self, _amount: u64) -> Result<()> {
        err!(ErrorCode::MissingTokenAccount)
    }

    fn transfer_out(&mut self, _asset: Asset, _amount: u64) -> Result<()> {
        err!(ErrorCode::MissingTokenAccount)
    }

    fn reward_balance(&self) -> u64 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_code(result: Result<()>) -> u32 {
        match result {
            Err(anchor_lang::error::Error::AnchorError(e)) => e.error_code_number,
            other => panic!("expected an anchor error, got {:?}", other),
        }
    }

    #[test]
    fn no_custody_refuses_every_transfer() {
        let mut custody = NoCustody;
        let missing = u32::from(ErrorCode::MissingTokenAccount);

        assert_eq!(error_code(custody.transfer_in(1)), missing);
        assert_eq!(error_code(custody.transfer_out(Asset::Reward, 1)), missing);
        assert_eq!(custody.reward_balance(), 0);
    }
}
