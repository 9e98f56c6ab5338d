use anchor_lang::prelude::*;
use anchor_spl::token_2022::spl_token_2022::{
    self,
    extension::{BaseStateWithExtensions, ExtensionType, StateWithExtensions},
};
use anchor_spl::token_interface::{self, TransferChecked};

use crate::error::ErrorCode;

/// Fails with `UnsupportedMint` if `extensions` makes a transfer deliver less
/// than the amount sent.
pub fn reject_fee_extensions(extensions: &[ExtensionType]) -> Result<()> {
    require!(
        !extensions.contains(&ExtensionType::TransferFeeConfig),
        ErrorCode::UnsupportedMint
    );
    Ok(())
}

/// Vault balances track credited amounts one to one, so a mint whose
/// transfers withhold a fee cannot back a pool. Classic SPL mints always pass.
pub fn ensure_supported_mint(mint: &AccountInfo) -> Result<()> {
    if *mint.owner != spl_token_2022::ID {
        return Ok(());
    }
    let data = mint.try_borrow_data()?;
    let state = StateWithExtensions::<spl_token_2022::state::Mint>::unpack(&data)?;
    reject_fee_extensions(&state.get_extension_types()?)
}

/// Moves tokens from a user-owned account into a program vault.
/// `authority` is the user and must have signed the transaction.
pub fn transfer_from_user_to_pool_vault<'info>(
    authority: AccountInfo<'info>,
    from: AccountInfo<'info>,
    to_vault: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    amount: u64,
    mint_decimals: u8,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token_interface::transfer_checked(
        CpiContext::new(
            token_program,
            TransferChecked {
                from,
                to: to_vault,
                authority,
                mint,
            },
        ),
        amount,
        mint_decimals,
    )
}

/// Moves tokens out of a program vault, signing as the vault authority PDA.
#[allow(clippy::too_many_arguments)]
pub fn transfer_from_pool_vault_to_user<'info>(
    authority: AccountInfo<'info>,
    from_vault: AccountInfo<'info>,
    to: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    amount: u64,
    mint_decimals: u8,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            token_program,
            TransferChecked {
                from: from_vault,
                to,
                authority,
                mint,
            },
            signer_seeds,
        ),
        amount,
        mint_decimals,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::solana_program::program_pack::Pack;

    #[test]
    fn transfer_fee_extension_is_refused() {
        assert!(reject_fee_extensions(&[]).is_ok());
        assert!(reject_fee_extensions(&[ExtensionType::MetadataPointer]).is_ok());
        assert!(reject_fee_extensions(&[
            ExtensionType::MetadataPointer,
            ExtensionType::TransferFeeConfig
        ])
        .is_err());
    }

    #[test]
    fn plain_token_2022_mint_is_accepted() {
        let key = Pubkey::new_unique();
        let owner = spl_token_2022::ID;
        let mut lamports = 1_000_000;
        let mut data = vec![0u8; spl_token_2022::state::Mint::LEN];
        spl_token_2022::state::Mint::pack(
            spl_token_2022::state::Mint {
                decimals: 6,
                is_initialized: true,
                ..Default::default()
            },
            &mut data,
        )
        .unwrap();
        let mint = AccountInfo::new(
            &key,
            false,
            false,
            &mut lamports,
            &mut data,
            &owner,
            false,
            0,
        );

        assert!(ensure_supported_mint(&mint).is_ok());
    }
}
