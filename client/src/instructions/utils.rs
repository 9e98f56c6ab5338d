use anchor_lang::AccountDeserialize;
use anyhow::Result;
use solana_sdk::{account::Account, pubkey::Pubkey};
use staking_rewards::states::{GLOBAL_CONFIG_SEED, REWARD_POOL_SEED, USER_STAKE_INFO_SEED};

pub fn deserialize_anchor_account<T: AccountDeserialize>(account: &Account) -> Result<T> {
    let mut data: &[u8] = &account.data;
    T::try_deserialize(&mut data).map_err(Into::into)
}

pub fn get_global_config_address(program_id: &Pubkey) -> Pubkey {
    let (global_config, _bump) =
        Pubkey::find_program_address(&[GLOBAL_CONFIG_SEED.as_bytes()], program_id);
    global_config
}

pub fn get_reward_pool_address(program_id: &Pubkey) -> Pubkey {
    let (reward_pool, _bump) =
        Pubkey::find_program_address(&[REWARD_POOL_SEED.as_bytes()], program_id);
    reward_pool
}

pub fn get_authority_address(program_id: &Pubkey) -> Pubkey {
    let (authority, _bump) =
        Pubkey::find_program_address(&[staking_rewards::AUTH_SEED.as_bytes()], program_id);
    authority
}

pub fn get_staking_vault_address(program_id: &Pubkey) -> Pubkey {
    let (staking_vault, _bump) = Pubkey::find_program_address(
        &[staking_rewards::STAKING_VAULT_SEED.as_bytes()],
        program_id,
    );
    staking_vault
}

pub fn get_reward_vault_address(program_id: &Pubkey) -> Pubkey {
    let (reward_vault, _bump) = Pubkey::find_program_address(
        &[staking_rewards::REWARD_VAULT_SEED.as_bytes()],
        program_id,
    );
    reward_vault
}

pub fn get_user_stake_info_address(user: &Pubkey, program_id: &Pubkey) -> Pubkey {
    let (user_stake_info, _bump) = Pubkey::find_program_address(
        &[USER_STAKE_INFO_SEED.as_bytes(), user.as_ref()],
        program_id,
    );
    user_stake_info
}

/// Associated token account of `owner` for `mint` under the classic token program.
pub fn get_user_token_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    spl_associated_token_account::get_associated_token_address_with_program_id(
        owner,
        mint,
        &spl_token::id(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_addresses_are_distinct_and_stable() {
        let program_id = staking_rewards::id();
        let addresses = [
            get_global_config_address(&program_id),
            get_reward_pool_address(&program_id),
            get_authority_address(&program_id),
            get_staking_vault_address(&program_id),
            get_reward_vault_address(&program_id),
        ];

        for (i, a) in addresses.iter().enumerate() {
            for b in &addresses[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(addresses[0], get_global_config_address(&program_id));
    }

    #[test]
    fn user_entries_are_per_user() {
        let program_id = staking_rewards::id();
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();

        assert_ne!(
            get_user_stake_info_address(&alice, &program_id),
            get_user_stake_info_address(&bob, &program_id)
        );
    }
}
