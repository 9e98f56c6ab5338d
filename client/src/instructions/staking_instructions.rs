use anchor_client::{Client, Cluster, Program};
use anyhow::Result;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, signature::Keypair, system_program};
use std::rc::Rc;

use staking_rewards::accounts as staking_accounts;
use staking_rewards::instruction as staking_instructions;

use crate::instructions::utils::{
    get_authority_address, get_global_config_address, get_reward_pool_address,
    get_reward_vault_address, get_staking_vault_address, get_user_stake_info_address,
    get_user_token_address,
};

use super::super::{read_keypair_file, ClientConfig};

fn program_for(config: &ClientConfig, keypair_path: &str) -> Result<Program<Rc<Keypair>>> {
    let signer = read_keypair_file(keypair_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(signer));
    Ok(client.program(config.staking_rewards_program)?)
}

/// Built and paid by the admin key.
pub fn initialize_instr(
    config: &ClientConfig,
    owner: Pubkey,
    rewards_distribution: Pubkey,
    rewards_duration: u64,
    minimum_stake_time: u64,
) -> Result<Vec<Instruction>> {
    let program = program_for(config, &config.admin_path)?;

    let instructions = program
        .request()
        .accounts(staking_accounts::Initialize {
            payer: program.payer(),
            authority: get_authority_address(&program.id()),
            global_config: get_global_config_address(&program.id()),
            reward_pool: get_reward_pool_address(&program.id()),
            staking_mint: config.staking_mint,
            reward_mint: config.reward_mint,
            staking_vault: get_staking_vault_address(&program.id()),
            reward_vault: get_reward_vault_address(&program.id()),
            token_program: spl_token::id(),
            system_program: system_program::id(),
        })
        .args(staking_instructions::Initialize {
            owner,
            rewards_distribution,
            rewards_duration,
            minimum_stake_time,
        })
        .instructions()?;
    Ok(instructions)
}

pub fn stake_instr(config: &ClientConfig, amount: u64) -> Result<Vec<Instruction>> {
    let program = program_for(config, &config.payer_path)?;
    let user = program.payer();

    let instructions = program
        .request()
        .accounts(staking_accounts::Stake {
            user,
            global_config: get_global_config_address(&program.id()),
            reward_pool: get_reward_pool_address(&program.id()),
            user_stake_info: get_user_stake_info_address(&user, &program.id()),
            staking_mint: config.staking_mint,
            user_staking_token: get_user_token_address(&user, &config.staking_mint),
            staking_vault: get_staking_vault_address(&program.id()),
            token_program: spl_token::id(),
            system_program: system_program::id(),
        })
        .args(staking_instructions::Stake { amount })
        .instructions()?;
    Ok(instructions)
}

pub fn withdraw_instr(config: &ClientConfig, amount: u64) -> Result<Vec<Instruction>> {
    let program = program_for(config, &config.payer_path)?;
    let user = program.payer();

    let instructions = program
        .request()
        .accounts(staking_accounts::Withdraw {
            user,
            global_config: get_global_config_address(&program.id()),
            reward_pool: get_reward_pool_address(&program.id()),
            user_stake_info: get_user_stake_info_address(&user, &program.id()),
            authority: get_authority_address(&program.id()),
            staking_mint: config.staking_mint,
            user_staking_token: get_user_token_address(&user, &config.staking_mint),
            staking_vault: get_staking_vault_address(&program.id()),
            token_program: spl_token::id(),
        })
        .args(staking_instructions::Withdraw { amount })
        .instructions()?;
    Ok(instructions)
}

pub fn get_reward_instr(config: &ClientConfig) -> Result<Vec<Instruction>> {
    let program = program_for(config, &config.payer_path)?;
    let user = program.payer();

    let instructions = program
        .request()
        .accounts(staking_accounts::GetReward {
            user,
            global_config: get_global_config_address(&program.id()),
            reward_pool: get_reward_pool_address(&program.id()),
            user_stake_info: get_user_stake_info_address(&user, &program.id()),
            authority: get_authority_address(&program.id()),
            reward_mint: config.reward_mint,
            reward_vault: get_reward_vault_address(&program.id()),
            user_reward_token: get_user_token_address(&user, &config.reward_mint),
            token_program: spl_token::id(),
            associated_token_program: spl_associated_token_account::id(),
            system_program: system_program::id(),
        })
        .args(staking_instructions::GetReward {})
        .instructions()?;
    Ok(instructions)
}

pub fn exit_instr(config: &ClientConfig) -> Result<Vec<Instruction>> {
    let program = program_for(config, &config.payer_path)?;
    let user = program.payer();

    let instructions = program
        .request()
        .accounts(staking_accounts::Exit {
            user,
            global_config: get_global_config_address(&program.id()),
            reward_pool: get_reward_pool_address(&program.id()),
            user_stake_info: get_user_stake_info_address(&user, &program.id()),
            authority: get_authority_address(&program.id()),
            staking_mint: config.staking_mint,
            user_staking_token: get_user_token_address(&user, &config.staking_mint),
            staking_vault: get_staking_vault_address(&program.id()),
            reward_mint: config.reward_mint,
            reward_vault: get_reward_vault_address(&program.id()),
            user_reward_token: get_user_token_address(&user, &config.reward_mint),
            token_program: spl_token::id(),
            associated_token_program: spl_associated_token_account::id(),
            system_program: system_program::id(),
        })
        .args(staking_instructions::Exit {})
        .instructions()?;
    Ok(instructions)
}

/// With `deposit`, the reward is first moved from the payer's reward ATA into
/// the reward vault, in the same transaction as the notification.
pub fn notify_reward_amount_instr(
    config: &ClientConfig,
    reward: u64,
    deposit: bool,
    reward_decimals: u8,
) -> Result<Vec<Instruction>> {
    let program = program_for(config, &config.payer_path)?;
    let payer = program.payer();
    let reward_vault = get_reward_vault_address(&program.id());

    let mut instructions = Vec::new();
    if deposit {
        instructions.push(spl_token::instruction::transfer_checked(
            &spl_token::id(),
            &get_user_token_address(&payer, &config.reward_mint),
            &config.reward_mint,
            &reward_vault,
            &payer,
            &[],
            reward,
            reward_decimals,
        )?);
    }

    let notify = program
        .request()
        .accounts(staking_accounts::NotifyRewardAmount {
            rewards_distribution: payer,
            global_config: get_global_config_address(&program.id()),
            reward_pool: get_reward_pool_address(&program.id()),
            reward_vault,
            token_program: spl_token::id(),
        })
        .args(staking_instructions::NotifyRewardAmount { reward })
        .instructions()?;
    instructions.extend(notify);
    Ok(instructions)
}

/// Which owner-only reward-period parameter to change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolParam {
    PeriodFinish(u64),
    RewardsDuration(u64),
    MinimumStakeTime(u64),
}

pub fn update_pool_params_instr(config: &ClientConfig, param: PoolParam) -> Result<Vec<Instruction>> {
    let program = program_for(config, &config.payer_path)?;

    let request = program.request().accounts(staking_accounts::UpdatePoolParams {
        owner: program.payer(),
        global_config: get_global_config_address(&program.id()),
        reward_pool: get_reward_pool_address(&program.id()),
    });
    let instructions = match param {
        PoolParam::PeriodFinish(timestamp) => request
            .args(staking_instructions::UpdatePeriodFinish { timestamp })
            .instructions()?,
        PoolParam::RewardsDuration(duration) => request
            .args(staking_instructions::SetRewardsDuration { duration })
            .instructions()?,
        PoolParam::MinimumStakeTime(value) => request
            .args(staking_instructions::SetMinimumStakeTime { value })
            .instructions()?,
    };
    Ok(instructions)
}

/// Owner-side switches stored in the global config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigUpdate {
    Paused(bool),
    RewardsDistribution(Pubkey),
    NominateOwner(Pubkey),
    AcceptOwnership,
}

pub fn update_config_instr(config: &ClientConfig, update: ConfigUpdate) -> Result<Vec<Instruction>> {
    let program = program_for(config, &config.payer_path)?;

    let request = program.request().accounts(staking_accounts::UpdateConfig {
        signer: program.payer(),
        global_config: get_global_config_address(&program.id()),
    });
    let instructions = match update {
        ConfigUpdate::Paused(paused) => request
            .args(staking_instructions::SetPaused { paused })
            .instructions()?,
        ConfigUpdate::RewardsDistribution(rewards_distribution) => request
            .args(staking_instructions::SetRewardsDistribution {
                rewards_distribution,
            })
            .instructions()?,
        ConfigUpdate::NominateOwner(candidate) => request
            .args(staking_instructions::NominateOwner { candidate })
            .instructions()?,
        ConfigUpdate::AcceptOwnership => request
            .args(staking_instructions::AcceptOwnership {})
            .instructions()?,
    };
    Ok(instructions)
}

pub fn recover_tokens_instr(
    config: &ClientConfig,
    token_mint: Pubkey,
    source: Pubkey,
    amount: u64,
) -> Result<Vec<Instruction>> {
    let program = program_for(config, &config.payer_path)?;
    let owner = program.payer();

    let instructions = program
        .request()
        .accounts(staking_accounts::RecoverTokens {
            owner,
            global_config: get_global_config_address(&program.id()),
            reward_pool: get_reward_pool_address(&program.id()),
            authority: get_authority_address(&program.id()),
            token_mint,
            source,
            owner_token: get_user_token_address(&owner, &token_mint),
            token_program: spl_token::id(),
            associated_token_program: spl_associated_token_account::id(),
            system_program: system_program::id(),
        })
        .args(staking_instructions::RecoverTokens { amount })
        .instructions()?;
    Ok(instructions)
}
