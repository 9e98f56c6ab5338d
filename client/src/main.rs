use anyhow::{format_err, Result};
use clap::Parser;
use colorful::{Color, Colorful};
use configparser::ini::Ini;
use serde::Serialize;
use solana_client::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    program_pack::Pack,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use std::str::FromStr;

use staking_rewards::accounting::PeriodPhase;
use staking_rewards::states::{GlobalConfig, RewardPool, UserStakeInfo};

mod instructions;
use instructions::rpc::*;
use instructions::staking_instructions::*;
use instructions::utils::*;

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    http_url: String,
    ws_url: String,
    payer_path: String,
    admin_path: String,
    staking_rewards_program: Pubkey,
    staking_mint: Pubkey,
    reward_mint: Pubkey,
}

fn required(config: &Ini, key: &str) -> Result<String> {
    match config.get("Global", key) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(format_err!("{} must not be empty", key)),
    }
}

fn required_pubkey(config: &Ini, key: &str) -> Result<Pubkey> {
    let value = required(config, key)?;
    Pubkey::from_str(&value).map_err(|e| format_err!("{} is not a valid pubkey: {}", key, e))
}

fn parse_cfg(config: &Ini) -> Result<ClientConfig> {
    Ok(ClientConfig {
        http_url: required(config, "http_url")?,
        ws_url: required(config, "ws_url")?,
        payer_path: required(config, "payer_path")?,
        admin_path: required(config, "admin_path")?,
        staking_rewards_program: required_pubkey(config, "staking_rewards_program")?,
        staking_mint: required_pubkey(config, "staking_mint")?,
        reward_mint: required_pubkey(config, "reward_mint")?,
    })
}

fn load_cfg(client_config: &str) -> Result<ClientConfig> {
    let mut config = Ini::new();
    config
        .load(client_config)
        .map_err(|e| format_err!("failed to load {}: {}", client_config, e))?;
    parse_cfg(&config)
}

fn read_keypair_file(s: &str) -> Result<Keypair> {
    solana_sdk::signature::read_keypair_file(s)
        .map_err(|_| format_err!("failed to read keypair from {}", s))
}

#[derive(Debug, Parser)]
pub struct Opts {
    #[clap(subcommand)]
    pub command: StakingCommands,
}

#[derive(Debug, Parser)]
pub enum StakingCommands {
    Initialize {
        #[arg(long)]
        owner: Pubkey,
        #[arg(long)]
        rewards_distribution: Pubkey,
        #[arg(long, default_value_t = staking_rewards::DEFAULT_REWARDS_DURATION)]
        rewards_duration: u64,
        #[arg(long, default_value_t = 0)]
        minimum_stake_time: u64,
    },
    Stake {
        #[arg(long)]
        amount: u64,
    },
    Withdraw {
        #[arg(long)]
        amount: u64,
    },
    GetReward {},
    Exit {},
    NotifyRewardAmount {
        #[arg(long)]
        reward: u64,
        /// Move the reward from the payer's token account into the vault first.
        #[arg(long)]
        deposit: bool,
    },
    UpdatePeriodFinish {
        #[arg(long)]
        timestamp: u64,
    },
    SetRewardsDuration {
        #[arg(long)]
        duration: u64,
    },
    SetMinimumStakeTime {
        #[arg(long)]
        value: u64,
    },
    SetPaused {
        #[arg(long)]
        paused: bool,
    },
    SetRewardsDistribution {
        #[arg(long)]
        rewards_distribution: Pubkey,
    },
    NominateOwner {
        #[arg(long)]
        candidate: Pubkey,
    },
    AcceptOwnership {},
    RecoverTokens {
        #[arg(long)]
        token_mint: Pubkey,
        #[arg(long)]
        source: Pubkey,
        #[arg(long)]
        amount: u64,
    },
    /// Prints pool state and, optionally, one staker's position.
    View {
        #[arg(long)]
        user: Option<Pubkey>,
        #[arg(long)]
        json: bool,
    },
}

fn send_instructions(
    rpc_client: &RpcClient,
    instructions: &[Instruction],
    signer: &Keypair,
) -> Result<()> {
    let recent_hash = rpc_client.get_latest_blockhash()?;
    let txn = Transaction::new_signed_with_payer(
        instructions,
        Some(&signer.pubkey()),
        &[signer],
        recent_hash,
    );
    let signature = send_txn(rpc_client, &txn, true)?;
    println!("{}", signature);
    Ok(())
}

fn phase_label(phase: PeriodPhase) -> &'static str {
    match phase {
        PeriodPhase::Idle => "idle",
        PeriodPhase::Funded => "funded",
        PeriodPhase::Expired => "expired",
    }
}

#[derive(Debug, Serialize)]
pub struct PositionReport {
    user: String,
    balance: u64,
    earned: u64,
    remaining_lock_time: u64,
    total_reward_paid: u64,
}

#[derive(Debug, Serialize)]
pub struct ViewReport {
    owner: String,
    rewards_distribution: String,
    paused: bool,
    total_staked: u64,
    reward_per_unit: String,
    reward_rate: String,
    last_time_reward_applicable: u64,
    reward_for_duration: u64,
    remaining_period: u64,
    rewards_duration: u64,
    minimum_stake_time: u64,
    phase: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<PositionReport>,
}

/// The RPC node can report a time behind the pool's last checkpoint; never
/// evaluate the pool before it.
fn view_time(now: u64, pool: &RewardPool) -> u64 {
    now.max(pool.last_update_time)
}

fn build_report(
    global_config: &GlobalConfig,
    pool: &RewardPool,
    position: Option<(Pubkey, UserStakeInfo)>,
    now: u64,
) -> Result<ViewReport> {
    let now = view_time(now, pool);
    let pool_view = pool.view(now)?;

    let position = match position {
        Some((user, entry)) => {
            let position = pool.position(&entry, now)?;
            Some(PositionReport {
                user: user.to_string(),
                balance: position.balance,
                earned: position.earned,
                remaining_lock_time: position.remaining_lock_time,
                total_reward_paid: position.total_reward_paid,
            })
        }
        None => None,
    };

    Ok(ViewReport {
        owner: global_config.owner.to_string(),
        rewards_distribution: global_config.rewards_distribution.to_string(),
        paused: global_config.paused,
        total_staked: pool.total_supply(),
        reward_per_unit: pool_view.reward_per_unit.raw().to_string(),
        reward_rate: pool.reward_rate.to_string(),
        last_time_reward_applicable: pool_view.last_time_reward_applicable,
        reward_for_duration: pool_view.reward_for_duration,
        remaining_period: pool_view.remaining_period,
        rewards_duration: pool.rewards_duration,
        minimum_stake_time: pool.minimum_stake_time,
        phase: phase_label(pool_view.phase),
        position,
    })
}

fn view(rpc_client: &RpcClient, config: &ClientConfig, user: Option<Pubkey>, json: bool) -> Result<()> {
    let program_id = config.staking_rewards_program;
    let global_config: GlobalConfig = deserialize_anchor_account(&get_account(
        rpc_client,
        &get_global_config_address(&program_id),
    )?)?;
    let pool: RewardPool = deserialize_anchor_account(&get_account(
        rpc_client,
        &get_reward_pool_address(&program_id),
    )?)?;

    let position = match user {
        Some(user) => {
            let entry = match get_optional_account(
                rpc_client,
                &get_user_stake_info_address(&user, &program_id),
            )? {
                Some(account) => deserialize_anchor_account::<UserStakeInfo>(&account)?,
                None => UserStakeInfo::default(),
            };
            Some((user, entry))
        }
        None => None,
    };
    let now = get_cluster_time(rpc_client)?;
    let report = build_report(&global_config, &pool, position, now)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "reward pool".color(Color::Cyan).bold());
    println!("  owner                 {}", report.owner);
    println!("  rewards distribution  {}", report.rewards_distribution);
    let paused = if report.paused {
        "yes".color(Color::Red)
    } else {
        "no".color(Color::Green)
    };
    println!("  paused                {}", paused);
    println!("  phase                 {}", report.phase);
    println!("  total staked          {}", report.total_staked);
    println!("  reward per unit       {}", report.reward_per_unit);
    println!("  reward for duration   {}", report.reward_for_duration);
    println!("  remaining period      {}s", report.remaining_period);
    println!("  minimum stake time    {}s", report.minimum_stake_time);
    if let Some(position) = report.position {
        println!("{}", "position".color(Color::Cyan).bold());
        println!("  user                  {}", position.user);
        println!("  balance               {}", position.balance);
        println!(
            "  earned                {}",
            position.earned.to_string().color(Color::Yellow)
        );
        println!("  remaining lock time   {}s", position.remaining_lock_time);
        println!("  total reward paid     {}", position.total_reward_paid);
    }
    Ok(())
}

fn main() -> Result<()> {
    let client_config = "client_config.ini";
    let pool_config = load_cfg(client_config)?;
    // cluster params.
    let payer = read_keypair_file(&pool_config.payer_path)?;
    // solana rpc client
    let rpc_client =
        RpcClient::new_with_commitment(pool_config.http_url.to_string(), CommitmentConfig::confirmed());

    let opts = Opts::parse();
    match opts.command {
        StakingCommands::Initialize {
            owner,
            rewards_distribution,
            rewards_duration,
            minimum_stake_time,
        } => {
            let admin = read_keypair_file(&pool_config.admin_path)?;
            let instructions = initialize_instr(
                &pool_config,
                owner,
                rewards_distribution,
                rewards_duration,
                minimum_stake_time,
            )?;
            send_instructions(&rpc_client, &instructions, &admin)?;
        }
        StakingCommands::Stake { amount } => {
            let instructions = stake_instr(&pool_config, amount)?;
            send_instructions(&rpc_client, &instructions, &payer)?;
        }
        StakingCommands::Withdraw { amount } => {
            let instructions = withdraw_instr(&pool_config, amount)?;
            send_instructions(&rpc_client, &instructions, &payer)?;
        }
        StakingCommands::GetReward {} => {
            let instructions = get_reward_instr(&pool_config)?;
            send_instructions(&rpc_client, &instructions, &payer)?;
        }
        StakingCommands::Exit {} => {
            let instructions = exit_instr(&pool_config)?;
            send_instructions(&rpc_client, &instructions, &payer)?;
        }
        StakingCommands::NotifyRewardAmount { reward, deposit } => {
            let mint_account = get_account(&rpc_client, &pool_config.reward_mint)?;
            let mint = spl_token::state::Mint::unpack(&mint_account.data)?;
            let instructions =
                notify_reward_amount_instr(&pool_config, reward, deposit, mint.decimals)?;
            send_instructions(&rpc_client, &instructions, &payer)?;
        }
        StakingCommands::UpdatePeriodFinish { timestamp } => {
            let instructions =
                update_pool_params_instr(&pool_config, PoolParam::PeriodFinish(timestamp))?;
            send_instructions(&rpc_client, &instructions, &payer)?;
        }
        StakingCommands::SetRewardsDuration { duration } => {
            let instructions =
                update_pool_params_instr(&pool_config, PoolParam::RewardsDuration(duration))?;
            send_instructions(&rpc_client, &instructions, &payer)?;
        }
        StakingCommands::SetMinimumStakeTime { value } => {
            let instructions =
                update_pool_params_instr(&pool_config, PoolParam::MinimumStakeTime(value))?;
            send_instructions(&rpc_client, &instructions, &payer)?;
        }
        StakingCommands::SetPaused { paused } => {
            let instructions = update_config_instr(&pool_config, ConfigUpdate::Paused(paused))?;
            send_instructions(&rpc_client, &instructions, &payer)?;
        }
        StakingCommands::SetRewardsDistribution {
            rewards_distribution,
        } => {
            let instructions = update_config_instr(
                &pool_config,
                ConfigUpdate::RewardsDistribution(rewards_distribution),
            )?;
            send_instructions(&rpc_client, &instructions, &payer)?;
        }
        StakingCommands::NominateOwner { candidate } => {
            let instructions =
                update_config_instr(&pool_config, ConfigUpdate::NominateOwner(candidate))?;
            send_instructions(&rpc_client, &instructions, &payer)?;
        }
        StakingCommands::AcceptOwnership {} => {
            let instructions = update_config_instr(&pool_config, ConfigUpdate::AcceptOwnership)?;
            send_instructions(&rpc_client, &instructions, &payer)?;
        }
        StakingCommands::RecoverTokens {
            token_mint,
            source,
            amount,
        } => {
            let instructions = recover_tokens_instr(&pool_config, token_mint, source, amount)?;
            send_instructions(&rpc_client, &instructions, &payer)?;
        }
        StakingCommands::View { user, json } => {
            view(&rpc_client, &pool_config, user, json)?;
        }
    }
    Ok(())
}
