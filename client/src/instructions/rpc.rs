use anyhow::{format_err, Result};
use solana_client::{rpc_client::RpcClient, rpc_config::RpcSendTransactionConfig};
use solana_sdk::{
    account::{from_account, Account},
    clock::Clock,
    commitment_config::CommitmentConfig,
    pubkey::Pubkey,
    signature::Signature,
    sysvar,
    transaction::Transaction,
};

pub fn send_txn(client: &RpcClient, txn: &Transaction, wait_confirm: bool) -> Result<Signature> {
    Ok(client.send_and_confirm_transaction_with_spinner_and_config(
        txn,
        if wait_confirm {
            CommitmentConfig::confirmed()
        } else {
            CommitmentConfig::processed()
        },
        RpcSendTransactionConfig {
            skip_preflight: true,
            ..RpcSendTransactionConfig::default()
        },
    )?)
}

/// Fetches an account that must exist.
pub fn get_account(client: &RpcClient, address: &Pubkey) -> Result<Account> {
    client
        .get_account_with_commitment(address, CommitmentConfig::confirmed())?
        .value
        .ok_or_else(|| format_err!("account {} not found", address))
}

/// Fetches an account that may not have been created yet.
pub fn get_optional_account(client: &RpcClient, address: &Pubkey) -> Result<Option<Account>> {
    Ok(client
        .get_account_with_commitment(address, CommitmentConfig::confirmed())?
        .value)
}

/// `Clock` sysvar time at the commitment transactions are confirmed with, in seconds.
pub fn get_cluster_time(client: &RpcClient) -> Result<u64> {
    let account = get_account(client, &sysvar::clock::id())?;
    let clock: Clock =
        from_account(&account).ok_or_else(|| format_err!("failed to decode the clock sysvar"))?;
    u64::try_from(clock.unix_timestamp)
        .map_err(|_| format_err!("negative cluster time {}", clock.unix_timestamp))
}
