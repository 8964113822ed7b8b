//! Definitions of CLI arguments and commands for the contract scripts

use std::path::PathBuf;

use alloy::providers::DynProvider;
use clap::{Args, Parser, Subcommand};

use crate::{
    commands::{create_deal, deal_status, deploy},
    constants::{
        CHAIN_ID_ENV_VAR, DEFAULT_ARTIFACTS_DIR, DEFAULT_CONTRACT_NAME, DEFAULT_RPC_URL,
        NUM_DEPLOY_CONFIRMATIONS, PRIVATE_KEY_ENV_VAR, RPC_URL_ENV_VAR,
    },
    errors::ScriptError,
};

/// Deploy the `DealClient` contract and make storage deals through it
#[derive(Parser)]
#[command(version)]
pub struct Cli {
    /// Private key of the transaction signer, in hex
    #[arg(short, long, env = PRIVATE_KEY_ENV_VAR, hide_env_values = true)]
    pub priv_key: Option<String>,

    /// Network RPC URL
    #[arg(short, long, env = RPC_URL_ENV_VAR, default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Chain ID to sign transactions for, fetched from the node when omitted
    #[arg(long, env = CHAIN_ID_ENV_VAR)]
    pub chain_id: Option<u64>,

    /// The script to run
    #[command(subcommand)]
    pub command: Command,
}

/// The available scripts
#[derive(Subcommand)]
pub enum Command {
    /// Deploy a compiled contract and print its address
    Deploy(DeployArgs),
    /// Propose a storage deal through a deployed `DealClient`
    CreateDeal(CreateDealArgs),
    /// Print the deal status of a piece
    DealStatus(DealStatusArgs),
}

impl Command {
    /// Run the command using the given signing client
    pub async fn run(self, client: DynProvider) -> Result<(), ScriptError> {
        match self {
            Command::Deploy(args) => deploy(args, client).await,
            Command::CreateDeal(args) => create_deal(args, client).await,
            Command::DealStatus(args) => deal_status(args, client).await,
        }
    }
}

/// Deploy a contract from its Hardhat compilation artifact.
///
/// The contract is deployed without constructor arguments.
#[derive(Args)]
pub struct DeployArgs {
    /// Name of the contract to deploy, either bare or fully qualified
    /// as `<source path>:<contract name>`
    #[arg(short, long, default_value = DEFAULT_CONTRACT_NAME)]
    pub contract_name: String,

    /// Directory containing the Hardhat compilation artifacts
    #[arg(short, long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: PathBuf,

    /// Number of confirmations to wait for the deployment transaction
    #[arg(
        long,
        default_value_t = NUM_DEPLOY_CONFIRMATIONS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub confirmations: u64,

    /// Gas limit of the deployment transaction, estimated by the node if unset
    #[arg(long)]
    pub gas_limit: Option<u64>,

    /// Path to a JSON file in which to record the deployed address
    #[arg(short, long)]
    pub deployments_path: Option<PathBuf>,
}

/// Propose a storage deal
#[derive(Args)]
pub struct CreateDealArgs {
    /// The `DealClient` contract address
    #[arg(long)]
    pub contract: String,

    /// The piece CID
    #[arg(long)]
    pub piece_cid: String,

    /// The piece size in bytes
    #[arg(long)]
    pub piece_size: u64,

    /// Whether this is a verified deal
    #[arg(long)]
    pub verified: bool,

    /// The payload CID, used as the deal label
    #[arg(long)]
    pub payload_cid: String,

    /// The epoch at which the deal starts
    #[arg(long)]
    pub start_epoch: i64,

    /// The epoch at which the deal ends
    #[arg(long)]
    pub end_epoch: i64,

    /// Where the CAR file can be downloaded
    #[arg(long)]
    pub location_ref: String,

    /// The size of the CAR file in bytes
    #[arg(long)]
    pub car_size: u64,
}

/// Check the status of a deal
#[derive(Args)]
pub struct DealStatusArgs {
    /// The `DealClient` contract address
    #[arg(long)]
    pub contract: String,

    /// The piece CID
    #[arg(long)]
    pub piece_cid: String,
}
