//! Implementations of the various contract scripts

use std::io;

use alloy::providers::DynProvider;
use tracing::info;

use crate::{
    cli::{CreateDealArgs, DealStatusArgs, DeployArgs},
    constants::FULLY_QUALIFIED_NAME_SEPARATOR,
    deal::{build_deal_request, parse_cid, parse_contract_address, DealStatus},
    deploy::{run_deploy, ArtifactResolver},
    errors::ScriptError,
    solidity::DealClient,
    utils::write_deployed_address,
};

/// Deploys the contract and prints its address to stdout
pub async fn deploy(args: DeployArgs, client: DynProvider) -> Result<(), ScriptError> {
    info!("deploying {}", args.contract_name);

    let resolver = ArtifactResolver::new(args.artifacts, client, args.confirmations)
        .with_gas_limit(args.gas_limit);
    let contract = run_deploy(&resolver, &args.contract_name, &mut io::stdout()).await?;

    info!(
        "{} deployed at {:#x} in transaction {}",
        args.contract_name, contract.address, contract.transaction_hash
    );

    if let Some(deployments_path) = args.deployments_path {
        // Entries are keyed by the bare contract name
        let contract_key = args
            .contract_name
            .rsplit(FULLY_QUALIFIED_NAME_SEPARATOR)
            .next()
            .unwrap_or(&args.contract_name);
        write_deployed_address(&deployments_path, contract_key, contract.address)?;
    }

    Ok(())
}

/// Submits a deal proposal and prints the transaction hash
pub async fn create_deal(args: CreateDealArgs, client: DynProvider) -> Result<(), ScriptError> {
    let contract_address = parse_contract_address(&args.contract)?;
    let deal_request = build_deal_request(&args)?;
    let deal_client = DealClient::new(contract_address, client);

    let receipt = deal_client
        .makeDealProposal(deal_request)
        .send()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        .get_receipt()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    if !receipt.status() {
        return Err(ScriptError::ContractInteraction(format!(
            "deal proposal {} reverted",
            receipt.transaction_hash
        )));
    }

    println!("{}", receipt.transaction_hash);
    Ok(())
}

/// Prints the deal status of a piece
pub async fn deal_status(args: DealStatusArgs, client: DynProvider) -> Result<(), ScriptError> {
    let contract_address = parse_contract_address(&args.contract)?;
    let piece_cid = parse_cid(&args.piece_cid)?;
    let deal_client = DealClient::new(contract_address, client);

    let status = deal_client
        .pieceStatus(piece_cid.to_bytes().into())
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    println!("{}", DealStatus::try_from(status)?);
    Ok(())
}
