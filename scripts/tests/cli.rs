//! Tests of the compiled scripts binary. None of these need a running node.

use std::{
    fs,
    net::TcpListener,
    path::Path,
    process::{Command, Output},
};

use eyre::Result;
use serde_json::json;
use tempfile::TempDir;

/// The first default account of a local development node
const DEVNET_PKEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Runs the scripts binary with the devnet key and the given RPC URL and arguments
fn run_scripts(rpc_url: &str, args: &[&str]) -> Result<Output> {
    let key_args = ["--priv-key", DEVNET_PKEY, "--rpc-url", rpc_url];
    run_scripts_without_key(&[&key_args[..], args].concat())
}

/// Runs the scripts binary with only the given arguments and a clean environment
fn run_scripts_without_key(args: &[&str]) -> Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_deal-client-scripts"))
        .env_remove("PRIVATE_KEY")
        .env_remove("RPC_URL")
        .env_remove("CHAIN_ID")
        .args(args)
        .output()?;

    Ok(output)
}

/// An RPC URL on which nothing is listening
fn unreachable_rpc_url() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    drop(listener);

    Ok(format!("http://127.0.0.1:{port}"))
}

/// Writes a deployable `DealClient` artifact in the Hardhat layout
fn write_deal_client_artifact(artifacts: &Path) -> Result<()> {
    let dir = artifacts.join("contracts/DealClient.sol");
    fs::create_dir_all(&dir)?;

    let artifact = json!({
        "_format": "hh-sol-artifact-1",
        "contractName": "DealClient",
        "sourceName": "contracts/DealClient.sol",
        "abi": [{ "type": "constructor", "stateMutability": "nonpayable", "inputs": [] }],
        "bytecode": "0x6080604052348015600f57600080fd5b50603f80601d6000396000f3fe",
        "deployedBytecode": "0x",
        "linkReferences": {},
        "deployedLinkReferences": {}
    });
    fs::write(dir.join("DealClient.json"), artifact.to_string())?;

    Ok(())
}

#[test]
fn test_missing_artifact_exits_with_failure() -> Result<()> {
    let artifacts = TempDir::new()?;
    let artifacts_path = artifacts.path().to_string_lossy().to_string();

    let output = run_scripts(
        &unreachable_rpc_url()?,
        &["deploy", "--artifacts", &artifacts_path],
    )?;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("no artifact for contract DealClient"), "{stderr}");

    Ok(())
}

#[test]
fn test_unreachable_node_exits_with_failure() -> Result<()> {
    let artifacts = TempDir::new()?;
    write_deal_client_artifact(artifacts.path())?;
    let artifacts_path = artifacts.path().to_string_lossy().to_string();

    let output = run_scripts(
        &unreachable_rpc_url()?,
        &["deploy", "--artifacts", &artifacts_path],
    )?;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("error deploying contract"), "{stderr}");

    Ok(())
}

#[test]
fn test_invalid_contract_address_exits_with_failure() -> Result<()> {
    let output = run_scripts(
        &unreachable_rpc_url()?,
        &["deal-status", "--contract", "0x1234", "--piece-cid", "baga6ea4seaq"],
    )?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("contract is not an ETH address"), "{stderr}");

    Ok(())
}

#[test]
fn test_missing_private_key_exits_with_failure() -> Result<()> {
    let artifacts = TempDir::new()?;
    write_deal_client_artifact(artifacts.path())?;
    let artifacts_path = artifacts.path().to_string_lossy().to_string();
    let rpc_url = unreachable_rpc_url()?;

    let output = run_scripts_without_key(&[
        "--rpc-url",
        &rpc_url,
        "deploy",
        "--artifacts",
        &artifacts_path,
    ])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("no private key configured"), "{stderr}");

    Ok(())
}

#[test]
fn test_zero_confirmations_exits_with_failure() -> Result<()> {
    let output = run_scripts(&unreachable_rpc_url()?, &["deploy", "--confirmations", "0"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("--confirmations"), "{stderr}");

    Ok(())
}

#[test]
fn test_help_exits_successfully() -> Result<()> {
    let output = run_scripts_without_key(&["--help"])?;

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8(output.stdout)?.contains("deploy"));

    Ok(())
}
