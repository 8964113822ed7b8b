//! Utilities for the contract scripts.

use std::{fs, path::Path, str::FromStr};

use alloy::{
    primitives::Address,
    providers::{DynProvider, ProviderBuilder},
    signers::{local::PrivateKeySigner, Signer},
    transports::http::reqwest::Url,
};
use serde_json::{Map, Value};

use crate::{constants::PRIVATE_KEY_ENV_VAR, errors::ScriptError};

/// Sets up the client with which to send transactions, signing with the given
/// private key and filling gas, nonce and chain ID from the node at `rpc_url`
pub fn setup_client(
    priv_key: Option<&str>,
    rpc_url: &str,
    chain_id: Option<u64>,
) -> Result<DynProvider, ScriptError> {
    let url =
        Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let priv_key = priv_key.ok_or_else(|| {
        ScriptError::ClientInitialization(format!(
            "no private key configured, pass --priv-key or set {PRIVATE_KEY_ENV_VAR}"
        ))
    })?;
    let mut signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    signer.set_chain_id(chain_id);

    let provider = ProviderBuilder::new().wallet(signer).connect_http(url);
    Ok(DynProvider::new(provider))
}

/// Records a deployed address under `contract_key` in the deployments file,
/// creating the file if it does not exist and keeping any other entries
pub fn write_deployed_address(
    file_path: &Path,
    contract_key: &str,
    address: Address,
) -> Result<(), ScriptError> {
    let mut deployments = if file_path.exists() {
        let contents = fs::read_to_string(file_path)
            .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
        serde_json::from_str::<Map<String, Value>>(&contents)
            .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?
    } else {
        Map::new()
    };

    deployments.insert(contract_key.to_string(), Value::String(format!("{address:#x}")));

    let contents = serde_json::to_string_pretty(&deployments)
        .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
    fs::write(file_path, contents).map_err(|e| ScriptError::WriteDeployments(e.to_string()))
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn deployments_file_keeps_other_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deployments.json");
        fs::write(&path, r#"{ "Permit2": "0x000000000022d473030f116ddee9f6b43ac78ba3" }"#).unwrap();

        let deployed = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
        write_deployed_address(&path, "DealClient", deployed).unwrap();

        let written: Map<String, Value> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(
            written["DealClient"],
            "0x5fbdb2315678afecb367f032d93f642f64180aa3"
        );
    }

    #[test]
    fn deployments_file_is_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deployments.json");

        write_deployed_address(&path, "DealClient", Address::ZERO).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn rejects_malformed_client_config() {
        let key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
        assert!(setup_client(Some(key), "http://127.0.0.1:8545", None).is_ok());
        assert!(setup_client(Some("0xnotakey"), "http://127.0.0.1:8545", None).is_err());
        assert!(setup_client(Some(key), "not a url", None).is_err());

        let err = setup_client(None, "http://127.0.0.1:8545", None).unwrap_err();
        assert!(matches!(err, ScriptError::ClientInitialization(_)));
        assert!(err.to_string().contains(PRIVATE_KEY_ENV_VAR), "{err}");
    }
}
