//! The deploy runner: resolve a contract factory, deploy once, report the address.
//!
//! Factory resolution and deployment sit behind the [`FactoryResolver`] and
//! [`ContractFactory`] traits, implemented over Hardhat artifacts and an alloy
//! provider by [`ArtifactResolver`] and [`ArtifactFactory`].

use std::{io::Write, path::PathBuf};

use alloy::{
    contract::RawCallBuilder,
    primitives::{Address, Bytes, TxHash},
    providers::DynProvider,
};
use async_trait::async_trait;
use tracing::info;

use crate::{artifacts::read_artifact, errors::ScriptError};

/// A contract returned by a successful deployment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeployedContract {
    /// The address of the deployed contract
    pub address: Address,
    /// The hash of the contract creation transaction
    pub transaction_hash: TxHash,
}

/// Something that can deploy a new instance of one contract
#[async_trait]
pub trait ContractFactory {
    /// Submits the contract creation transaction and waits for it to be confirmed
    async fn deploy(&self) -> Result<DeployedContract, ScriptError>;
}

/// Resolves contract names to factories
#[async_trait]
pub trait FactoryResolver {
    /// The factory type produced by this resolver
    type Factory: ContractFactory + Send + Sync;

    /// Returns a factory for the named contract
    async fn contract_factory(&self, contract_name: &str) -> Result<Self::Factory, ScriptError>;
}

/// Deploys the named contract exactly once and writes `Deployed to <address>` to `out`.
///
/// Nothing is written when resolution or deployment fails.
pub async fn run_deploy<R, W>(
    resolver: &R,
    contract_name: &str,
    out: &mut W,
) -> Result<DeployedContract, ScriptError>
where
    R: FactoryResolver + Sync,
    W: Write,
{
    let factory = resolver.contract_factory(contract_name).await?;
    let contract = factory.deploy().await?;

    writeln!(out, "Deployed to {}", contract.address)
        .map_err(|e| ScriptError::Output(e.to_string()))?;

    Ok(contract)
}

/// Resolves factories from the Hardhat artifacts directory, deploying through
/// a signing provider
pub struct ArtifactResolver {
    /// The Hardhat artifacts directory
    artifacts_dir: PathBuf,
    /// The provider through which deployments are sent
    client: DynProvider,
    /// The number of confirmations to wait for each deployment
    confirmations: u64,
    /// A fixed gas limit for deployments, skipping gas estimation
    gas_limit: Option<u64>,
}

impl ArtifactResolver {
    /// Constructor
    pub fn new(artifacts_dir: PathBuf, client: DynProvider, confirmations: u64) -> Self {
        Self {
            artifacts_dir,
            client,
            confirmations,
            gas_limit: None,
        }
    }

    /// Sets the gas limit of deployment transactions. With no limit the node
    /// estimates one, rejecting reverting deployments before they are sent.
    pub fn with_gas_limit(mut self, gas_limit: Option<u64>) -> Self {
        self.gas_limit = gas_limit;
        self
    }
}

#[async_trait]
impl FactoryResolver for ArtifactResolver {
    type Factory = ArtifactFactory;

    async fn contract_factory(&self, contract_name: &str) -> Result<ArtifactFactory, ScriptError> {
        let artifact = read_artifact(&self.artifacts_dir, contract_name)?;
        let bytecode = artifact.deployable_bytecode()?;

        info!(
            "resolved {} ({} bytes of bytecode)",
            artifact.fully_qualified_name(),
            bytecode.len()
        );

        Ok(ArtifactFactory {
            bytecode,
            client: self.client.clone(),
            confirmations: self.confirmations,
            gas_limit: self.gas_limit,
        })
    }
}

/// Deploys a contract's creation bytecode through an alloy provider
pub struct ArtifactFactory {
    /// The contract's creation bytecode
    bytecode: Bytes,
    /// The provider through which the deployment is sent
    client: DynProvider,
    /// The number of confirmations to wait for
    confirmations: u64,
    /// A fixed gas limit for the deployment
    gas_limit: Option<u64>,
}

#[async_trait]
impl ContractFactory for ArtifactFactory {
    async fn deploy(&self) -> Result<DeployedContract, ScriptError> {
        let mut deploy_tx =
            RawCallBuilder::new_raw_deploy(self.client.clone(), self.bytecode.clone());
        if let Some(gas_limit) = self.gas_limit {
            deploy_tx = deploy_tx.gas(gas_limit);
        }

        let pending_tx = deploy_tx
            .send()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        info!(
            "deployment transaction {} sent, waiting for {} confirmation(s)",
            pending_tx.tx_hash(),
            self.confirmations
        );

        let receipt = pending_tx
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        if !receipt.status() {
            return Err(ScriptError::ContractDeployment(format!(
                "deployment transaction {} reverted",
                receipt.transaction_hash
            )));
        }

        let address = receipt.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment(format!(
                "receipt of {} has no contract address",
                receipt.transaction_hash
            ))
        })?;

        Ok(DeployedContract {
            address,
            transaction_hash: receipt.transaction_hash,
        })
    }
}
