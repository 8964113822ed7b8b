//! Lookup and validation of Hardhat compilation artifacts.
//!
//! Artifacts live under `<artifacts>/<sourceName>/<contractName>.json`, e.g.
//! `artifacts/contracts/DealClient.sol/DealClient.json`.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy::{json_abi::JsonAbi, primitives::Bytes};
use serde::Deserialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::{
    constants::{ARTIFACT_EXTENSION, BUILD_INFO_DIR, FULLY_QUALIFIED_NAME_SEPARATOR},
    errors::ScriptError,
};

/// A Hardhat compilation artifact for a single contract
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    /// The name of the contract
    pub contract_name: String,
    /// The path of the source file the contract was compiled from
    pub source_name: String,
    /// The contract's ABI
    pub abi: JsonAbi,
    /// The contract's creation bytecode, hex encoded
    pub bytecode: String,
    /// Libraries that must be linked into the bytecode before deployment,
    /// keyed by source name and then library name
    #[serde(default)]
    pub link_references: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
}

impl ContractArtifact {
    /// The fully qualified name of the contract, `<sourceName>:<contractName>`
    pub fn fully_qualified_name(&self) -> String {
        format!(
            "{}{}{}",
            self.source_name, FULLY_QUALIFIED_NAME_SEPARATOR, self.contract_name
        )
    }

    /// Returns the creation bytecode, checking that the contract can be deployed
    /// without constructor arguments or library linking
    pub fn deployable_bytecode(&self) -> Result<Bytes, ScriptError> {
        let name = self.fully_qualified_name();

        if !self.link_references.is_empty() {
            let libraries = self
                .link_references
                .iter()
                .flat_map(|(source, libs)| libs.keys().map(move |lib| format!("{source}:{lib}")))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ScriptError::ArtifactParsing(format!(
                "{name} must be linked against libraries: {libraries}"
            )));
        }

        let num_args = self.abi.constructor.as_ref().map_or(0, |c| c.inputs.len());
        if num_args != 0 {
            return Err(ScriptError::ArtifactParsing(format!(
                "{name} constructor expects {num_args} arguments, but none are supplied"
            )));
        }

        let bytecode = Bytes::from_str(&self.bytecode)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{name} bytecode: {e}")))?;
        if bytecode.is_empty() {
            return Err(ScriptError::ArtifactParsing(format!(
                "{name} is abstract or an interface and cannot be deployed"
            )));
        }

        Ok(bytecode)
    }
}

/// Reads the artifact of the given contract from the artifacts directory.
///
/// `contract_name` is either a bare contract name, which must be unique among
/// all artifacts, or a fully qualified `<sourceName>:<contractName>`.
pub fn read_artifact(
    artifacts_dir: &Path,
    contract_name: &str,
) -> Result<ContractArtifact, ScriptError> {
    let (path, bare_name) = match contract_name.rsplit_once(FULLY_QUALIFIED_NAME_SEPARATOR) {
        Some((source_name, bare_name)) => (
            artifacts_dir
                .join(source_name)
                .join(bare_name)
                .with_extension(ARTIFACT_EXTENSION),
            bare_name,
        ),
        None => (find_artifact(artifacts_dir, contract_name)?, contract_name),
    };

    debug!("reading artifact for {contract_name} from {}", path.display());
    let contents = fs::read_to_string(&path)
        .map_err(|e| ScriptError::ReadArtifact(format!("{}: {e}", path.display())))?;
    let artifact: ContractArtifact = serde_json::from_str(&contents)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {e}", path.display())))?;

    if artifact.contract_name != bare_name {
        return Err(ScriptError::ArtifactParsing(format!(
            "{} holds contract {}, expected {bare_name}",
            path.display(),
            artifact.contract_name
        )));
    }

    Ok(artifact)
}

/// Searches the artifacts directory for the single artifact of a bare contract name
fn find_artifact(artifacts_dir: &Path, contract_name: &str) -> Result<PathBuf, ScriptError> {
    if !artifacts_dir.is_dir() {
        return Err(ScriptError::ReadArtifact(format!(
            "artifacts directory {} does not exist, compile the contracts first",
            artifacts_dir.display()
        )));
    }

    let file_name = format!("{contract_name}.{ARTIFACT_EXTENSION}");
    let mut candidates = WalkDir::new(artifacts_dir)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != BUILD_INFO_DIR)
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == file_name.as_str())
        .map(|entry| entry.into_path())
        .collect::<Vec<_>>();

    match candidates.len() {
        0 => Err(ScriptError::ReadArtifact(format!(
            "no artifact for contract {contract_name} in {}",
            artifacts_dir.display()
        ))),
        1 => Ok(candidates.remove(0)),
        _ => {
            candidates.sort();
            let names = candidates
                .iter()
                .map(|path| fully_qualified_name_of(artifacts_dir, path, contract_name))
                .collect::<Vec<_>>()
                .join(", ");
            Err(ScriptError::ReadArtifact(format!(
                "ambiguous contract name {contract_name}, use one of: {names}"
            )))
        }
    }
}

/// Derives the fully qualified contract name from an artifact's location
fn fully_qualified_name_of(artifacts_dir: &Path, path: &Path, contract_name: &str) -> String {
    let source_name = path
        .parent()
        .and_then(|dir| dir.strip_prefix(artifacts_dir).ok())
        .map(|dir| dir.to_string_lossy().replace('\\', "/"))
        .unwrap_or_default();

    format!("{source_name}{FULLY_QUALIFIED_NAME_SEPARATOR}{contract_name}")
}
