//! Constants used in the contract scripts

/// The name of the contract deployed when none is given
pub const DEFAULT_CONTRACT_NAME: &str = "DealClient";

/// The directory holding Hardhat compilation artifacts, relative to the working directory
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The RPC URL of a local development node
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// The number of confirmations to wait for the contract deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: u64 = 1;

/// The environment variable holding the deployer's private key
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// The environment variable holding the RPC URL
pub const RPC_URL_ENV_VAR: &str = "RPC_URL";

/// The environment variable holding an explicit chain ID
pub const CHAIN_ID_ENV_VAR: &str = "CHAIN_ID";

/// The extension of a Hardhat artifact file
pub const ARTIFACT_EXTENSION: &str = "json";

/// The Hardhat artifacts subdirectory holding full compiler inputs and outputs,
/// which never contains contract artifacts
pub const BUILD_INFO_DIR: &str = "build-info";

/// The separator between source name and contract name in a fully qualified name,
/// e.g. `contracts/DealClient.sol:DealClient`
pub const FULLY_QUALIFIED_NAME_SEPARATOR: char = ':';

/// The version of the extra deal parameters understood by the `DealClient` contract
pub const EXTRA_PARAMS_VERSION: u64 = 1;

