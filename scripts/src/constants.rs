//! Constants used in the deploy script

/// The contract deployed when no name is given
pub const DEFAULT_CONTRACT_NAME: &str = "SoulMintIdentity";

/// The default directory holding the Hardhat compilation artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The default hostport of a local Hardhat / Anvil devnet node
pub const DEFAULT_DEVNET_HOSTPORT: &str = "http://localhost:8545";

/// The private key of the first pre-funded account on a local Hardhat / Anvil devnet
pub const DEFAULT_DEVNET_PKEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// The number of confirmations to wait for the contract deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: u64 = 1;

/// The subdirectory of the artifacts directory holding solc build info,
/// which never contains contract artifacts
pub const BUILD_INFO_DIR: &str = "build-info";

/// The extension of an artifact file
pub const ARTIFACT_EXTENSION: &str = "json";

/// The suffix of the debug files Hardhat emits next to each artifact
pub const DEBUG_ARTIFACT_SUFFIX: &str = ".dbg.json";

/// The separator between source name and contract name in a fully
/// qualified contract name
pub const FQN_SEPARATOR: char = ':';

/// The marker solc leaves in bytecode in place of an unlinked library address
pub const LIBRARY_PLACEHOLDER_MARKER: &str = "__";

/// The log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_DIRECTIVE: &str = "warn";

/// The label printed in front of the deployed address
pub const DEPLOYED_LABEL: &str = "contract deployed to";
