//! Definitions of CLI arguments for the deploy script

use std::path::PathBuf;

use clap::Parser;

use crate::constants::{
    DEFAULT_ARTIFACTS_DIR, DEFAULT_CONTRACT_NAME, DEFAULT_DEVNET_HOSTPORT, DEFAULT_DEVNET_PKEY,
};

/// Deploy a compiled contract and print its address.
///
/// With no arguments, deploys `SoulMintIdentity` from `./artifacts` to a
/// local devnet using its first pre-funded account.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Name of the contract to deploy, bare or fully qualified
    /// (`contracts/Foo.sol:Foo`)
    #[arg(short, long, env = "CONTRACT", default_value = DEFAULT_CONTRACT_NAME)]
    pub contract: String,

    /// Directory containing the Hardhat compilation artifacts
    #[arg(short, long, env = "ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: PathBuf,

    /// RPC URL to deploy to
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_DEVNET_HOSTPORT)]
    pub rpc_url: String,

    /// Private key of the deployer
    #[arg(long = "pkey", env = "PKEY", default_value = DEFAULT_DEVNET_PKEY, hide_default_value = true)]
    pub priv_key: String,
}
