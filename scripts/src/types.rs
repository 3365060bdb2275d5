//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy::{
    json_abi::JsonAbi,
    primitives::{Address, Bytes, TxHash},
};

use crate::constants::FQN_SEPARATOR;

/// A compiled contract, ready to be deployed
#[derive(Clone, Debug)]
pub struct Blueprint {
    /// The name of the contract
    pub contract_name: String,
    /// The path of the source file the contract is defined in, relative to
    /// the project root
    pub source_name: String,
    /// The contract's ABI
    pub abi: JsonAbi,
    /// The creation bytecode of the contract
    pub bytecode: Bytes,
}

impl Blueprint {
    /// The fully qualified name of the contract, `<sourceName>:<contractName>`
    pub fn fully_qualified_name(&self) -> String {
        format!("{}{}{}", self.source_name, FQN_SEPARATOR, self.contract_name)
    }
}

/// A confirmed deployment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deployment {
    /// The name of the deployed contract
    pub contract_name: String,
    /// The hash of the deployment transaction
    pub tx_hash: TxHash,
    /// The address of the new contract instance
    pub address: Address,
}

impl Display for Deployment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.contract_name,
            crate::constants::DEPLOYED_LABEL,
            self.address
        )
    }
}
