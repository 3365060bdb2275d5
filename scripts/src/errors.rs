//! Definitions of errors that can occur during the execution of the deploy script

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deploy script
#[derive(Debug)]
pub enum ScriptError {
    /// No artifact with the requested name exists in the artifacts directory
    ArtifactNotFound(String),
    /// More than one artifact matches the requested name
    AmbiguousArtifact {
        /// The requested contract name
        name: String,
        /// The fully qualified names of the matching artifacts
        candidates: Vec<String>,
    },
    /// Error reading an artifact from disk
    ReadFile(String),
    /// Error parsing a Solidity compilation artifact
    ArtifactParsing(String),
    /// The artifact has no creation bytecode, i.e. it is an interface or an
    /// abstract contract
    AbstractContract(String),
    /// The artifact's bytecode references libraries that have not been linked
    UnlinkedLibraries(String),
    /// The contract's constructor expects arguments, but none are supplied
    ConstructorArguments(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error submitting or confirming the deployment transaction
    ContractDeployment(String),
    /// The deployment transaction was mined but reverted
    TransactionReverted(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ArtifactNotFound(name) => {
                write!(f, "artifact for contract {} not found", name)
            }
            ScriptError::AmbiguousArtifact { name, candidates } => write!(
                f,
                "multiple artifacts for contract {}, use a fully qualified name: {}",
                name,
                candidates.join(", ")
            ),
            ScriptError::ReadFile(s) => write!(f, "error reading artifact: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::AbstractContract(name) => write!(
                f,
                "contract {} is abstract or an interface and can't be deployed",
                name
            ),
            ScriptError::UnlinkedLibraries(s) => {
                write!(f, "contract needs to be linked to libraries: {}", s)
            }
            ScriptError::ConstructorArguments(s) => {
                write!(f, "constructor requires arguments: {}", s)
            }
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::TransactionReverted(tx) => {
                write!(f, "deployment transaction {} reverted", tx)
            }
        }
    }
}

impl Error for ScriptError {}
