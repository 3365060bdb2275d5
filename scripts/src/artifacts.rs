//! Resolution of contract blueprints from a Hardhat artifacts directory

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy::{json_abi::JsonAbi, primitives::Bytes};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    constants::{
        ARTIFACT_EXTENSION, BUILD_INFO_DIR, DEBUG_ARTIFACT_SUFFIX, FQN_SEPARATOR,
        LIBRARY_PLACEHOLDER_MARKER,
    },
    errors::ScriptError,
    types::Blueprint,
};

/// A store from which contract blueprints can be looked up by name
pub trait BlueprintSource {
    /// Resolve the blueprint for the given contract name
    fn resolve(&self, name: &str) -> Result<Blueprint, ScriptError>;
}

/// The subset of a Hardhat artifact file needed for deployment
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HardhatArtifact {
    /// The name of the contract
    contract_name: String,
    /// The source file the contract is defined in
    source_name: String,
    /// The contract's ABI
    abi: JsonAbi,
    /// The hex-encoded creation bytecode
    bytecode: String,
    /// Library references in the creation bytecode, keyed by source name
    /// and then by library name
    #[serde(default)]
    link_references: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
}

/// A Hardhat artifacts directory, laid out as
/// `<root>/<sourceName>/<contractName>.json`
pub struct HardhatArtifacts {
    /// The root of the artifacts directory
    root: PathBuf,
}

impl HardhatArtifacts {
    /// Create a store over the given artifacts directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Find the path of the artifact for the given contract name, which may
    /// either be bare or fully qualified
    fn artifact_path(&self, name: &str) -> Result<PathBuf, ScriptError> {
        if let Some((source_name, contract_name)) = split_fully_qualified_name(name) {
            let path = self
                .root
                .join(source_name)
                .join(format!("{contract_name}.{ARTIFACT_EXTENSION}"));

            if !path.is_file() {
                return Err(ScriptError::ArtifactNotFound(name.to_string()));
            }
            return Ok(path);
        }

        if name.is_empty() {
            return Err(ScriptError::ArtifactNotFound(name.to_string()));
        }

        let file_name = format!("{name}.{ARTIFACT_EXTENSION}");
        let mut found = Vec::new();
        find_files(&self.root, &file_name, &mut found)?;
        found.sort();

        match found.len() {
            0 => Err(ScriptError::ArtifactNotFound(name.to_string())),
            1 => Ok(found.remove(0)),
            _ => Err(ScriptError::AmbiguousArtifact {
                name: name.to_string(),
                candidates: found
                    .iter()
                    .map(|path| self.fully_qualified_name(path, name))
                    .collect(),
            }),
        }
    }

    /// Derive the fully qualified name of an artifact from its location
    fn fully_qualified_name(&self, path: &Path, contract_name: &str) -> String {
        let source_name = path
            .parent()
            .and_then(|dir| dir.strip_prefix(&self.root).ok())
            .map(|dir| dir.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default();

        format!("{source_name}{FQN_SEPARATOR}{contract_name}")
    }
}

impl BlueprintSource for HardhatArtifacts {
    fn resolve(&self, name: &str) -> Result<Blueprint, ScriptError> {
        let path = self.artifact_path(name)?;
        info!("Reading artifact from {}", path.display());

        let contents = fs::read_to_string(&path)
            .map_err(|e| ScriptError::ReadFile(format!("{}: {}", path.display(), e)))?;
        let artifact: HardhatArtifact = serde_json::from_str(&contents)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;

        let requested =
            split_fully_qualified_name(name).map_or(name, |(_, contract_name)| contract_name);
        if artifact.contract_name != requested {
            return Err(ScriptError::ArtifactParsing(format!(
                "{} holds contract {}, expected {}",
                path.display(),
                artifact.contract_name,
                requested
            )));
        }

        blueprint_from_artifact(artifact)
    }
}

/// Split a fully qualified name into its source name and contract name.
///
/// Contract names never contain the separator, so the split is taken at its
/// last occurrence and the source name keeps any earlier ones.
fn split_fully_qualified_name(name: &str) -> Option<(&str, &str)> {
    name.rsplit_once(FQN_SEPARATOR)
}

/// Validate a parsed artifact and convert it into a deployable blueprint.
///
/// Mirrors the checks a Hardhat contract factory performs: the contract must
/// have creation code, all libraries must be linked, and since the
/// deployment carries no constructor arguments the constructor must take
/// none.
fn blueprint_from_artifact(artifact: HardhatArtifact) -> Result<Blueprint, ScriptError> {
    let fqn = format!(
        "{}{}{}",
        artifact.source_name, FQN_SEPARATOR, artifact.contract_name
    );

    let hex_code = artifact.bytecode.trim();
    let hex_code = hex_code.strip_prefix("0x").unwrap_or(hex_code);
    if hex_code.is_empty() {
        return Err(ScriptError::AbstractContract(fqn));
    }

    if !artifact.link_references.is_empty() || hex_code.contains(LIBRARY_PLACEHOLDER_MARKER) {
        let libraries = artifact
            .link_references
            .iter()
            .flat_map(|(source, libs)| {
                libs.keys()
                    .map(move |lib| format!("{source}{FQN_SEPARATOR}{lib}"))
            })
            .collect::<Vec<_>>();

        let detail = if libraries.is_empty() {
            fqn
        } else {
            format!("{} ({})", fqn, libraries.join(", "))
        };
        return Err(ScriptError::UnlinkedLibraries(detail));
    }

    if let Some(constructor) = artifact.abi.constructor() {
        if !constructor.inputs.is_empty() {
            let types = constructor
                .inputs
                .iter()
                .map(|param| param.ty.as_str())
                .collect::<Vec<_>>();
            return Err(ScriptError::ConstructorArguments(format!(
                "{} expects ({})",
                fqn,
                types.join(", ")
            )));
        }
    }

    let bytecode =
        Bytes::from_str(hex_code).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;
    debug!("Loaded {} bytes of creation code for {}", bytecode.len(), fqn);

    Ok(Blueprint {
        contract_name: artifact.contract_name,
        source_name: artifact.source_name,
        abi: artifact.abi,
        bytecode,
    })
}

/// Recursively collect all files named `file_name` below `dir`, skipping
/// the build info directory and Hardhat's debug files
fn find_files(dir: &Path, file_name: &str, found: &mut Vec<PathBuf>) -> Result<(), ScriptError> {
    let entries =
        fs::read_dir(dir).map_err(|e| ScriptError::ReadFile(format!("{}: {}", dir.display(), e)))?;

    for entry in entries {
        let entry = entry.map_err(|e| ScriptError::ReadFile(e.to_string()))?;
        let path = entry.path();
        let entry_name = entry.file_name();
        let file_type = entry
            .file_type()
            .map_err(|e| ScriptError::ReadFile(format!("{}: {}", path.display(), e)))?;

        // Symlinked directories are not followed
        if file_type.is_dir() {
            if entry_name != BUILD_INFO_DIR {
                find_files(&path, file_name, found)?;
            }
        } else if entry_name == file_name
            && !entry_name.to_string_lossy().ends_with(DEBUG_ARTIFACT_SUFFIX)
        {
            found.push(path);
        }
    }

    Ok(())
}
