//! Hardhat compilation artifacts.
//!
//! # Responsibilities
//! - Locate `<Contract>.json` under an artifacts tree by bare or fully qualified name
//! - Parse ABI and creation bytecode
//! - Produce init code with ABI-encoded constructor arguments
//!
//! # Design Decisions
//! - Bare names must resolve to exactly one artifact; duplicates are an error
//!   listing the fully qualified candidates
//! - `build-info/`, `cache/` and `*.dbg.json` are never considered

use std::fs;
use std::path::{Path, PathBuf};

use alloy::dyn_abi::{DynSolValue, JsonAbiExt};
use alloy::json_abi::{JsonAbi, StateMutability};
use alloy::primitives::{Bytes, U256};
use serde::Deserialize;
use thiserror::Error;

const SKIPPED_DIRS: [&str; 2] = ["build-info", "cache"];

/// Errors raised while locating or preparing an artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifacts directory {} does not exist; compile the contracts first", .0.display())]
    MissingDirectory(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed artifact {origin}: {reason}")]
    Parse { origin: String, reason: String },

    #[error("no artifact for contract '{name}' under {}", .dir.display())]
    NotFound { name: String, dir: PathBuf },

    #[error("contract name '{name}' is ambiguous; use one of: {}", .candidates.join(", "))]
    Ambiguous {
        name: String,
        candidates: Vec<String>,
    },

    #[error("contract '{0}' has no bytecode (abstract contract or interface?)")]
    NotDeployable(String),

    #[error("contract '{0}' references unlinked libraries")]
    UnlinkedLibraries(String),

    #[error("cannot encode constructor arguments for '{contract}': {reason}")]
    Encoding { contract: String, reason: String },

    #[error("constructor of '{0}' is not payable but a value was attached")]
    NonPayableConstructor(String),
}

/// On-disk layout of a Hardhat artifact (`hh-sol-artifact-1`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HardhatArtifact {
    contract_name: String,
    source_name: String,
    abi: JsonAbi,
    bytecode: String,
    #[serde(default)]
    link_references: serde_json::Map<String, serde_json::Value>,
}

/// A compiled contract ready for deployment.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub contract_name: String,
    pub source_name: String,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

impl Artifact {
    /// Parse an artifact from its JSON text. `origin` names it in errors.
    pub fn from_json(json: &str, origin: &str) -> Result<Self, ArtifactError> {
        let raw: HardhatArtifact = serde_json::from_str(json).map_err(|e| ArtifactError::Parse {
            origin: origin.to_string(),
            reason: e.to_string(),
        })?;

        if !raw.link_references.is_empty() || raw.bytecode.contains("__$") {
            return Err(ArtifactError::UnlinkedLibraries(raw.contract_name));
        }

        let bytecode: Bytes = raw.bytecode.parse().map_err(|e| ArtifactError::Parse {
            origin: origin.to_string(),
            reason: format!("bytecode: {}", e),
        })?;
        if bytecode.is_empty() {
            return Err(ArtifactError::NotDeployable(raw.contract_name));
        }

        Ok(Self {
            contract_name: raw.contract_name,
            source_name: raw.source_name,
            abi: raw.abi,
            bytecode,
        })
    }

    /// Read and parse an artifact file.
    pub fn from_file(path: &Path) -> Result<Self, ArtifactError> {
        let json = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json, &path.display().to_string())
    }

    /// `contracts/Lock.sol:Lock` style name.
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    /// Creation bytecode followed by the ABI-encoded constructor arguments.
    pub fn deploy_code(&self, args: &[DynSolValue], value: U256) -> Result<Bytes, ArtifactError> {
        let encoding = |reason: String| ArtifactError::Encoding {
            contract: self.contract_name.clone(),
            reason,
        };

        let (payable, encoded) = match self.abi.constructor() {
            Some(constructor) => {
                let encoded = constructor
                    .abi_encode_input(args)
                    .map_err(|e| encoding(e.to_string()))?;
                (constructor.state_mutability == StateMutability::Payable, encoded)
            }
            None if args.is_empty() => (false, Vec::new()),
            None => {
                return Err(encoding(format!(
                    "no constructor in ABI but {} argument(s) given",
                    args.len()
                )))
            }
        };

        if !value.is_zero() && !payable {
            return Err(ArtifactError::NonPayableConstructor(self.contract_name.clone()));
        }

        let mut code = Vec::with_capacity(self.bytecode.len() + encoded.len());
        code.extend_from_slice(&self.bytecode);
        code.extend_from_slice(&encoded);
        Ok(code.into())
    }
}

/// Lookup over a Hardhat artifacts directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Find an artifact by `Name` or `path/to/Source.sol:Name`.
    pub fn find(&self, name: &str) -> Result<Artifact, ArtifactError> {
        if !self.dir.is_dir() {
            return Err(ArtifactError::MissingDirectory(self.dir.clone()));
        }

        let path = match name.rsplit_once(':') {
            Some((source, contract)) => {
                let path = self.dir.join(source).join(format!("{}.json", contract));
                if !path.is_file() {
                    return Err(self.not_found(name));
                }
                path
            }
            None => {
                let mut matches = Vec::new();
                self.collect(&self.dir, name, &mut matches)?;
                matches.sort();

                match matches.len() {
                    0 => return Err(self.not_found(name)),
                    1 => matches.remove(0),
                    _ => {
                        return Err(ArtifactError::Ambiguous {
                            name: name.to_string(),
                            candidates: matches
                                .iter()
                                .map(|path| self.qualified_name(path, name))
                                .collect(),
                        })
                    }
                }
            }
        };

        tracing::debug!(path = %path.display(), "Loading artifact");
        Artifact::from_file(&path)
    }

    fn collect(&self, dir: &Path, name: &str, out: &mut Vec<PathBuf>) -> Result<(), ArtifactError> {
        let io_err = |source| ArtifactError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let file_name = format!("{}.json", name);

        for entry in fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            let Some(entry_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            if path.is_dir() {
                if dir == self.dir.as_path() && SKIPPED_DIRS.contains(&entry_name) {
                    continue;
                }
                self.collect(&path, name, out)?;
            } else if entry_name == file_name && is_source_dir(dir) {
                out.push(path);
            }
        }
        Ok(())
    }

    fn qualified_name(&self, path: &Path, name: &str) -> String {
        let source = path
            .parent()
            .and_then(|p| p.strip_prefix(&self.dir).ok())
            .map(|p| {
                p.components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .unwrap_or_default();
        format!("{}:{}", source, name)
    }

    fn not_found(&self, name: &str) -> ArtifactError {
        ArtifactError::NotFound {
            name: name.to_string(),
            dir: self.dir.clone(),
        }
    }
}

/// Hardhat nests each contract under a directory named after its source file.
fn is_source_dir(dir: &Path) -> bool {
    dir.extension().is_some_and(|ext| ext == "sol")
}
