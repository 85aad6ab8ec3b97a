use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{
    ContentSignature, ExtensionTable, SignatureTable, UploadPolicy, DEFAULT_MAX_UPLOAD_SIZE,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Invalid(String),

    #[error("Failed to read upload policy {path}: {source}")]
    PolicyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse upload policy: {0}")]
    PolicyParse(#[from] toml::de::Error),

    #[error("Invalid magic bytes for {content_type}: {source}")]
    MagicHex {
        content_type: String,
        #[source]
        source: hex::FromHexError,
    },

    #[error("Invalid upload policy: {0}")]
    Policy(#[from] DomainError),
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub upload_dir: PathBuf,
    /// Overrides the ceiling from the policy file when set
    pub max_upload_bytes: Option<u64>,
    pub upload_policy_path: Option<PathBuf>,
    pub create_upload_dir: bool,
    pub log_format: LogFormat,
    /// Variables that were set but did not parse, reported by `validate`
    pub env_errors: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: None,
            upload_policy_path: None,
            create_upload_dir: false,
            log_format: LogFormat::Text,
            env_errors: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let mut env_errors = Vec::new();

        let max_upload_bytes = parse_var(&lookup, "MAX_UPLOAD_BYTES", &mut env_errors);
        let create_upload_dir = parse_var(&lookup, "CREATE_UPLOAD_DIR", &mut env_errors)
            .unwrap_or(defaults.create_upload_dir);
        let log_format =
            parse_var(&lookup, "LOG_FORMAT", &mut env_errors).unwrap_or(defaults.log_format);

        Self {
            listen_addr: lookup("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            upload_dir: lookup("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            max_upload_bytes,
            upload_policy_path: lookup("UPLOAD_POLICY_PATH")
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            create_upload_dir,
            log_format,
            env_errors,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(error) = self.env_errors.first() {
            return Err(ConfigError::Invalid(error.clone()));
        }

        if self.listen_addr.is_empty() {
            return Err(ConfigError::Invalid("LISTEN_ADDR cannot be empty".to_string()));
        }

        if self.max_upload_bytes == Some(0) {
            return Err(ConfigError::Invalid(
                "MAX_UPLOAD_BYTES must be greater than zero".to_string(),
            ));
        }

        if self.upload_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("UPLOAD_DIR cannot be empty".to_string()));
        }

        match std::fs::metadata(&self.upload_dir) {
            Ok(metadata) if !metadata.is_dir() => {
                return Err(ConfigError::Invalid(format!(
                    "UPLOAD_DIR {} is not a directory",
                    self.upload_dir.display()
                )));
            }
            Ok(_) => {}
            Err(_) if self.create_upload_dir => {}
            Err(e) => {
                return Err(ConfigError::Invalid(format!(
                    "UPLOAD_DIR {} is not usable: {}",
                    self.upload_dir.display(),
                    e
                )));
            }
        }

        Ok(())
    }

    /// Build the upload policy: built-in tables or the policy file, then
    /// the `MAX_UPLOAD_BYTES` override.
    pub fn upload_policy(&self) -> Result<UploadPolicy, ConfigError> {
        let policy = match &self.upload_policy_path {
            Some(path) => load_policy_file(path)?,
            None => UploadPolicy::default(),
        };

        match self.max_upload_bytes {
            Some(max) => Ok(policy.with_max_size(max)?),
            None => Ok(policy),
        }
    }
}

/// Parse an optional variable; a value that is set but malformed is
/// recorded instead of silently replaced by the default
fn parse_var<T, F>(lookup: &F, name: &str, errors: &mut Vec<String>) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(format!("{} has an invalid value: {:?}", name, raw));
            None
        }
    }
}

/// On-disk shape of an upload policy file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyFile {
    #[serde(default = "default_max_size")]
    max_size: u64,
    signatures: Vec<SignatureEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SignatureEntry {
    content_type: String,
    extension: Option<String>,
    /// Hex encoded prefixes, e.g. "ffd8ff"
    magic: Vec<String>,
}

fn default_max_size() -> u64 {
    DEFAULT_MAX_UPLOAD_SIZE
}

pub fn load_policy_file(path: &Path) -> Result<UploadPolicy, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::PolicyRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_policy(&contents)
}

pub fn parse_policy(contents: &str) -> Result<UploadPolicy, ConfigError> {
    let file: PolicyFile = toml::from_str(contents)?;

    let mut signatures = Vec::with_capacity(file.signatures.len());
    let mut extensions = HashMap::new();

    for entry in file.signatures {
        let magic = entry
            .magic
            .iter()
            .map(|m| hex::decode(m.trim()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| ConfigError::MagicHex {
                content_type: entry.content_type.clone(),
                source,
            })?;

        if let Some(extension) = entry.extension {
            extensions.insert(entry.content_type.clone(), extension);
        }
        signatures.push(ContentSignature::new(entry.content_type, magic)?);
    }

    Ok(UploadPolicy::new(
        file.max_size,
        SignatureTable::new(signatures)?,
        ExtensionTable::new(extensions)?,
    )?)
}
