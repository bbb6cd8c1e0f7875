//! Error types for ssm.
//!
//! Every command returns [`Result`]. Nested enums group failures by the
//! collaborator that produced them so `main` can attach a hint.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    /// A required external executable is not on `PATH`.
    #[error("required tool not found: {0}")]
    ToolMissing(String),

    /// A local file the command needs does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The cluster has no object of this kind and name.
    #[error("{kind} '{name}' not found in namespace '{namespace}'")]
    ObjectNotFound {
        kind: String,
        name: String,
        namespace: String,
    },

    /// A live secret had data, but none of it could be decoded.
    #[error("no decodable data found in secret '{0}'")]
    NoDecodableData(String),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Sealing(#[from] SealingError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed manifest text or a manifest of the wrong shape.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("invalid manifest: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("manifest is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("unsupported manifest kind: {0}")]
    UnsupportedKind(String),

    #[error("not a {expected}: {found}")]
    UnexpectedKind {
        expected: &'static str,
        found: String,
    },
}

/// A cluster call failed.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed{}: {}", exit_suffix(.code), .stderr.trim())]
    Command {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("could not read output of `{command}`: {source}")]
    Output {
        command: String,
        #[source]
        source: ManifestError,
    },
}

/// The sealing utility failed.
#[derive(Error, Debug)]
#[error("failed to seal secret{}: {}\n  command: {command}", exit_suffix(.code), .stderr.trim())]
pub struct SealingError {
    /// The invoked command line.
    pub command: String,
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
    /// Captured diagnostic output.
    pub stderr: String,
}

/// Malformed operator input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("invalid selection format: {0}")]
    InvalidSelection(String),

    #[error("no valid keys selected")]
    NoValidKeys,

    #[error("no data provided")]
    NoData,

    #[error("invalid choice: {0}")]
    InvalidChoice(String),
}

/// A single live value could not be decoded.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("value is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Settings file problems.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" (exit code {})", code),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
