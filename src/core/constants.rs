//! Constants used throughout ssm.
//!
//! Centralizes magic strings and default values.

/// Namespace used when none is given for a secret.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Namespace of the sealed-secrets controller.
pub const DEFAULT_CONTROLLER_NAMESPACE: &str = "sealed-secrets";

/// API version of plaintext secrets.
pub const SECRET_API_VERSION: &str = "v1";

/// Secret type used when the source secret declares none.
pub const DEFAULT_SECRET_TYPE: &str = "Opaque";

/// Resource name of sealed secrets for `kubectl get`.
pub const SEALED_SECRET_RESOURCE: &str = "sealedsecrets";

/// Resource name of live secrets for `kubectl get`.
pub const SECRET_RESOURCE: &str = "secret";

/// Cluster client executable.
pub const KUBECTL: &str = "kubectl";

/// Sealing utility executable.
pub const KUBESEAL: &str = "kubeseal";

/// Tools that must be on `PATH` before a command runs.
pub const REQUIRED_TOOLS: &[&str] = &[KUBECTL, KUBESEAL];

/// Case-insensitive substrings marking a key as sensitive.
pub const SENSITIVE_WORDS: &[&str] = &["password", "token", "key", "secret"];

/// Displayed in place of a sensitive value.
pub const MASK: &str = "***hidden***";

/// Displayed in place of a value that could not be decoded.
pub const DECODE_ERROR_MARKER: &str = "<decode error>";

/// Suffix appended to a manifest path to form its backup name.
pub const BACKUP_SUFFIX: &str = ".backup";

/// Manifest file extensions recognized by `list`.
pub const MANIFEST_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Project-local settings file.
pub const SETTINGS_FILE: &str = ".ssm.toml";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SSM_LOG";
