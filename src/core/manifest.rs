//! Manifest codec.
//!
//! Parses YAML documents into a [`Manifest`], dispatching on the `kind`
//! field, and serializes manifests back to YAML. Map payloads keep their
//! insertion order so written files read top-to-bottom the way they were
//! entered.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::core::constants;
use crate::error::ManifestError;

/// Ordered key/value payload of a manifest.
pub type SecretData = IndexMap<String, String>;

/// The manifest kinds ssm understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kind {
    Secret,
    SealedSecret,
}

impl Kind {
    /// The `kind` field value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Secret => "Secret",
            Kind::SealedSecret => "SealedSecret",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Object metadata. Only the fields ssm reads are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl ObjectMeta {
    pub fn new(name: &str, namespace: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
        }
    }

    /// Name and namespace, both required.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::MissingField` naming the absent field.
    pub fn object_ref(&self) -> Result<ObjectRef, ManifestError> {
        let name = self
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .ok_or(ManifestError::MissingField("metadata.name"))?;
        let namespace = self
            .namespace
            .clone()
            .filter(|n| !n.is_empty())
            .ok_or(ManifestError::MissingField("metadata.namespace"))?;
        Ok(ObjectRef { name, namespace })
    }
}

/// A namespace-qualified object name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub name: String,
    pub namespace: String,
}

impl ObjectRef {
    pub fn new(name: &str, namespace: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: namespace.to_string(),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// A `Secret` document.
///
/// Live secrets carry base64 values in `data`; plaintext manifests built for
/// sealing carry raw values in `stringData`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretManifest {
    #[serde(default)]
    pub api_version: String,
    pub kind: Kind,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub secret_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SecretData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_data: Option<SecretData>,
}

impl SecretManifest {
    /// Build a plaintext manifest ready for sealing.
    pub fn plain(target: &ObjectRef, secret_type: &str, data: SecretData) -> Self {
        Self {
            api_version: constants::SECRET_API_VERSION.to_string(),
            kind: Kind::Secret,
            metadata: ObjectMeta::new(&target.name, &target.namespace),
            secret_type: Some(secret_type.to_string()),
            data: None,
            string_data: Some(data),
        }
    }

    /// Declared type, or `Opaque` when unset.
    pub fn secret_type_or_default(&self) -> &str {
        self.secret_type
            .as_deref()
            .unwrap_or(constants::DEFAULT_SECRET_TYPE)
    }
}

/// A `SealedSecret` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SealedSecretManifest {
    #[serde(default)]
    pub api_version: String,
    pub kind: Kind,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: SealedSecretSpec,
}

impl SealedSecretManifest {
    /// Names of the encrypted keys, in file order.
    pub fn encrypted_keys(&self) -> Vec<String> {
        self.spec.encrypted_data.keys().cloned().collect()
    }
}

/// The `spec` block of a sealed secret.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SealedSecretSpec {
    #[serde(default)]
    pub encrypted_data: SecretData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<Value>,
}

/// A parsed manifest, discriminated by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Manifest {
    Secret(SecretManifest),
    SealedSecret(SealedSecretManifest),
}

impl Manifest {
    pub fn kind(&self) -> Kind {
        match self {
            Manifest::Secret(_) => Kind::Secret,
            Manifest::SealedSecret(_) => Kind::SealedSecret,
        }
    }

    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            Manifest::Secret(s) => &s.metadata,
            Manifest::SealedSecret(s) => &s.metadata,
        }
    }

    /// Unwrap a sealed secret, rejecting any other kind.
    pub fn into_sealed(self) -> Result<SealedSecretManifest, ManifestError> {
        match self {
            Manifest::SealedSecret(s) => Ok(s),
            other => Err(ManifestError::UnexpectedKind {
                expected: Kind::SealedSecret.as_str(),
                found: other.kind().to_string(),
            }),
        }
    }

    /// Unwrap a secret, rejecting any other kind.
    pub fn into_secret(self) -> Result<SecretManifest, ManifestError> {
        match self {
            Manifest::Secret(s) => Ok(s),
            other => Err(ManifestError::UnexpectedKind {
                expected: Kind::Secret.as_str(),
                found: other.kind().to_string(),
            }),
        }
    }
}

/// Parse a single manifest document.
///
/// # Errors
///
/// Returns `ManifestError::Parse` for malformed YAML,
/// `MissingField("kind")` when no kind is declared, and `UnsupportedKind`
/// for anything other than `Secret` or `SealedSecret`.
pub fn parse(text: &str) -> Result<Manifest, ManifestError> {
    let value: Value = serde_yaml::from_str(text)?;
    from_value(value)
}

/// Parse a `kind: List` document (as printed by `kubectl get -o yaml`).
///
/// A single object document is accepted too and yields one item.
pub fn parse_list(text: &str) -> Result<Vec<Manifest>, ManifestError> {
    let value: Value = serde_yaml::from_str(text)?;
    if value.is_null() {
        return Ok(Vec::new());
    }
    if kind_of(&value) != Some("List") {
        return Ok(vec![from_value(value)?]);
    }
    match value.get("items") {
        Some(Value::Sequence(items)) => items.iter().cloned().map(from_value).collect(),
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(_) => Err(ManifestError::MissingField("items")),
    }
}

/// Serialize a manifest to YAML, preserving map order.
pub fn serialize<T: Serialize>(manifest: &T) -> Result<String, ManifestError> {
    Ok(serde_yaml::to_string(manifest)?)
}

fn kind_of(value: &Value) -> Option<&str> {
    value.get("kind").and_then(Value::as_str)
}

fn from_value(value: Value) -> Result<Manifest, ManifestError> {
    let kind = kind_of(&value)
        .ok_or(ManifestError::MissingField("kind"))?
        .to_string();
    match kind.as_str() {
        "Secret" => Ok(Manifest::Secret(serde_yaml::from_value(value)?)),
        "SealedSecret" => Ok(Manifest::SealedSecret(serde_yaml::from_value(value)?)),
        _ => Err(ManifestError::UnsupportedKind(kind)),
    }
}
