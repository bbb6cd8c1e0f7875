//! Live secret snapshots.
//!
//! A live secret is what the controller materialized in the cluster. Its
//! `data` values are base64 encoded; decoding happens here, one key at a
//! time, so a single bad value never spoils the rest.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use tracing::debug;

use crate::core::kube::Cluster;
use crate::core::manifest::{Kind, ObjectRef, SecretData, SecretManifest};
use crate::error::{DecodeError, Result};

/// A secret as read back from the cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveSecret {
    pub target: ObjectRef,
    pub secret_type: String,
    /// Base64 encoded values, `None` when the object has no `data`.
    pub data: Option<SecretData>,
}

impl LiveSecret {
    /// Build a snapshot of `target` from its `Secret` document.
    pub fn from_manifest(target: &ObjectRef, manifest: SecretManifest) -> Self {
        Self {
            target: target.clone(),
            secret_type: manifest.secret_type_or_default().to_string(),
            data: manifest.data,
        }
    }

    /// Read the live secret for `target`.
    ///
    /// # Errors
    ///
    /// Propagates cluster failures; an object of another kind is a
    /// `ManifestError::UnexpectedKind`.
    pub fn fetch(cluster: &dyn Cluster, target: &ObjectRef) -> Result<Self> {
        let manifest = cluster.get(Kind::Secret, target)?.into_secret()?;
        debug!(target = %target, "fetched live secret");
        Ok(Self::from_manifest(target, manifest))
    }

    /// Number of encoded entries.
    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, |d| d.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode every entry, keeping per-key failures.
    pub fn decode_entries(&self) -> Vec<(String, std::result::Result<String, DecodeError>)> {
        self.data
            .iter()
            .flatten()
            .map(|(k, v)| (k.clone(), decode_value(v)))
            .collect()
    }

    /// Decode every entry, dropping keys that fail.
    ///
    /// Returns the decoded data and the keys that were skipped with their
    /// errors.
    pub fn decode_lossy(&self) -> (SecretData, Vec<(String, DecodeError)>) {
        let mut decoded = SecretData::new();
        let mut skipped = Vec::new();
        for (key, value) in self.decode_entries() {
            match value {
                Ok(v) => {
                    decoded.insert(key, v);
                }
                Err(e) => skipped.push((key, e)),
            }
        }
        (decoded, skipped)
    }
}

/// Decode one base64 value into UTF-8 text.
pub fn decode_value(encoded: &str) -> std::result::Result<String, DecodeError> {
    let bytes = STANDARD.decode(encoded.trim())?;
    Ok(String::from_utf8(bytes)?)
}

/// Encode one plaintext value as base64.
pub fn encode_value(plain: &str) -> String {
    STANDARD.encode(plain.as_bytes())
}
