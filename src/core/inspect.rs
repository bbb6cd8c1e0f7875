//! Reading live secrets back for display.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::constants;
use crate::core::kube::Cluster;
use crate::core::lifecycle::load_sealed;
use crate::core::live::LiveSecret;
use crate::core::manifest::ObjectRef;
use crate::core::prompt::is_sensitive;
use crate::error::Result;

/// What a decrypt token refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A sealed manifest on disk. Name and namespace come from the file.
    File { path: PathBuf, object: ObjectRef },
    /// A bare object name in the given namespace.
    Name(ObjectRef),
}

impl Target {
    /// Interpret `token` as a file when one exists at that path, otherwise
    /// as an object name in `namespace`.
    ///
    /// # Errors
    ///
    /// A file that is not a well-formed `SealedSecret`.
    pub fn resolve(token: &str, namespace: &str) -> Result<Self> {
        let path = Path::new(token);
        if path.is_file() {
            let sealed = load_sealed(path)?;
            let object = sealed.metadata.object_ref()?;
            debug!(path = %path.display(), object = %object, "decrypt target is a file");
            return Ok(Target::File {
                path: path.to_path_buf(),
                object,
            });
        }
        Ok(Target::Name(ObjectRef::new(token, namespace)))
    }

    pub fn object(&self) -> &ObjectRef {
        match self {
            Target::File { object, .. } => object,
            Target::Name(object) => object,
        }
    }
}

/// One decoded entry; `None` when the value did not decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: Option<String>,
}

impl Entry {
    pub fn is_sensitive(&self) -> bool {
        is_sensitive(&self.key)
    }

    /// Text to show for this entry. Sensitive values are masked unless
    /// `reveal` is set.
    pub fn render(&self, reveal: bool) -> &str {
        match &self.value {
            None => constants::DECODE_ERROR_MARKER,
            Some(_) if !reveal && self.is_sensitive() => constants::MASK,
            Some(value) => value.as_str(),
        }
    }
}

/// Decoded contents of a live secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    pub object: ObjectRef,
    pub entries: Vec<Entry>,
}

impl Inspection {
    /// Fetch and decode the live secret for `object`.
    pub fn fetch(cluster: &dyn Cluster, object: &ObjectRef) -> Result<Self> {
        let live = LiveSecret::fetch(cluster, object)?;
        Ok(Self::from_live(&live))
    }

    pub fn from_live(live: &LiveSecret) -> Self {
        let entries = live
            .decode_entries()
            .into_iter()
            .map(|(key, value)| Entry {
                key,
                value: value.ok(),
            })
            .collect();
        Self {
            object: live.target.clone(),
            entries,
        }
    }

    pub fn has_data(&self) -> bool {
        !self.entries.is_empty()
    }

    /// `(key, shown value)` pairs.
    pub fn rendered(&self, reveal: bool) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.key.as_str(), e.render(reveal)))
            .collect()
    }
}
