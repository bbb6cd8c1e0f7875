//! Sealed secret listings, local and in-cluster.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::core::constants;
use crate::core::kube::Cluster;
use crate::core::manifest::{self, Kind, Manifest};
use crate::error::Result;

/// A sealed manifest found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalEntry {
    pub file: String,
    #[serde(skip)]
    pub path: PathBuf,
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub keys: usize,
}

/// A sealed secret object in the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterEntry {
    pub name: String,
    pub namespace: String,
    pub keys: usize,
}

/// Both sections, as emitted by `list --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub local: Vec<LocalEntry>,
    pub cluster: Vec<ClusterEntry>,
}

fn is_manifest_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| constants::MANIFEST_EXTENSIONS.contains(&e))
}

/// Sealed manifests in `dir`, sorted by file name.
///
/// Files that do not parse as a `SealedSecret` are skipped. With a
/// `namespace`, only manifests declaring that namespace are kept. A missing
/// `dir` lists nothing.
pub fn local(dir: &Path, namespace: Option<&str>) -> Result<Vec<LocalEntry>> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "manifest directory missing");
        return Ok(Vec::new());
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| is_manifest_file(p))
        .collect();
    paths.sort();

    let mut found = Vec::new();
    for path in paths {
        let sealed = match fs::read_to_string(&path)
            .ok()
            .and_then(|text| manifest::parse(&text).ok())
            .and_then(|m| m.into_sealed().ok())
        {
            Some(sealed) => sealed,
            None => {
                debug!(path = %path.display(), "skipping non-sealed file");
                continue;
            }
        };

        if let Some(ns) = namespace {
            if sealed.metadata.namespace.as_deref() != Some(ns) {
                continue;
            }
        }

        found.push(LocalEntry {
            file: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            keys: sealed.spec.encrypted_data.len(),
            name: sealed.metadata.name,
            namespace: sealed.metadata.namespace,
            path,
        });
    }
    Ok(found)
}

/// Sealed secrets in the cluster, in `namespace` or across all of them.
pub fn cluster(cluster: &dyn Cluster, namespace: Option<&str>) -> Result<Vec<ClusterEntry>> {
    let objects = cluster.list(Kind::SealedSecret, namespace)?;
    Ok(objects
        .into_iter()
        .filter_map(|m| match m {
            Manifest::SealedSecret(s) => Some(ClusterEntry {
                name: s.metadata.name.unwrap_or_default(),
                namespace: s.metadata.namespace.unwrap_or_default(),
                keys: s.spec.encrypted_data.len(),
            }),
            Manifest::Secret(_) => None,
        })
        .collect())
}
