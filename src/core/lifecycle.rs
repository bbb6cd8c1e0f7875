//! Sealed manifest lifecycle.
//!
//! Create, update and convert all end the same way: build a plaintext
//! `Secret`, seal it, and write the sealed document to disk. Update also
//! rotates the previous file to a backup before the new one takes its place.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::backup;
use crate::core::config::Config;
use crate::core::constants;
use crate::core::kube::{ApplyResult, Cluster};
use crate::core::live::LiveSecret;
use crate::core::manifest::{self, ObjectRef, SealedSecretManifest, SecretData, SecretManifest};
use crate::core::seal::{seal_manifest, Sealed, Sealer};
use crate::error::{DecodeError, Error, InputError, Result};

/// Read a manifest file and require it to be a `SealedSecret`.
///
/// # Errors
///
/// `Error::FileNotFound` when the file is absent, `ManifestError` when it is
/// malformed or of another kind.
pub fn load_sealed(path: &Path) -> Result<SealedSecretManifest> {
    if !path.is_file() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    Ok(manifest::parse(&text)?.into_sealed()?)
}

/// Result of `create`.
#[derive(Debug)]
pub struct Created {
    pub path: PathBuf,
    pub sealed: Sealed,
}

/// Everything known about a sealed file before the operator edits it.
#[derive(Debug)]
pub struct UpdatePlan {
    pub path: PathBuf,
    pub target: ObjectRef,
    /// Encrypted key names in file order. Values are never decrypted.
    pub existing_keys: Vec<String>,
    /// Decoded live values; empty when the live secret is unavailable.
    pub baseline: SecretData,
    pub secret_type: String,
    /// Why the live secret could not be read, if it could not.
    pub baseline_error: Option<Error>,
    /// Live keys left out of the baseline because they did not decode.
    pub undecodable: Vec<String>,
}

/// Result of `commit_update`.
#[derive(Debug)]
pub struct Updated {
    pub path: PathBuf,
    pub backup: PathBuf,
    pub sealed: Sealed,
}

/// Result of `convert`.
#[derive(Debug)]
pub struct Converted {
    pub path: PathBuf,
    pub sealed: Sealed,
    /// Entries found in the live secret.
    pub found: usize,
    /// Entries that failed to decode and were left out.
    pub skipped: Vec<(String, DecodeError)>,
}

/// Drives sealed manifests through their lifecycle.
pub struct Manager<'a> {
    config: &'a Config,
    cluster: &'a dyn Cluster,
    sealer: &'a dyn Sealer,
}

impl<'a> Manager<'a> {
    pub fn new(config: &'a Config, cluster: &'a dyn Cluster, sealer: &'a dyn Sealer) -> Self {
        Self {
            config,
            cluster,
            sealer,
        }
    }

    fn seal(&self, target: &ObjectRef, secret_type: &str, data: SecretData) -> Result<Sealed> {
        debug!(target = %target, keys = data.len(), "sealing");
        let plain = SecretManifest::plain(target, secret_type, data);
        seal_manifest(self.sealer, plain, &self.config.controller_namespace)
    }

    /// Seal `data` as a new secret and write `<dir>/<name>.yaml`.
    ///
    /// # Errors
    ///
    /// `InputError::NoData` when `data` is empty; sealing and I/O failures
    /// otherwise. Nothing is written unless sealing succeeds.
    pub fn create(&self, target: &ObjectRef, data: SecretData) -> Result<Created> {
        if data.is_empty() {
            return Err(InputError::NoData.into());
        }

        let sealed = self.seal(target, constants::DEFAULT_SECRET_TYPE, data)?;

        fs::create_dir_all(&self.config.directory)?;
        let path = self.config.manifest_path(&target.name);
        fs::write(&path, &sealed.text)?;
        info!(path = %path.display(), "sealed secret created");

        Ok(Created { path, sealed })
    }

    /// Load a sealed file and gather the live baseline for editing.
    ///
    /// A live secret that cannot be read is tolerated: the baseline is empty
    /// and the reason is kept in `baseline_error`. Values that fail to decode
    /// are left out of the baseline.
    pub fn prepare_update(&self, path: &Path) -> Result<UpdatePlan> {
        let sealed = load_sealed(path)?;
        let target = sealed.metadata.object_ref()?;
        let existing_keys = sealed.encrypted_keys();

        let mut plan = UpdatePlan {
            path: path.to_path_buf(),
            target,
            existing_keys,
            baseline: SecretData::new(),
            secret_type: constants::DEFAULT_SECRET_TYPE.to_string(),
            baseline_error: None,
            undecodable: Vec::new(),
        };

        match LiveSecret::fetch(self.cluster, &plan.target) {
            Ok(live) => {
                let (baseline, skipped) = live.decode_lossy();
                plan.baseline = baseline;
                plan.secret_type = live.secret_type;
                plan.undecodable = skipped.into_iter().map(|(key, _)| key).collect();
            }
            Err(e) => {
                debug!(target = %plan.target, error = %e, "live secret unavailable");
                plan.baseline_error = Some(e);
            }
        }

        Ok(plan)
    }

    /// Seal the merged data and replace the plan's file, keeping a backup.
    ///
    /// # Errors
    ///
    /// `InputError::NoData` when `merged` is empty. On sealing failure the
    /// original file is untouched.
    pub fn commit_update(&self, plan: &UpdatePlan, merged: SecretData) -> Result<Updated> {
        if merged.is_empty() {
            return Err(InputError::NoData.into());
        }

        let sealed = self.seal(&plan.target, &plan.secret_type, merged)?;
        let backup = backup::replace_with_backup(&plan.path, &sealed.text)?;
        info!(path = %plan.path.display(), backup = %backup.display(), "sealed secret updated");

        Ok(Updated {
            path: plan.path.clone(),
            backup,
            sealed,
        })
    }

    /// Seal an existing live secret into a manifest file.
    ///
    /// Writes to `output`, or `<dir>/<name>.yaml`. The secret's declared type
    /// is kept. Entries that fail to decode are skipped and reported.
    ///
    /// # Errors
    ///
    /// Cluster failures (including a missing secret), a non-`Secret` object,
    /// or `Error::NoDecodableData` when nothing decodes.
    pub fn convert(&self, target: &ObjectRef, output: Option<&Path>) -> Result<Converted> {
        let live = LiveSecret::fetch(self.cluster, target)?;
        let found = live.len();
        let (data, skipped) = live.decode_lossy();
        for (key, e) in &skipped {
            debug!(key = %key, error = %e, "skipping undecodable key");
        }
        if data.is_empty() {
            return Err(Error::NoDecodableData(target.name.clone()));
        }

        let sealed = self.seal(target, &live.secret_type, data)?;

        let path = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.manifest_path(&target.name));
        fs::write(&path, &sealed.text)?;
        info!(path = %path.display(), "secret converted");

        Ok(Converted {
            path,
            sealed,
            found,
            skipped,
        })
    }

    /// Apply a manifest file to the cluster.
    pub fn apply(&self, path: &Path) -> Result<ApplyResult> {
        if !path.is_file() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        self.cluster.apply(path)
    }
}
