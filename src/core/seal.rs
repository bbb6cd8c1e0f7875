//! Sealing service.
//!
//! Converts a plaintext `Secret` manifest into a `SealedSecret` by handing it
//! to `kubeseal`. The plaintext only ever exists in memory and in a private
//! temporary file that is removed on every exit path.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::Builder;
use tracing::{debug, trace};
use zeroize::{Zeroize, Zeroizing};

use crate::core::constants;
use crate::core::manifest::{self, SealedSecretManifest, SecretManifest};
use crate::error::{Result, SealingError};

/// Encrypts plaintext manifests.
pub trait Sealer {
    /// Seal the plaintext manifest stored at `plaintext`.
    ///
    /// Returns the sealed manifest text exactly as produced.
    ///
    /// # Errors
    ///
    /// Returns `SealingError` with the command line, exit code and
    /// diagnostics when sealing fails.
    fn seal(&self, plaintext: &Path, controller_namespace: &str) -> Result<String>;
}

/// [`Sealer`] backed by the `kubeseal` CLI.
#[derive(Debug, Clone)]
pub struct Kubeseal {
    program: PathBuf,
}

impl Default for Kubeseal {
    fn default() -> Self {
        Self::new(constants::KUBESEAL)
    }
}

impl Kubeseal {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn args(controller_namespace: &str) -> [String; 3] {
        [
            format!("--controller-namespace={}", controller_namespace),
            "-o".to_string(),
            "yaml".to_string(),
        ]
    }
}

impl Sealer for Kubeseal {
    fn seal(&self, plaintext: &Path, controller_namespace: &str) -> Result<String> {
        let args = Self::args(controller_namespace);
        let command = format!("{} {}", self.program.display(), args.join(" "));
        debug!(command = %command, "sealing secret");

        let input = File::open(plaintext)?;
        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::from(input))
            .output()
            .map_err(|e| SealingError {
                command: command.clone(),
                code: None,
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(SealingError {
                command,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            }
            .into());
        }

        trace!(sealed_len = output.stdout.len(), "sealed secret");
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// A freshly sealed manifest.
#[derive(Debug, Clone)]
pub struct Sealed {
    /// Raw sealed document, written to disk as-is.
    pub text: String,
    pub manifest: SealedSecretManifest,
}

/// Seal a plaintext manifest.
///
/// The manifest is consumed: its serialized form is zeroized once sealing
/// finishes and the temporary file is deleted whether or not sealing
/// succeeds.
pub fn seal_manifest(
    sealer: &dyn Sealer,
    mut plain: SecretManifest,
    controller_namespace: &str,
) -> Result<Sealed> {
    let text = Zeroizing::new(manifest::serialize(&plain)?);
    for value in plain.string_data.iter_mut().flat_map(|d| d.values_mut()) {
        value.zeroize();
    }

    let mut transient = Builder::new().prefix("ssm-").suffix(".yaml").tempfile()?;
    transient.write_all(text.as_bytes())?;
    transient.flush()?;
    trace!(path = %transient.path().display(), "wrote transient plaintext");

    let result = sealer.seal(transient.path(), controller_namespace);
    transient.close()?;
    let sealed = result?;

    let manifest = manifest::parse(&sealed)?.into_sealed()?;
    Ok(Sealed {
        text: sealed,
        manifest,
    })
}
