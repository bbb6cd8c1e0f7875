//! Cluster client.
//!
//! Talks to the cluster through the `kubectl` CLI. Every call is attempted
//! once; a non-zero exit surfaces as [`ClientError::Command`] carrying the
//! captured stderr.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, trace};

use crate::core::constants;
use crate::core::manifest::{self, Kind, Manifest, ObjectRef};
use crate::error::{ClientError, Error, Result};

/// Outcome of `apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    /// What the cluster reported, e.g. `sealedsecret.bitnami.com/foo created`.
    pub message: String,
}

/// Cluster operations ssm needs.
pub trait Cluster {
    /// Fetch one object.
    ///
    /// # Errors
    ///
    /// Returns `Error::ObjectNotFound` when the cluster has no such object,
    /// `ClientError` for any other failure.
    fn get(&self, kind: Kind, target: &ObjectRef) -> Result<Manifest>;

    /// Apply a manifest file.
    fn apply(&self, path: &Path) -> Result<ApplyResult>;

    /// List objects of a kind, across all namespaces when `namespace` is
    /// `None`.
    fn list(&self, kind: Kind, namespace: Option<&str>) -> Result<Vec<Manifest>>;
}

/// `kubectl` resource name for a manifest kind.
pub fn resource(kind: Kind) -> &'static str {
    match kind {
        Kind::Secret => constants::SECRET_RESOURCE,
        Kind::SealedSecret => constants::SEALED_SECRET_RESOURCE,
    }
}

/// [`Cluster`] backed by the `kubectl` CLI.
#[derive(Debug, Clone)]
pub struct Kubectl {
    program: PathBuf,
}

impl Default for Kubectl {
    fn default() -> Self {
        Self::new(constants::KUBECTL)
    }
}

impl Kubectl {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command_line(&self, args: &[&str]) -> String {
        let mut line = self.program.display().to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    /// Run kubectl and return stdout, or the raw failure.
    fn run(&self, args: &[&str]) -> std::result::Result<String, ClientError> {
        let command = self.command_line(args);
        debug!(command = %command, "running kubectl");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| ClientError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ClientError::Command {
                command,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        trace!(stdout_len = output.stdout.len(), "kubectl finished");
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl Cluster for Kubectl {
    fn get(&self, kind: Kind, target: &ObjectRef) -> Result<Manifest> {
        let args = [
            "get",
            resource(kind),
            target.name.as_str(),
            "-n",
            target.namespace.as_str(),
            "-o",
            "yaml",
        ];
        let stdout = match self.run(&args) {
            Ok(stdout) => stdout,
            Err(ClientError::Command { stderr, .. }) if is_not_found(&stderr) => {
                return Err(Error::ObjectNotFound {
                    kind: kind.to_string(),
                    name: target.name.clone(),
                    namespace: target.namespace.clone(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        manifest::parse(&stdout).map_err(|source| {
            ClientError::Output {
                command: self.command_line(&args),
                source,
            }
            .into()
        })
    }

    fn apply(&self, path: &Path) -> Result<ApplyResult> {
        let path = path.to_string_lossy();
        let stdout = self.run(&["apply", "-f", &path])?;
        Ok(ApplyResult {
            message: stdout.trim().to_string(),
        })
    }

    fn list(&self, kind: Kind, namespace: Option<&str>) -> Result<Vec<Manifest>> {
        let mut args = vec!["get", resource(kind)];
        match namespace {
            Some(ns) => args.extend(["-n", ns]),
            None => args.push("--all-namespaces"),
        }
        args.extend(["-o", "yaml"]);

        let stdout = self.run(&args)?;
        manifest::parse_list(&stdout).map_err(|source| {
            ClientError::Output {
                command: self.command_line(&args),
                source,
            }
            .into()
        })
    }
}

/// kubectl reports missing objects as `Error from server (NotFound): ...`.
fn is_not_found(stderr: &str) -> bool {
    stderr.contains("(NotFound)")
}
