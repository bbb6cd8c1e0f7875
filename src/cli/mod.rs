//! Command-line interface.

pub mod apply;
pub mod completions;
pub mod convert;
pub mod create;
pub mod decrypt;
pub mod list;
pub mod output;
pub mod update;

use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use tracing::debug;

use crate::core::config::{Config, Settings};
use crate::core::kube::Kubectl;
use crate::core::lifecycle::Manager;
use crate::core::prompt::{Prompter, Terminal};
use crate::core::seal::Kubeseal;
use crate::core::tools;
use crate::error::Result;

/// ssm - manage SealedSecret manifests.
#[derive(Parser)]
#[command(
    name = "ssm",
    about = "Create, update and inspect SealedSecret manifests",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory where sealed manifests are read and written
    #[arg(long, global = true, env = "SSM_DIR")]
    pub dir: Option<PathBuf>,

    /// Skip the kubectl/kubeseal presence check
    #[arg(long, global = true)]
    pub skip_check: bool,

    /// Namespace of the sealed-secrets controller
    #[arg(long, global = true, env = "SSM_CONTROLLER_NAMESPACE")]
    pub controller_namespace: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create a new sealed secret from prompted key/value pairs
    Create {
        /// Secret name
        name: String,
        /// Target namespace
        #[arg(short, long)]
        namespace: Option<String>,
    },

    /// Add or change keys in an existing sealed manifest
    Update {
        /// Sealed manifest file
        file: PathBuf,
    },

    /// List sealed manifests on disk and in the cluster
    List {
        /// Only show this namespace
        #[arg(short, long)]
        namespace: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a sealed manifest to the cluster
    Apply {
        /// Sealed manifest file
        file: PathBuf,
    },

    /// Show the decrypted values of a secret
    Decrypt {
        /// Sealed manifest file or secret name
        target: String,
        /// Namespace, when the target is a name
        #[arg(short, long)]
        namespace: Option<String>,
    },

    /// Seal an existing cluster secret into a manifest
    Convert {
        /// Secret name
        name: String,
        /// Source namespace
        #[arg(short, long)]
        namespace: Option<String>,
        /// Output file (defaults to <dir>/<name>.yaml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Everything a command needs: resolved configuration and the real
/// collaborators.
pub struct Context {
    pub config: Config,
    pub cluster: Kubectl,
    pub sealer: Kubeseal,
    pub prompter: Terminal,
}

impl Context {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cluster: Kubectl::default(),
            sealer: Kubeseal::default(),
            prompter: Terminal,
        }
    }

    pub fn manager(&self) -> Manager<'_> {
        Manager::new(&self.config, &self.cluster, &self.sealer)
    }

    /// Namespace from the command line, or the configured default.
    pub fn namespace(&self, namespace: Option<&str>) -> String {
        self.config.namespace_or_default(namespace)
    }

    /// Ask whether to apply `path`, and apply it if so.
    pub fn offer_apply(&self, path: &Path) -> Result<()> {
        println!();
        if self.prompter.confirm("Apply to cluster?")? {
            apply::execute(self, path)
        } else {
            output::dimmed(&format!("saved to {} only", path.display()));
            Ok(())
        }
    }
}

/// Execute a command. Without one, print the help.
pub fn execute(cli: Cli) -> Result<()> {
    use Command::*;

    let command = match cli.command {
        Some(Completions { shell }) => return completions::execute(shell),
        Some(command) => command,
        None => {
            Cli::command().print_help()?;
            return Ok(());
        }
    };

    if cli.skip_check {
        debug!("tool check skipped");
    } else {
        tools::check_required()?;
    }

    let config = Config::resolve(cli.dir, cli.controller_namespace, Settings::discover()?);
    let ctx = Context::new(config);

    match command {
        Create { name, namespace } => create::execute(&ctx, &name, namespace.as_deref()),
        Update { file } => update::execute(&ctx, &file),
        List { namespace, json } => list::execute(&ctx, namespace.as_deref(), json),
        Apply { file } => apply::execute(&ctx, &file),
        Decrypt { target, namespace } => decrypt::execute(&ctx, &target, namespace.as_deref()),
        Convert {
            name,
            namespace,
            output,
        } => convert::execute(&ctx, &name, namespace.as_deref(), output.as_deref()),
        Completions { .. } => Ok(()),
    }
}
