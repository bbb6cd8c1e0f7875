//! ssm - a SealedSecret manager.
//!
//! Collects secret values from an operator, seals them with `kubeseal`, and
//! keeps the sealed manifests on disk in sync with the cluster.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── create        # Seal a new secret
//! │   ├── update        # Edit keys, rotate a backup
//! │   ├── convert       # Seal an existing cluster secret
//! │   ├── decrypt       # Show live values, masked
//! │   ├── list          # Local and cluster listings
//! │   ├── apply         # kubectl apply
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── manifest      # Secret / SealedSecret codec
//!     ├── kube          # Cluster trait, kubectl client
//!     ├── seal          # Sealer trait, kubeseal client
//!     ├── prompt        # Prompter trait, terminal prompts
//!     ├── reconcile     # Key merge and selection grammar
//!     ├── lifecycle     # Create / update / convert workflows
//!     ├── inspect       # Decrypt workflow
//!     ├── listing       # Local and cluster listings
//!     ├── backup        # Backup naming and crash-safe replace
//!     ├── live          # Live secret decoding
//!     ├── config        # Flags, settings file, defaults
//!     └── tools         # External tool checks
//! ```

pub mod cli;
pub mod core;
pub mod error;
