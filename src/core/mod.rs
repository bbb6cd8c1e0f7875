//! Core library components.
//!
//! Everything that talks to the cluster, the sealing utility or the operator
//! does so through a trait ([`kube::Cluster`], [`seal::Sealer`],
//! [`prompt::Prompter`]) so workflows can run against in-memory fakes.

pub mod backup;
pub mod config;
pub mod constants;
pub mod inspect;
pub mod kube;
pub mod lifecycle;
pub mod listing;
pub mod live;
pub mod manifest;
pub mod prompt;
pub mod reconcile;
pub mod seal;
pub mod tools;
