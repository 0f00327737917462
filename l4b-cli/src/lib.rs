//! l4b-cli library: environment model, bootstrap pipeline, manifest and
//! package-manager client.

pub mod bootstrap;
pub mod commands;
pub mod environment;
pub mod error;
pub mod manifest;
pub mod pkgmgr;

pub use environment::{Environment, OsFamily};
pub use error::BootstrapError;
pub use manifest::{Manifest, load_manifest, locate_manifest};
