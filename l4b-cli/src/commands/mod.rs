pub mod bootstrap;

pub use bootstrap::{BootstrapCommands, handle_bootstrap_command};
