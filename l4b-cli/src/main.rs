//! l4b: self-installing bootstrapper for the lab's analysis environment.
//!
//! Bare invocation runs the full bootstrap; `check` and `patch` expose the
//! individual steps.

use clap::Parser;
use l4b_cli::commands::{BootstrapCommands, handle_bootstrap_command};
use l4b_cli::error::BootstrapError;

#[derive(Parser)]
#[clap(
    name = "l4b",
    version,
    about = "Bootstrap the statistical-analysis research environment"
)]
struct Cli {
    #[clap(subcommand)]
    command: Option<BootstrapCommands>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    if let Err(err) = handle_bootstrap_command(command) {
        eprintln!("❌ {err:#}");

        // Delegated failures carry the external tool's exit status through.
        let code = err
            .downcast_ref::<BootstrapError>()
            .map(BootstrapError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}
