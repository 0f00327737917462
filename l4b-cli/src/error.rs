//! Error taxonomy for the bootstrap run.
//!
//! Only two conditions get typed errors: a missing runtime (fatal before
//! any side effect) and a failed delegated package step (fatal, exit
//! status passed through). Everything else propagates as `anyhow` context.

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum BootstrapError {
    /// Required interpreter is absent from the search path.
    #[snafu(display(
        "runtime '{binary}' not found on the search path (minimum supported: {minimum})\n{hint}"
    ))]
    MissingRuntime {
        binary: String,
        minimum: String,
        hint: String,
    },

    /// A delegated package-manager step failed; its exit status is carried
    /// through to the caller unchanged.
    #[snafu(display("package step '{step}' failed with exit status {status}"))]
    DelegatedInstall { step: String, status: i32 },
}

impl BootstrapError {
    /// Process exit code when this error terminates the run.
    pub fn exit_code(&self) -> i32 {
        match self {
            BootstrapError::MissingRuntime { .. } => 1,
            BootstrapError::DelegatedInstall { status, .. } => *status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delegated_install_propagates_status() {
        let err = BootstrapError::DelegatedInstall {
            step: "snapshot".to_string(),
            status: 42,
        };
        assert_eq!(err.exit_code(), 42);
        assert!(err.to_string().contains("snapshot"));
    }

    #[test]
    fn test_missing_runtime_message_is_actionable() {
        let err = BootstrapError::MissingRuntime {
            binary: "Rscript".to_string(),
            minimum: "4.1.0".to_string(),
            hint: "install R from https://cran.r-project.org/".to_string(),
        };
        assert_eq!(err.exit_code(), 1);
        let message = err.to_string();
        assert!(message.contains("4.1.0"));
        assert!(message.contains("cran.r-project.org"));
    }
}
