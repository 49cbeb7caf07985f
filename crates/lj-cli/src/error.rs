use ljbaseline::core::forcefield::params::ParamLoadError;
use ljbaseline::engine::error::ConfigurationError;
use ljbaseline::workflows::evaluate::WorkflowError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Parameters(#[from] ParamLoadError),

    #[error("Invalid evaluator configuration: {0}")]
    Evaluator(#[from] ConfigurationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Process exit status: `2` when the run was never attempted because its
    /// inputs or settings were rejected (as clap does for bad flags), `1` otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Parameters(_)
            | CliError::Evaluator(_)
            | CliError::Config(_)
            | CliError::FileParsing { .. } => 2,
            CliError::Workflow(_) | CliError::Io(_) | CliError::Csv(_) | CliError::Other(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_inputs_exit_with_usage_status() {
        assert_eq!(CliError::Config("missing cutoff".to_string()).exit_code(), 2);
        assert_eq!(
            CliError::Evaluator(ConfigurationError::InvalidCutoff(-1.0)).exit_code(),
            2
        );
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        assert_eq!(CliError::Io(io).exit_code(), 1);
    }
}
