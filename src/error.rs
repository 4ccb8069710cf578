use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Structural misuse of a dialog handle. Data conditions (unknown target,
/// guard rejection, empty registry) are never errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DialogError {
    #[error("dialog surface used outside of an active MultiStepDialog")]
    OutsideDialog,
    #[error("dialog state is already borrowed; guards must not call back into the dialog")]
    Busy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read dialog config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid dialog config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("dialog config declares no steps")]
    NoSteps,
    #[error("duplicate step id `{0}`")]
    DuplicateStepId(String),
    #[error("initial step `{0}` is not one of the configured steps")]
    UnknownInitialStep(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dialog(#[from] DialogError),
    #[error("failed to initialize logging: {0}")]
    Logging(String),
    #[error("invalid script: {0}")]
    Script(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
