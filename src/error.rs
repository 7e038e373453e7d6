use thiserror::Error;

use hue::error::HueError;

#[derive(Error, Debug)]
pub enum ApiError {
    /* mapped errors */
    #[error(transparent)]
    HueError(#[from] HueError),

    #[error(transparent)]
    ConfigError(#[from] config::ConfigError),

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    SetLoggerError(#[from] log::SetLoggerError),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    SerdeYaml(#[from] serde_yml::Error),

    #[error(transparent)]
    JoinError(#[from] tokio::task::JoinError),

    /* huebind errors */
    #[error("Unknown channel: {0:?}")]
    UnknownChannel(String),

    #[error("Hue group not known on bridge: {0}")]
    GroupNotFound(String),

    #[error("Group {0} cannot be modified")]
    GroupNotModifiable(String),

    #[error("Handler for group {0} has stopped")]
    HandlerStopped(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type ApiResult<T> = Result<T, ApiError>;
