use crate::messages::control::planting::MessageResponse;
use axum::{http::StatusCode, response::IntoResponse, Json};
use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors raised while configuring or running a component.
#[derive(Error, Debug)]
pub enum PlanterError {
    /// The config file could not be read or did not match the struct.
    #[error("Failed to read config: {0}")]
    Config(#[from] config::ConfigError),

    /// The config file does not exist.
    #[error("Could not locate the config file {0:?}")]
    MissingConfigFile(PathBuf),

    /// The listener could not be bound, usually because the port is taken.
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// The server stopped with an error.
    #[error("Server error: {0}")]
    Serve(#[source] io::Error),
}

pub type PlanterResult<T> = Result<T, PlanterError>;

/// Errors returned to HTTP clients.
#[derive(Error, Debug, PartialEq)]
pub enum ApiError {
    /// Reported as a 404 with a human readable message.
    #[error("{0}")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(MessageResponse { message })).into_response()
            }
        }
    }
}
