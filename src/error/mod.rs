mod codes;

pub use codes::ExitCode;

use crate::api::{ApiError, ENV_TMDB_API_KEY};
use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop the whole run
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Path not found: {path}")]
    PathNotFound { path: PathBuf },

    #[error("Configuration error: {message}")]
    ConfigError {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("Lookup client error: {message}")]
    ApiError { message: String },

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::PathNotFound { .. } => ExitCode::PathNotFound,
            AppError::ConfigError { .. } => ExitCode::ConfigError,
            AppError::ApiError { .. } => ExitCode::ApiError,
            AppError::Other(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::PathNotFound { path } => {
                format!(
                    "The specified path does not exist:\n  {}\n\n\
                     Please verify the path and try again.",
                    path.display()
                )
            }

            AppError::ConfigError { path, message } => {
                let path_info = path
                    .as_ref()
                    .map(|p| format!("File: {}\n", p.display()))
                    .unwrap_or_default();

                format!(
                    "Invalid configuration:\n  {}\n{}\n\
                     Expected keys: action (copy | move | test), movie_exts, movie_format\n\
                     (with {{n}} and {{y}} placeholders), output_dir, overwrite, [subtitles].",
                    message, path_info
                )
            }

            AppError::ApiError { message } => {
                format!(
                    "Cannot use the movie lookup service:\n  {}\n\n\
                     Set {} in the environment or in a .env file.",
                    message, ENV_TMDB_API_KEY
                )
            }

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        let path = match &err {
            ConfigError::FileNotFound(path) => Some(path.clone()),
            ConfigError::ReadError { path, .. } => Some(path.clone()),
            _ => None,
        };
        AppError::ConfigError {
            path,
            message: err.to_string(),
        }
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        AppError::ApiError {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err = AppError::PathNotFound {
            path: PathBuf::from("/test"),
        };
        assert_eq!(err.exit_code(), ExitCode::PathNotFound);

        let err: AppError = ConfigError::ValidationError("bad".into()).into();
        assert_eq!(err.exit_code(), ExitCode::ConfigError);

        let err: AppError = ApiError::NotConfigured.into();
        assert_eq!(err.exit_code(), ExitCode::ApiError);

        assert_eq!(AppError::Other("x".into()).exit_code(), ExitCode::GeneralError);
    }

    #[test]
    fn test_path_not_found_message() {
        let err = AppError::PathNotFound {
            path: PathBuf::from("/missing/movies"),
        };
        let msg = err.detailed_message();
        assert!(msg.contains("does not exist"));
        assert!(msg.contains("/missing/movies"));
    }

    #[test]
    fn test_config_error_conversion_keeps_path() {
        let err: AppError = ConfigError::FileNotFound(PathBuf::from("/etc/mr.toml")).into();
        let msg = err.detailed_message();
        assert!(msg.contains("File: /etc/mr.toml"));
        assert!(msg.contains("{n} and {y}"));
    }

    #[test]
    fn test_api_error_mentions_key() {
        let err: AppError = ApiError::NotConfigured.into();
        assert!(err.detailed_message().contains(ENV_TMDB_API_KEY));
    }
}
