pub mod api;
pub mod cli;
pub mod config;
pub mod demo;
pub mod error;
pub mod logging;
pub mod output;
pub mod parser;
pub mod progress;
pub mod rename;
pub mod resolver;
pub mod scanner;

pub use api::{config_from_env, ApiConfig, ApiError, MovieLookup, MovieSearchResult, TmdbClient};
pub use config::{load_config, Action, Config, ConfigError};
pub use error::{AppError, ExitCode};
pub use parser::{parse_filename, ParsedCandidate};
pub use rename::{MovieFormat, Pipeline, PlacementOutcome, RunReport};
pub use resolver::{resolve, MovieMatch};
pub use scanner::{find_movie_files, find_subtitle_files};
