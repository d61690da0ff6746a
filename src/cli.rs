use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "movie-rename")]
#[command(author, version, about, long_about = None)]
#[command(about = "Rename movie files and their subtitles to \"Title (Year)\" using TMDB")]
pub struct Args {
    /// Movie file or directory to scan (omit to run on built-in sample names)
    pub path: Option<PathBuf>,

    /// Configuration file (defaults to <config dir>/movie-rename/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_path_and_flags() {
        let args = Args::parse_from(["movie-rename", "-vv", "--config", "c.toml", "/movies"]);

        assert_eq!(args.path, Some(PathBuf::from("/movies")));
        assert_eq!(args.config, Some(PathBuf::from("c.toml")));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_path_is_optional() {
        let args = Args::parse_from(["movie-rename"]);
        assert!(args.path.is_none());
        assert_eq!(args.verbose, 0);
    }
}
