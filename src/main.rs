use clap::Parser;
use movie_rename::api::{config_from_env, MovieLookup, TmdbClient};
use movie_rename::cli::Args;
use movie_rename::config::load_config;
use movie_rename::demo::run_demo;
use movie_rename::error::AppError;
use movie_rename::logging;
use movie_rename::output::{display_demo, display_run_report};
use movie_rename::progress::{should_use_colors, Progress};
use movie_rename::rename::{Pipeline, RunReport};
use movie_rename::scanner::find_movie_files;
use tracing::{error, info};

fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    logging::init(args.verbose);

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: Args) -> Result<(), AppError> {
    if let Some(path) = &args.path {
        if !path.exists() {
            return Err(AppError::PathNotFound { path: path.clone() });
        }
    }

    let config = load_config(args.config.as_deref())?;
    if !config.action.mutates_filesystem() {
        info!("Action is \"{}\": no files will be changed", config.action);
    }

    let mut progress = Progress::new_with_ui(args.verbose > 0, should_use_colors());
    let mut stdout = std::io::stdout();

    let Some(target) = &args.path else {
        info!("No path given, running on sample file names");
        let client = TmdbClient::new(config_from_env()).ok();
        let entries = run_demo(&config, client.as_ref().map(|c| c as &dyn MovieLookup));
        return display_demo(&entries, &mut stdout)
            .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)));
    };

    let movies = find_movie_files(target, &config.movie_exts);

    let report = if movies.is_empty() {
        progress.warn(&format!(
            "No files with extensions [{}] found in {}",
            config.movie_exts.join(", "),
            target.display()
        ));
        RunReport::new(config.action)
    } else {
        progress.scan_complete(movies.len(), target);
        let client = TmdbClient::new(config_from_env())?;
        Pipeline::new(&config, &client).run(&movies, &mut progress)
    };

    info!(
        "Done: {} placed, {} skipped, {} failed, {} unmatched",
        report.placed_count(),
        report.skipped_count(),
        report.failed_count(),
        report.unmatched_count()
    );

    display_run_report(&report, &mut stdout)
        .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))
}
