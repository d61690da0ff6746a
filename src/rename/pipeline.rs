use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::api::MovieLookup;
use crate::config::Config;
use crate::parser::parse_filename;
use crate::progress::Progress;
use crate::resolver::resolve;
use crate::scanner::find_subtitle_files;

use super::name_builder::build_plan;
use super::placer::Placer;
use super::types::{FileReport, FileStatus, PlacementOutcome, RunReport};

/// Parse, resolve, name and place movie files one at a time.
///
/// A lookup that fails or finds nothing skips only that file; the rest of the
/// batch is still processed. Files this pipeline has already written are never
/// picked up again as another movie's subtitles.
pub struct Pipeline<'a> {
    config: &'a Config,
    lookup: &'a dyn MovieLookup,
    placer: Placer,
    written: RefCell<HashSet<PathBuf>>,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config, lookup: &'a dyn MovieLookup) -> Self {
        Self {
            config,
            lookup,
            placer: Placer::from_config(config),
            written: RefCell::new(HashSet::new()),
        }
    }

    /// Process every movie file in order
    pub fn run(&self, movies: &[PathBuf], progress: &mut Progress) -> RunReport {
        let mut report = RunReport::new(self.placer.action());
        let total = movies.len();

        info!(
            "Processing {} movie files (action: {})",
            total,
            self.placer.action()
        );

        for (i, movie) in movies.iter().enumerate() {
            progress.file_start(i + 1, total, &display_name(movie));
            report.add_file(self.process_file(movie, progress));
        }

        report
    }

    /// Run the full pipeline for one movie file
    pub fn process_file(&self, movie: &Path, progress: &mut Progress) -> FileReport {
        let candidate = parse_filename(&display_name(movie));
        debug!(
            file = ?movie,
            title = %candidate.title,
            year = %candidate.year_or_unknown(),
            "Parsed movie file name"
        );

        if !candidate.has_year() {
            debug!("No year in file name, searching by title only");
        }

        progress.lookup_start(&candidate);

        let movie_match = match resolve(&candidate, self.lookup) {
            Ok(Some(m)) => m,
            Ok(None) => {
                progress.no_results();
                return FileReport {
                    source: movie.to_path_buf(),
                    candidate,
                    status: FileStatus::NoResults,
                };
            }
            Err(e) => {
                warn!("Lookup failed for {}: {}", movie.display(), e);
                progress.lookup_failed(&e.to_string());
                return FileReport {
                    source: movie.to_path_buf(),
                    candidate,
                    status: FileStatus::LookupFailed(e.to_string()),
                };
            }
        };

        progress.lookup_complete(&movie_match);

        if !movie_match.has_known_year() {
            warn!(
                "No release year known for {:?}, naming it with {:?}",
                movie_match.canonical_title, movie_match.release_year
            );
        }

        let mut subtitles = if self.config.subtitles.enabled {
            find_subtitle_files(movie, &self.config.subtitles.exts)
        } else {
            Vec::new()
        };
        {
            let written = self.written.borrow();
            subtitles.retain(|sub| {
                let claimed = written.contains(sub);
                if claimed {
                    debug!(subtitle = ?sub, "Already placed for another movie, skipping");
                }
                !claimed
            });
        }

        let base_dir = self
            .config
            .output_dir
            .clone()
            .unwrap_or_else(|| parent_dir(movie));

        let plan = build_plan(
            &movie_match,
            &self.config.movie_format,
            movie,
            &subtitles,
            &base_dir,
        );

        let placements = self.placer.apply(movie, &plan);
        let mut written = self.written.borrow_mut();
        for placed in &placements {
            progress.placement(placed);
            let on_disk = placed.outcome.is_placed()
                || placed.outcome == PlacementOutcome::AlreadyInPlace;
            if on_disk {
                written.insert(placed.destination.clone());
            }
        }

        FileReport {
            source: movie.to_path_buf(),
            candidate,
            status: FileStatus::Processed { plan, placements },
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MovieSearchResult;
    use crate::config::{load_config_from_str, Action};
    use crate::progress::tests::create_test_progress;
    use crate::api::ApiError;
    use crate::resolver::tests::FakeLookup;
    use std::fs;
    use tempfile::tempdir;

    fn config_with(action: Action) -> Config {
        Config {
            action,
            ..Config::default()
        }
    }

    fn matrix_lookup() -> FakeLookup {
        FakeLookup::returning(vec![MovieSearchResult::new("The Matrix", Some("1999-03-30"))])
    }

    /// Answers every search with the queried title itself
    struct EchoLookup;

    impl MovieLookup for EchoLookup {
        fn search_movies(
            &self,
            title: &str,
            _year: Option<&str>,
        ) -> Result<Vec<MovieSearchResult>, ApiError> {
            Ok(vec![MovieSearchResult::new(title, None)])
        }
    }

    #[test]
    fn test_parent_subtitle_wins_over_subs_dir() {
        let dir = tempdir().unwrap();
        let movie = dir.path().join("The.Matrix.1999.mkv");
        fs::write(&movie, "movie").unwrap();
        fs::write(dir.path().join("movie.srt"), "parent").unwrap();
        fs::create_dir(dir.path().join("Subs")).unwrap();
        fs::write(dir.path().join("Subs/en.srt"), "subs").unwrap();

        let config = config_with(Action::Copy);
        let lookup = matrix_lookup();
        let (mut progress, _) = create_test_progress();

        let report = Pipeline::new(&config, &lookup).process_file(&movie, &mut progress);

        let placements = report.placements();
        assert_eq!(placements[1].source, dir.path().join("movie.srt"));
        assert_eq!(placements[1].outcome, PlacementOutcome::Copied);
        assert_eq!(placements[2].source, dir.path().join("Subs/en.srt"));
        assert_eq!(placements[2].outcome, PlacementOutcome::DestinationExists);
        assert_eq!(
            fs::read_to_string(dir.path().join("The Matrix (1999).srt")).unwrap(),
            "parent"
        );
    }

    #[test]
    fn test_placed_subtitle_not_reused_by_next_movie() {
        let dir = tempdir().unwrap();
        let alien = dir.path().join("Alien.1979.mkv");
        let heat = dir.path().join("Heat.1995.mkv");
        fs::write(&alien, "alien").unwrap();
        fs::write(&heat, "heat").unwrap();
        fs::write(dir.path().join("alien.srt"), "alien sub").unwrap();

        let config = config_with(Action::Move);
        let (mut progress, _) = create_test_progress();

        let report = Pipeline::new(&config, &EchoLookup).run(&[alien, heat], &mut progress);

        assert_eq!(report.files[0].placements().len(), 2);
        assert_eq!(report.files[1].placements().len(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("Alien (1979).srt")).unwrap(),
            "alien sub"
        );
        assert!(dir.path().join("Heat (1995).mkv").exists());
        assert!(!dir.path().join("Heat (1995).srt").exists());
    }

    #[test]
    fn test_move_renames_movie_and_subtitles() {
        let dir = tempdir().unwrap();
        let movie = dir.path().join("The.Matrix.1999.1080p.BluRay.x264.YIFY.mkv");
        fs::write(&movie, "movie").unwrap();
        fs::create_dir(dir.path().join("Subs")).unwrap();
        fs::write(dir.path().join("Subs/English.srt"), "sub").unwrap();

        let config = config_with(Action::Move);
        let lookup = matrix_lookup();
        let (mut progress, _) = create_test_progress();

        let report = Pipeline::new(&config, &lookup).process_file(&movie, &mut progress);

        assert!(matches!(report.status, FileStatus::Processed { .. }));
        assert_eq!(report.candidate.title, "The Matrix");
        assert!(!movie.exists());
        assert!(dir.path().join("The Matrix (1999).mkv").exists());
        assert!(dir.path().join("The Matrix (1999).srt").exists());
        assert!(!dir.path().join("Subs/English.srt").exists());
    }

    #[test]
    fn test_no_results_touches_nothing() {
        let dir = tempdir().unwrap();
        let movie = dir.path().join("Unknown.Film.2011.mkv");
        fs::write(&movie, "movie").unwrap();
        fs::write(dir.path().join("Unknown.Film.2011.srt"), "sub").unwrap();

        let config = config_with(Action::Move);
        let lookup = FakeLookup::returning(vec![]);
        let (mut progress, buffer) = create_test_progress();

        let report = Pipeline::new(&config, &lookup).process_file(&movie, &mut progress);

        assert_eq!(report.status, FileStatus::NoResults);
        assert!(report.placements().is_empty());
        assert!(movie.exists());
        assert!(dir.path().join("Unknown.Film.2011.srt").exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(output.contains("no results"));
    }

    #[test]
    fn test_lookup_failure_is_isolated_per_file() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("Heat.1995.mkv");
        let b = dir.path().join("Alien.1979.mkv");
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();

        let config = config_with(Action::Copy);
        let lookup = FakeLookup::failing();
        let (mut progress, _) = create_test_progress();

        let report = Pipeline::new(&config, &lookup).run(&[a.clone(), b.clone()], &mut progress);

        assert_eq!(report.len(), 2);
        assert_eq!(report.unmatched_count(), 2);
        assert!(report
            .files
            .iter()
            .all(|f| matches!(f.status, FileStatus::LookupFailed(_))));
        assert!(a.exists() && b.exists());
    }

    #[test]
    fn test_test_action_reports_plan_only() {
        let dir = tempdir().unwrap();
        let movie = dir.path().join("matrix.mkv");
        fs::write(&movie, "movie").unwrap();
        fs::write(dir.path().join("matrix.srt"), "sub").unwrap();

        let config = config_with(Action::Test);
        let lookup = matrix_lookup();
        let (mut progress, _) = create_test_progress();

        let report = Pipeline::new(&config, &lookup).run(&[movie.clone()], &mut progress);

        assert_eq!(report.placed_count(), 2);
        assert!(report.files[0]
            .placements()
            .iter()
            .all(|p| p.outcome == PlacementOutcome::WouldPlace));
        // Release date fills in the missing year
        assert_eq!(
            report.files[0].placements()[0].destination,
            dir.path().join("The Matrix (1999).mkv")
        );
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_subtitles_disabled() {
        let dir = tempdir().unwrap();
        let movie = dir.path().join("The.Matrix.1999.mkv");
        fs::write(&movie, "movie").unwrap();
        fs::write(dir.path().join("en.srt"), "sub").unwrap();

        let config = load_config_from_str(
            r#"
action = "copy"
[subtitles]
enabled = false
"#,
        )
        .unwrap();
        let lookup = matrix_lookup();
        let (mut progress, _) = create_test_progress();

        let report = Pipeline::new(&config, &lookup).process_file(&movie, &mut progress);

        assert_eq!(report.placements().len(), 1);
        assert!(dir.path().join("The Matrix (1999).mkv").exists());
        assert!(!dir.path().join("The Matrix (1999).srt").exists());
    }

    #[test]
    fn test_output_dir_and_subdirectory_format() {
        let dir = tempdir().unwrap();
        let library = dir.path().join("library");
        let movie = dir.path().join("incoming/The.Matrix.1999.mp4");
        fs::create_dir(dir.path().join("incoming")).unwrap();
        fs::write(&movie, "movie").unwrap();

        let mut config = config_with(Action::Copy);
        config.output_dir = Some(library.clone());
        config.movie_format = crate::rename::MovieFormat::parse("{n} ({y})/{n} ({y})").unwrap();
        let lookup = matrix_lookup();
        let (mut progress, _) = create_test_progress();

        Pipeline::new(&config, &lookup).process_file(&movie, &mut progress);

        assert!(movie.exists());
        assert!(library
            .join("The Matrix (1999)/The Matrix (1999).mp4")
            .exists());
    }
}
