//! Sample run over built-in release names, used when no path is given.
//!
//! Nothing on disk is read or written: each name is parsed and, when a lookup
//! client is available, resolved and named.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::api::MovieLookup;
use crate::config::Config;
use crate::parser::{parse_filename, ParsedCandidate};
use crate::rename::build_destination;
use crate::resolver::resolve;

pub const SAMPLE_FILENAMES: &[&str] = &[
    "The.Matrix.1999.1080p.BluRay.x264.YIFY.mp4",
    "Avatar-2009-EXTENDED-1080p-BluRay-x264.mp4",
    "Fight Club (1999) [1080p].mkv",
    "inception_2010_720p_brrip.avi",
    "NoYearHere.mp4",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoLookup {
    /// No lookup client was available
    Skipped,
    NoResults,
    Failed(String),
    Named(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoEntry {
    pub filename: String,
    pub candidate: ParsedCandidate,
    pub lookup: DemoLookup,
}

pub fn run_demo(config: &Config, lookup: Option<&dyn MovieLookup>) -> Vec<DemoEntry> {
    SAMPLE_FILENAMES
        .iter()
        .map(|filename| {
            let candidate = parse_filename(filename);
            debug!(filename, title = %candidate.title, "Demo candidate");

            let lookup = match lookup {
                None => DemoLookup::Skipped,
                Some(lookup) => match resolve(&candidate, lookup) {
                    Ok(Some(movie)) => {
                        let ext = Path::new(filename)
                            .extension()
                            .map(|e| e.to_string_lossy().to_string())
                            .unwrap_or_default();
                        DemoLookup::Named(build_destination(
                            &movie,
                            &config.movie_format,
                            &ext,
                            Path::new(""),
                        ))
                    }
                    Ok(None) => DemoLookup::NoResults,
                    Err(e) => DemoLookup::Failed(e.to_string()),
                },
            };

            DemoEntry {
                filename: filename.to_string(),
                candidate,
                lookup,
            }
        })
        .collect()
}
