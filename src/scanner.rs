use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Subdirectories searched for subtitles, after the movie's own directory
pub const SUBTITLE_DIRS: [&str; 2] = ["Subs", "Subtitles"];

/// Normalize configured extensions: lowercase, no leading dot
pub fn normalize_extensions<S: AsRef<str>>(extensions: &[S]) -> Vec<String> {
    extensions
        .iter()
        .map(|e| e.as_ref().trim().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Case-insensitive extension check against a normalized set
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Find movie files at `target`.
///
/// A file is returned alone if its extension matches. A directory is walked
/// recursively and matches are returned sorted by path. Anything else, including
/// a path that does not exist, yields an empty list.
pub fn find_movie_files(target: &Path, extensions: &[String]) -> Vec<PathBuf> {
    debug!(path = ?target, "Scanning for movie files");

    if target.is_file() {
        return if has_extension(target, extensions) {
            vec![target.to_path_buf()]
        } else {
            trace!(path = ?target, "Skipping file with unrecognized extension");
            Vec::new()
        };
    }

    if !target.is_dir() {
        debug!(path = ?target, "Path is neither a file nor a directory");
        return Vec::new();
    }

    let mut movies = Vec::new();

    for entry in WalkDir::new(target).follow_links(true) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        trace!(entry = ?path, "Examining entry");

        if entry.file_type().is_file() && has_extension(path, extensions) {
            debug!(path = ?path, "Found movie file");
            movies.push(path.to_path_buf());
        }
    }

    movies.sort();

    debug!(count = movies.len(), "Scan complete");

    movies
}

/// Find subtitle files that belong to `movie_file` by directory proximity.
///
/// Searches the movie's directory, then its `Subs` and `Subtitles`
/// subdirectories, non-recursively. A file reachable from more than one search
/// root (e.g. through a symlink) is returned once.
pub fn find_subtitle_files(movie_file: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let parent = match movie_file.parent() {
        Some(p) if p.as_os_str().is_empty() => Path::new("."),
        Some(p) => p,
        None => return Vec::new(),
    };

    let mut search_dirs = vec![parent.to_path_buf()];
    search_dirs.extend(SUBTITLE_DIRS.iter().map(|d| parent.join(d)));

    let mut seen = HashSet::new();
    let mut subtitles = Vec::new();

    for dir in search_dirs {
        if !dir.is_dir() {
            trace!(dir = ?dir, "Subtitle directory does not exist");
            continue;
        }

        let read_dir = match fs::read_dir(&dir) {
            Ok(r) => r,
            Err(e) => {
                debug!(dir = ?dir, "Cannot read subtitle directory: {}", e);
                continue;
            }
        };

        let mut found: Vec<PathBuf> = read_dir
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && has_extension(path, extensions))
            .collect();
        found.sort();

        for path in found {
            let identity = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
            if seen.insert(identity) {
                debug!(subtitle = ?path, "Found subtitle");
                subtitles.push(path);
            } else {
                trace!(subtitle = ?path, "Skipping duplicate subtitle");
            }
        }
    }

    subtitles
}
