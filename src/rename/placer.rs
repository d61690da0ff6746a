use std::fs::{self, FileTimes, OpenOptions};
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::{Action, Config};

use super::types::{DestinationPlan, PlacedFile, PlacementOutcome};

// EXDEV on Linux and macOS, for targets that don't map it to CrossesDevices
const CROSS_DEVICE_ERROR: i32 = 18;

/// Applies a destination plan according to the configured action.
///
/// Every file is handled independently: a missing source, an existing
/// destination or an I/O failure is reported for that file and the remaining
/// files are still placed. Destinations are never deleted.
#[derive(Debug, Clone, Copy)]
pub struct Placer {
    action: Action,
    overwrite: bool,
}

impl Placer {
    pub fn new(action: Action, overwrite: bool) -> Self {
        Self { action, overwrite }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.action, config.overwrite)
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// Place the movie, then each subtitle in plan order
    pub fn apply(&self, movie_source: &Path, plan: &DestinationPlan) -> Vec<PlacedFile> {
        let mut placed = Vec::with_capacity(1 + plan.subtitle_destinations.len());

        placed.push(self.place(movie_source, &plan.movie_destination, false));

        for (source, destination) in &plan.subtitle_destinations {
            placed.push(self.place(source, destination, true));
        }

        placed
    }

    fn place(&self, source: &Path, destination: &Path, is_subtitle: bool) -> PlacedFile {
        let outcome = self.place_file(source, destination);

        match &outcome {
            PlacementOutcome::Failed(msg) => warn!(
                "Failed to {} {} -> {}: {}",
                self.action,
                source.display(),
                destination.display(),
                msg
            ),
            PlacementOutcome::SourceMissing => warn!(
                "Source not found, skipped: {}",
                source.display()
            ),
            outcome => info!(
                "{}: {} -> {}",
                outcome.description(),
                source.display(),
                destination.display()
            ),
        }

        PlacedFile {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            outcome,
            is_subtitle,
        }
    }

    fn place_file(&self, source: &Path, destination: &Path) -> PlacementOutcome {
        if self.action == Action::Test {
            return PlacementOutcome::WouldPlace;
        }

        if !source.exists() {
            return PlacementOutcome::SourceMissing;
        }

        if destination.exists() {
            if is_same_file(source, destination) {
                return PlacementOutcome::AlreadyInPlace;
            }
            if !self.overwrite {
                return PlacementOutcome::DestinationExists;
            }
            debug!("Overwriting {}", destination.display());
        }

        if let Err(e) = ensure_parent_dir(destination) {
            return PlacementOutcome::Failed(format!("cannot create directory: {}", e));
        }

        let result = match self.action {
            Action::Copy => copy_with_metadata(source, destination).map(|_| PlacementOutcome::Copied),
            Action::Move => move_file(source, destination).map(|_| PlacementOutcome::Moved),
            Action::Test => Ok(PlacementOutcome::WouldPlace),
        };

        result.unwrap_or_else(|e| PlacementOutcome::Failed(e.to_string()))
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            debug!("Creating directory {}", parent.display());
            fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}

/// Copy contents and permissions, then carry over access/modification times
fn copy_with_metadata(source: &Path, destination: &Path) -> io::Result<()> {
    fs::copy(source, destination)?;

    if let Err(e) = copy_file_times(source, destination) {
        warn!(
            "Copied {} but could not preserve timestamps: {}",
            destination.display(),
            e
        );
    }

    Ok(())
}

fn copy_file_times(source: &Path, destination: &Path) -> io::Result<()> {
    let metadata = fs::metadata(source)?;

    let mut times = FileTimes::new().set_modified(metadata.modified()?);
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }

    OpenOptions::new()
        .write(true)
        .open(destination)?
        .set_times(times)
}

/// Rename, falling back to copy + remove across filesystems
fn move_file(source: &Path, destination: &Path) -> io::Result<()> {
    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => {
            debug!("Cross-device move, copying {}", source.display());
            copy_with_metadata(source, destination)?;
            fs::remove_file(source)
        }
        Err(e) => Err(e),
    }
}

fn is_cross_device(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::CrossesDevices
        || (cfg!(unix) && err.raw_os_error() == Some(CROSS_DEVICE_ERROR))
}
