use std::path::PathBuf;

use crate::config::Action;
use crate::parser::ParsedCandidate;

/// Where a movie and its subtitles should end up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationPlan {
    pub movie_destination: PathBuf,
    /// (source, destination) pairs in discovery order
    pub subtitle_destinations: Vec<(PathBuf, PathBuf)>,
}

/// Result of placing a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// Test action: the file would be placed here
    WouldPlace,
    Copied,
    Moved,
    /// The source disappeared between discovery and placement
    SourceMissing,
    /// The destination exists and overwriting is disabled
    DestinationExists,
    /// Source and destination are the same file
    AlreadyInPlace,
    Failed(String),
}

impl PlacementOutcome {
    pub fn description(&self) -> String {
        match self {
            PlacementOutcome::WouldPlace => "would place".to_string(),
            PlacementOutcome::Copied => "copied".to_string(),
            PlacementOutcome::Moved => "moved".to_string(),
            PlacementOutcome::SourceMissing => "source not found, skipped".to_string(),
            PlacementOutcome::DestinationExists => "destination exists, skipped".to_string(),
            PlacementOutcome::AlreadyInPlace => "already in place".to_string(),
            PlacementOutcome::Failed(msg) => format!("failed: {}", msg),
        }
    }

    /// Whether the file was (or in test mode, would be) placed
    pub fn is_placed(&self) -> bool {
        matches!(
            self,
            PlacementOutcome::WouldPlace | PlacementOutcome::Copied | PlacementOutcome::Moved
        )
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, PlacementOutcome::Failed(_))
    }
}

/// A single file placement and its outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub outcome: PlacementOutcome,
    pub is_subtitle: bool,
}

impl PlacedFile {
    pub fn source_name(&self) -> String {
        file_name(&self.source)
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// What happened to one discovered movie file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Processed {
        plan: DestinationPlan,
        placements: Vec<PlacedFile>,
    },
    NoResults,
    LookupFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub source: PathBuf,
    pub candidate: ParsedCandidate,
    pub status: FileStatus,
}

impl FileReport {
    pub fn placements(&self) -> &[PlacedFile] {
        match &self.status {
            FileStatus::Processed { placements, .. } => placements,
            _ => &[],
        }
    }
}

/// Result of a whole run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub action: Action,
    pub files: Vec<FileReport>,
}

impl RunReport {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            files: Vec::new(),
        }
    }

    pub fn add_file(&mut self, report: FileReport) {
        self.files.push(report);
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn placed_count(&self) -> usize {
        self.all_placements().filter(|p| p.outcome.is_placed()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.all_placements()
            .filter(|p| !p.outcome.is_placed() && !p.outcome.is_failure())
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.all_placements().filter(|p| p.outcome.is_failure()).count()
    }

    pub fn unmatched_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| !matches!(f.status, FileStatus::Processed { .. }))
            .count()
    }

    fn all_placements(&self) -> impl Iterator<Item = &PlacedFile> {
        self.files.iter().flat_map(|f| f.placements().iter())
    }
}
