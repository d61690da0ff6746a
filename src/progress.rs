//! Progress output for user-facing status updates.
//!
//! In verbose mode, output is suppressed since tracing handles everything.
//! In normal mode, output is shown with colors to give feedback while lookups
//! and file operations run.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::parser::ParsedCandidate;
use crate::rename::{PlacedFile, PlacementOutcome};
use crate::resolver::MovieMatch;

/// Progress reporter for user-facing output
pub struct Progress {
    writer: Box<dyn Write>,
    /// When true, all output is suppressed (verbose mode uses tracing instead)
    silent: bool,
    /// When true, output is colorized
    colors_enabled: bool,
}

/// Check if we should use colors in output
pub fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    io::stderr().is_terminal()
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress {
    /// Create a new progress reporter writing to stderr
    pub fn new() -> Self {
        Self::new_with_ui(false, should_use_colors())
    }

    /// When verbose=true, output is suppressed (tracing handles it)
    pub fn new_with_ui(verbose: bool, colors_enabled: bool) -> Self {
        if !colors_enabled {
            colored::control::set_override(false);
        }
        Self {
            writer: Box::new(io::stderr()),
            silent: verbose,
            colors_enabled,
        }
    }

    /// Create a progress reporter with a custom writer (for testing)
    #[cfg(test)]
    pub fn with_writer(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            silent: false,
            colors_enabled: false,
        }
    }

    /// Report the result of movie discovery
    pub fn scan_complete(&mut self, count: usize, path: &Path) {
        if self.silent {
            return;
        }
        let msg = format!("Found {} movie file(s) in {}", count, path.display());
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", msg.bold());
        } else {
            let _ = writeln!(self.writer, "{}", msg);
        }
    }

    /// Report the start of processing for one movie file
    pub fn file_start(&mut self, current: usize, total: usize, name: &str) {
        if self.silent {
            return;
        }
        let counter = format!("[{}/{}]", current, total);
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", counter.cyan(), name);
        } else {
            let _ = writeln!(self.writer, "{} {}", counter, name);
        }
    }

    /// Report the start of a lookup (completed on the same line)
    pub fn lookup_start(&mut self, candidate: &ParsedCandidate) {
        if self.silent {
            return;
        }
        let msg = format!(
            "  Searching \"{}\" ({})...",
            candidate.title,
            candidate.year_or_unknown()
        );
        if self.colors_enabled {
            let _ = write!(self.writer, "{}", msg.dimmed());
        } else {
            let _ = write!(self.writer, "{}", msg);
        }
        let _ = self.writer.flush();
    }

    /// Report the selected match (same line)
    pub fn lookup_complete(&mut self, movie: &MovieMatch) {
        if self.silent {
            return;
        }
        let msg = format!("{} ({})", movie.canonical_title, movie.release_year);
        if self.colors_enabled {
            let _ = writeln!(self.writer, " {}", msg.green());
        } else {
            let _ = writeln!(self.writer, " {}", msg);
        }
    }

    /// Report an empty lookup (same line)
    pub fn no_results(&mut self) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(self.writer, " {}", "no results, skipped".yellow());
        } else {
            let _ = writeln!(self.writer, " no results, skipped");
        }
    }

    /// Report a failed lookup (same line)
    pub fn lookup_failed(&mut self, message: &str) {
        if self.silent {
            return;
        }
        let msg = format!("lookup failed, skipped: {}", message);
        if self.colors_enabled {
            let _ = writeln!(self.writer, " {}", msg.red());
        } else {
            let _ = writeln!(self.writer, " {}", msg);
        }
    }

    /// Report the outcome of a single placement
    pub fn placement(&mut self, placed: &PlacedFile) {
        if self.silent {
            return;
        }
        let from = placed.source_name();
        let to = placed.destination.display().to_string();
        let outcome = placed.outcome.description();

        if self.colors_enabled {
            let outcome = match &placed.outcome {
                o if o.is_placed() => outcome.green(),
                PlacementOutcome::Failed(_) => outcome.red(),
                _ => outcome.yellow(),
            };
            let _ = writeln!(
                self.writer,
                "  {} {} {} ({})",
                from.dimmed(),
                "→".cyan(),
                to,
                outcome
            );
        } else {
            let _ = writeln!(self.writer, "  {} -> {} ({})", from, to, outcome);
        }
    }

    /// Report a non-fatal problem
    pub fn warn(&mut self, message: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), message.yellow());
        } else {
            let _ = writeln!(self.writer, "Warning: {}", message);
        }
    }
}
