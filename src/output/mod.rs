use crate::config::Action;
use crate::demo::{DemoEntry, DemoLookup};
use crate::rename::{FileStatus, RunReport};
use std::io::{self, Write};

/// Display the results of a run
pub fn display_run_report(report: &RunReport, writer: &mut impl Write) -> io::Result<()> {
    if report.action == Action::Test {
        writeln!(writer)?;
        writeln!(writer, "========================================")?;
        writeln!(writer, "              TEST RUN")?;
        writeln!(writer, "========================================")?;
    }

    writeln!(writer)?;
    writeln!(writer, "Action:      {}", report.action)?;
    writeln!(writer, "Movie files: {}", report.len())?;
    writeln!(writer)?;

    if report.is_empty() {
        writeln!(writer, "No movie files to rename.")?;
        return Ok(());
    }

    for (i, file) in report.files.iter().enumerate() {
        writeln!(writer, "  {}. {}", i + 1, file.source.display())?;

        match &file.status {
            FileStatus::NoResults => {
                writeln!(
                    writer,
                    "     No results for \"{}\" ({})",
                    file.candidate.title,
                    file.candidate.year_or_unknown()
                )?;
            }
            FileStatus::LookupFailed(msg) => {
                writeln!(writer, "     Lookup failed: {}", msg)?;
            }
            FileStatus::Processed { placements, .. } => {
                for placed in placements {
                    let label = if placed.is_subtitle { "Sub:" } else { "To: " };
                    writeln!(
                        writer,
                        "     {} {} [{}]",
                        label,
                        placed.destination.display(),
                        placed.outcome.description()
                    )?;
                }
            }
        }

        writeln!(writer)?;
    }

    writeln!(writer, "----------------------------------------")?;
    writeln!(writer, "Summary:")?;

    let verb = match report.action {
        Action::Test => "would be placed",
        Action::Copy => "copied",
        Action::Move => "moved",
    };
    writeln!(writer, "  {} files {}", report.placed_count(), verb)?;

    let skipped = report.skipped_count();
    if skipped > 0 {
        writeln!(writer, "  {} files skipped", skipped)?;
    }

    let failed = report.failed_count();
    if failed > 0 {
        writeln!(writer, "  {} files failed", failed)?;
    }

    let unmatched = report.unmatched_count();
    if unmatched > 0 {
        writeln!(writer, "  {} movies without a match", unmatched)?;
    }

    if report.action == Action::Test {
        writeln!(writer)?;
        writeln!(
            writer,
            "Set action = \"copy\" or \"move\" in the configuration to apply these changes."
        )?;
    }

    Ok(())
}

/// Display the sample-name demo in a simple table
pub fn display_demo(entries: &[DemoEntry], writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "No path given, running on sample file names.")?;
    writeln!(writer)?;

    for entry in entries {
        writeln!(writer, "{}", entry.filename)?;
        writeln!(
            writer,
            "  Parsed: \"{}\" ({})",
            entry.candidate.title,
            entry.candidate.year_or_unknown()
        )?;

        match &entry.lookup {
            DemoLookup::Skipped => {}
            DemoLookup::NoResults => writeln!(writer, "  Lookup: no results")?,
            DemoLookup::Failed(msg) => writeln!(writer, "  Lookup: failed ({})", msg)?,
            DemoLookup::Named(name) => writeln!(writer, "  Rename: {}", name.display())?,
        }
    }

    if entries.iter().all(|e| e.lookup == DemoLookup::Skipped) {
        writeln!(writer)?;
        writeln!(writer, "Set TMDB_API_KEY to also look up each title.")?;
    }

    Ok(())
}
