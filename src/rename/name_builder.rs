use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::resolver::MovieMatch;

use super::types::DestinationPlan;

pub const DEFAULT_MOVIE_FORMAT: &str = "{n} ({y})";

/// Errors in a destination format template
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("movie format is empty")]
    Empty,

    #[error("movie format is missing the {{{0}}} placeholder")]
    MissingPlaceholder(char),

    #[error("movie format has unknown placeholder {{{0}}}")]
    UnknownPlaceholder(String),

    #[error("movie format has an unclosed '{{' at position {0}")]
    UnclosedBrace(usize),

    #[error("movie format has an unmatched '}}' at position {0}")]
    UnmatchedBrace(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Title,
    Year,
}

/// Validated destination template with `{n}` (title) and `{y}` (year).
///
/// `{{` and `}}` are literal braces. A trailing extension in the template
/// (e.g. `"{n} ({y}).avi"`) is dropped: destinations always take the source
/// file's extension.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct MovieFormat {
    template: String,
    segments: Vec<Segment>,
}

impl MovieFormat {
    pub fn parse(template: &str) -> Result<Self, FormatError> {
        if template.trim().is_empty() {
            return Err(FormatError::Empty);
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, inner) in chars.by_ref() {
                        if inner == '}' {
                            closed = true;
                            break;
                        }
                        name.push(inner);
                    }
                    if !closed {
                        return Err(FormatError::UnclosedBrace(pos));
                    }

                    let segment = match name.as_str() {
                        "n" => Segment::Title,
                        "y" => Segment::Year,
                        _ => return Err(FormatError::UnknownPlaceholder(name)),
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(FormatError::UnmatchedBrace(pos)),
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            let trimmed = strip_literal_extension(&literal);
            if !trimmed.is_empty() {
                segments.push(Segment::Literal(trimmed.to_string()));
            }
        }

        if !segments.contains(&Segment::Title) {
            return Err(FormatError::MissingPlaceholder('n'));
        }
        if !segments.contains(&Segment::Year) {
            return Err(FormatError::MissingPlaceholder('y'));
        }

        Ok(Self {
            template: template.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Substitute title and year; values are sanitized so they cannot add
    /// path components
    pub fn render(&self, title: &str, year: &str) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Title => sanitize_filename(title),
                Segment::Year => sanitize_filename(year),
            })
            .collect()
    }
}

impl Default for MovieFormat {
    fn default() -> Self {
        Self {
            template: DEFAULT_MOVIE_FORMAT.to_string(),
            segments: vec![
                Segment::Title,
                Segment::Literal(" (".to_string()),
                Segment::Year,
                Segment::Literal(")".to_string()),
            ],
        }
    }
}

impl TryFrom<String> for MovieFormat {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for MovieFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

fn strip_literal_extension(literal: &str) -> &str {
    match literal.rfind('.') {
        Some(idx) => {
            let ext = &literal[idx + 1..];
            if (1..=4).contains(&ext.len()) && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
                &literal[..idx]
            } else {
                literal
            }
        }
        None => literal,
    }
}

/// Replace characters that are invalid in file names on common filesystems
fn sanitize_filename(name: &str) -> String {
    let invalid_chars = ['/', '\\', '*', '?', '"', '<', '>', '|'];

    name.chars()
        .flat_map(|c| match c {
            ':' => vec![' ', '-'],
            c if invalid_chars.contains(&c) || c.is_control() => vec!['_'],
            c => vec![c],
        })
        .collect()
}

/// Compute the destination for a movie.
///
/// The result always ends in `original_ext`. Relative templates are placed
/// under `base_dir`.
pub fn build_destination(
    movie: &MovieMatch,
    format: &MovieFormat,
    original_ext: &str,
    base_dir: &Path,
) -> PathBuf {
    let mut name = format.render(&movie.canonical_title, &movie.release_year);

    let ext = original_ext.trim_start_matches('.');
    if !ext.is_empty() {
        name.push('.');
        name.push_str(ext);
    }

    base_dir.join(name)
}

/// Destination for a subtitle: the movie destination with the subtitle's own
/// extension
pub fn subtitle_destination(movie_destination: &Path, subtitle_source: &Path) -> PathBuf {
    match subtitle_source.extension() {
        Some(ext) => movie_destination.with_extension(ext),
        None => movie_destination.with_extension(""),
    }
}

/// Build the full plan for a movie and its subtitles
pub fn build_plan(
    movie: &MovieMatch,
    format: &MovieFormat,
    movie_source: &Path,
    subtitles: &[PathBuf],
    base_dir: &Path,
) -> DestinationPlan {
    let original_ext = movie_source
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default();

    let movie_destination = build_destination(movie, format, &original_ext, base_dir);

    let mut subtitle_destinations: Vec<(PathBuf, PathBuf)> = Vec::new();
    for subtitle in subtitles {
        let destination = subtitle_destination(&movie_destination, subtitle);
        if subtitle_destinations.iter().any(|(_, d)| d == &destination) {
            warn!("Multiple subtitles map to {}", destination.display());
        }
        subtitle_destinations.push((subtitle.clone(), destination));
    }

    DestinationPlan {
        movie_destination,
        subtitle_destinations,
    }
}
