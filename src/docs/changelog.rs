//! Changelog parsing.
//!
//! Understands the "Keep a Changelog" layout: one `## ` heading per version,
//! newest first, optionally bracketed and followed by a date.
//!
//! ```text
//! ## [Unreleased]
//! ## [1.2.0] - 2024-03-01
//! ## 1.1.0
//! ```

use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ToolError;

/// Version label used for changes not yet released.
pub const UNRELEASED: &str = "Unreleased";

fn heading_regex() -> &'static Regex {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    HEADING.get_or_init(|| {
        Regex::new(r"^##\s+\[?([^\]\s]+)\]?(?:\s*[-–]\s*(\S.*?))?\s*$")
            .expect("changelog heading pattern is a valid regex")
    })
}

/// One version section of a changelog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    /// Version label as written, without brackets.
    pub version: String,
    /// Release date, if the heading has one.
    pub date: Option<String>,
    /// Section text below the heading, trimmed.
    pub body: String,
}

impl ChangelogEntry {
    /// Returns `true` if `version` names this entry.
    ///
    /// Comparison ignores ASCII case and a leading `v`.
    #[must_use]
    pub fn matches(&self, version: &str) -> bool {
        let normalise = |v: &str| {
            let v = v.trim();
            v.strip_prefix(['v', 'V']).unwrap_or(v).to_ascii_lowercase()
        };
        normalise(&self.version) == normalise(version)
    }

    /// Returns `true` for the unreleased section.
    #[must_use]
    pub fn is_unreleased(&self) -> bool {
        self.version.eq_ignore_ascii_case(UNRELEASED)
    }

    /// Renders the entry back as Markdown.
    #[must_use]
    pub fn render(&self) -> String {
        let heading = match &self.date {
            Some(date) => format!("## [{}] - {date}", self.version),
            None => format!("## [{}]", self.version),
        };
        if self.body.is_empty() {
            heading
        } else {
            format!("{heading}\n\n{}", self.body)
        }
    }
}

/// Splits changelog text into version entries, in file order.
///
/// Text before the first version heading is ignored.
#[must_use]
pub fn parse_changelog(text: &str) -> Vec<ChangelogEntry> {
    let mut entries = Vec::new();
    let mut current: Option<(ChangelogEntry, Vec<&str>)> = None;

    for line in text.lines() {
        if let Some(caps) = heading_regex().captures(line) {
            if let Some((entry, body)) = current.take() {
                entries.push(finish(entry, &body));
            }
            let entry = ChangelogEntry {
                version: caps[1].to_string(),
                date: caps.get(2).map(|m| m.as_str().to_string()),
                body: String::new(),
            };
            current = Some((entry, Vec::new()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }

    if let Some((entry, body)) = current {
        entries.push(finish(entry, &body));
    }

    entries
}

fn finish(mut entry: ChangelogEntry, body: &[&str]) -> ChangelogEntry {
    entry.body = body.join("\n").trim().to_string();
    entry
}

/// A changelog file on disk, re-read on every access.
#[derive(Debug, Clone)]
pub struct Changelog {
    path: PathBuf,
}

impl Changelog {
    /// Creates a handle for the changelog at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the raw changelog text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read(&self) -> Result<String, ToolError> {
        std::fs::read_to_string(&self.path).map_err(|e| ToolError::Source {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Reads and parses the changelog.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn entries(&self) -> Result<Vec<ChangelogEntry>, ToolError> {
        Ok(parse_changelog(&self.read()?))
    }
}

/// Picks the newest released entry, falling back to the first entry.
#[must_use]
pub fn latest(entries: &[ChangelogEntry]) -> Option<&ChangelogEntry> {
    entries
        .iter()
        .find(|e| !e.is_unreleased())
        .or_else(|| entries.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# Changelog

All notable changes are documented here.

## [Unreleased]

- Streaming search results

## [1.2.0] - 2024-03-01

### Added
- `docs_search_changelog` tool

## v1.1.0

- Initial release
";

    #[test]
    fn heading_pattern_accepts_common_forms() {
        let re = heading_regex();
        assert!(re.is_match("## [1.2.0] - 2024-03-01"));
        assert!(re.is_match("## 1.1.0"));
        assert!(re.is_match("## [Unreleased]"));
        assert!(!re.is_match("### Added"));
        assert!(!re.is_match("# Changelog"));
    }

    #[test]
    fn parses_all_sections() {
        let entries = parse_changelog(SAMPLE);
        let versions: Vec<_> = entries.iter().map(|e| e.version.as_str()).collect();
        assert_eq!(versions, vec!["Unreleased", "1.2.0", "v1.1.0"]);
        assert_eq!(entries[1].date.as_deref(), Some("2024-03-01"));
        assert_eq!(entries[0].date, None);
        assert_eq!(entries[2].body, "- Initial release");
    }

    #[test]
    fn preamble_is_ignored() {
        let entries = parse_changelog(SAMPLE);
        assert!(entries.iter().all(|e| !e.body.contains("notable")));
    }

    #[test]
    fn subsection_headings_stay_in_body() {
        let entries = parse_changelog(SAMPLE);
        assert!(entries[1].body.starts_with("### Added"));
    }

    #[test]
    fn version_matching_ignores_prefix_and_case() {
        let entries = parse_changelog(SAMPLE);
        assert!(entries[2].matches("1.1.0"));
        assert!(entries[1].matches("V1.2.0"));
        assert!(entries[0].matches("unreleased"));
        assert!(!entries[1].matches("1.2"));
    }

    #[test]
    fn latest_skips_unreleased() {
        let entries = parse_changelog(SAMPLE);
        assert_eq!(latest(&entries).unwrap().version, "1.2.0");

        let only_unreleased = parse_changelog("## [Unreleased]\n- wip\n");
        assert_eq!(latest(&only_unreleased).unwrap().version, "Unreleased");

        assert!(latest(&[]).is_none());
    }

    #[test]
    fn render_round_trips_heading() {
        let entries = parse_changelog(SAMPLE);
        let rendered = entries[1].render();
        assert!(rendered.starts_with("## [1.2.0] - 2024-03-01\n\n### Added"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let changelog = Changelog::new("/no/such/CHANGELOG.md");
        assert!(matches!(changelog.entries(), Err(ToolError::Source { .. })));
    }
}
