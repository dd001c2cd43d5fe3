//! Documentation corpus: text files under a directory, searched line by line.

use std::path::PathBuf;

use crate::error::ToolError;

/// One matching line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// File path relative to the corpus root.
    pub path: PathBuf,
    /// 1-based line number.
    pub line: usize,
    /// The line, trimmed.
    pub text: String,
}

impl std::fmt::Display for SearchHit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.path.display(), self.line, self.text)
    }
}

/// A directory of documentation files.
#[derive(Debug, Clone)]
pub struct DocCorpus {
    root: PathBuf,
    extensions: Vec<String>,
}

impl DocCorpus {
    /// Creates a corpus rooted at `root`, covering files with the given extensions.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, extensions: Vec<String>) -> Self {
        Self {
            root: root.into(),
            extensions,
        }
    }

    /// Lists corpus files, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is not a directory or a directory entry
    /// cannot be read.
    pub fn files(&self) -> Result<Vec<PathBuf>, ToolError> {
        if !self.root.is_dir() {
            return Err(ToolError::Source {
                path: self.root.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "documentation directory does not exist",
                ),
            });
        }

        let escaped_root = glob::Pattern::escape(&self.root.to_string_lossy());
        let mut files = Vec::new();

        for ext in &self.extensions {
            let pattern = format!("{escaped_root}/**/*.{ext}");
            for entry in glob::glob(&pattern)? {
                let path = entry.map_err(|e| ToolError::Source {
                    path: e.path().to_path_buf(),
                    source: e.into(),
                })?;
                if path.is_file() {
                    files.push(path);
                }
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Case-insensitive substring search across every corpus line.
    ///
    /// Stops after `limit` hits.
    ///
    /// # Errors
    ///
    /// Returns an error if the corpus cannot be listed or a file cannot be read.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, ToolError> {
        let needle = query.to_lowercase();
        let mut hits = Vec::new();

        for path in self.files()? {
            let bytes = std::fs::read(&path).map_err(|e| ToolError::Source {
                path: path.clone(),
                source: e,
            })?;
            let text = String::from_utf8_lossy(&bytes);
            let relative = path.strip_prefix(&self.root).unwrap_or(&path);

            for (index, line) in text.lines().enumerate() {
                if hits.len() >= limit {
                    return Ok(hits);
                }
                if line.to_lowercase().contains(&needle) {
                    hits.push(SearchHit {
                        path: relative.to_path_buf(),
                        line: index + 1,
                        text: line.trim().to_string(),
                    });
                }
            }
        }

        hits.truncate(limit);
        Ok(hits)
    }
}
