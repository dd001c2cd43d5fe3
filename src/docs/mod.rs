//! Documentation sources served by the MCP capabilities.
//!
//! - [`corpus`]: Markdown/text files under a directory
//! - [`changelog`]: the changelog file, split into version sections
//! - [`catalog`]: built-in examples and protocol method reference
//! - [`reference`]: configuration reference
//!
//! Everything here is read-only: files are re-read on each access, tables
//! are compile-time constants.

pub mod catalog;
pub mod changelog;
pub mod corpus;
pub mod reference;

pub use catalog::{Example, MethodDoc};
pub use changelog::{Changelog, ChangelogEntry};
pub use corpus::{DocCorpus, SearchHit};

use crate::config::Config;

/// The on-disk documentation sources named by the configuration.
#[derive(Debug, Clone)]
pub struct DocSources {
    /// Documentation corpus.
    pub corpus: DocCorpus,
    /// Changelog file.
    pub changelog: Changelog,
    /// Default search result limit.
    pub max_results: usize,
}

impl DocSources {
    /// Builds the sources described by `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            corpus: DocCorpus::new(&config.docs_path, config.search.extensions.clone()),
            changelog: Changelog::new(&config.changelog_path),
            max_results: config.search.max_results,
        }
    }
}
