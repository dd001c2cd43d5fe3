//! Resource implementations.

use crate::docs::catalog::{EXAMPLES, METHODS};
use crate::docs::changelog::Changelog;
use crate::docs::reference;
use crate::error::ToolError;
use crate::mcp::registry::Resource;

const MARKDOWN: &str = "text/markdown";

/// `docs://config-reference`
pub struct ConfigReferenceResource;

impl Resource for ConfigReferenceResource {
    fn name(&self) -> &str {
        "Configuration reference"
    }

    fn description(&self) -> &str {
        "Every configuration file key with its type, default and meaning"
    }

    fn mime_type(&self) -> &str {
        MARKDOWN
    }

    fn content(&self) -> Result<String, ToolError> {
        Ok(reference::render_reference())
    }
}

/// `docs://changelog`: the changelog file, read on every access.
pub struct ChangelogResource {
    changelog: Changelog,
}

impl ChangelogResource {
    /// Creates the resource over `changelog`.
    #[must_use]
    pub const fn new(changelog: Changelog) -> Self {
        Self { changelog }
    }
}

impl Resource for ChangelogResource {
    fn name(&self) -> &str {
        "Changelog"
    }

    fn description(&self) -> &str {
        "The project changelog, newest release first"
    }

    fn mime_type(&self) -> &str {
        MARKDOWN
    }

    fn content(&self) -> Result<String, ToolError> {
        self.changelog.read()
    }
}

/// `docs://examples`: index of built-in example topics.
pub struct ExamplesResource;

impl Resource for ExamplesResource {
    fn name(&self) -> &str {
        "Examples"
    }

    fn description(&self) -> &str {
        "Index of worked examples available through docs_get_example"
    }

    fn mime_type(&self) -> &str {
        MARKDOWN
    }

    fn content(&self) -> Result<String, ToolError> {
        let topics: Vec<_> = EXAMPLES
            .iter()
            .map(|e| format!("- `{}`: {}", e.topic, e.title))
            .collect();
        Ok(format!("# Examples\n\n{}", topics.join("\n")))
    }
}

/// `docs://methods`: the protocol method reference.
pub struct MethodsResource;

impl Resource for MethodsResource {
    fn name(&self) -> &str {
        "Method reference"
    }

    fn description(&self) -> &str {
        "The JSON-RPC methods this server answers, with params and result shapes"
    }

    fn mime_type(&self) -> &str {
        MARKDOWN
    }

    fn content(&self) -> Result<String, ToolError> {
        let sections: Vec<_> = METHODS.iter().map(|m| m.render()).collect();
        Ok(format!("# Method reference\n\n{}", sections.join("\n\n")))
    }
}
