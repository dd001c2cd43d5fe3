//! Configuration reference.

/// One configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigOption {
    /// Dotted key path.
    pub key: &'static str,
    /// JSON type.
    pub kind: &'static str,
    /// Default value as JSON text.
    pub default: &'static str,
    /// What the key controls.
    pub description: &'static str,
}

impl ConfigOption {
    fn render(&self) -> String {
        format!(
            "- `{}` ({}, default `{}`): {}",
            self.key, self.kind, self.default, self.description
        )
    }
}

/// Every recognised configuration key.
pub const CONFIG_OPTIONS: &[ConfigOption] = &[
    ConfigOption {
        key: "docs_path",
        kind: "string",
        default: "\"docs\"",
        description: "Directory searched by `docs_search_docs`. Relative paths resolve \
                      against the working directory.",
    },
    ConfigOption {
        key: "changelog_path",
        kind: "string",
        default: "\"CHANGELOG.md\"",
        description: "Changelog file served by `docs_get_changelog`, \
                      `docs_search_changelog` and `docs://changelog`.",
    },
    ConfigOption {
        key: "search.max_results",
        kind: "integer",
        default: "20",
        description: "Maximum matching lines returned when a search gives no `limit`. \
                      Must be greater than zero.",
    },
    ConfigOption {
        key: "search.extensions",
        kind: "array of string",
        default: "[\"md\", \"txt\"]",
        description: "File extensions, without the dot, included in the documentation corpus.",
    },
    ConfigOption {
        key: "logging.level",
        kind: "string",
        default: "\"warn\"",
        description: "One of trace, debug, info, warn, error. `-v` flags and `RUST_LOG` \
                      take precedence.",
    },
];

/// Options whose key contains `filter`, ignoring case. `None` keeps all.
#[must_use]
pub fn matching_options(filter: Option<&str>) -> Vec<&'static ConfigOption> {
    let filter = filter.map(str::to_lowercase);
    CONFIG_OPTIONS
        .iter()
        .filter(|opt| {
            filter
                .as_deref()
                .map_or(true, |f| opt.key.to_lowercase().contains(f))
        })
        .collect()
}

/// Renders options as a Markdown list.
#[must_use]
pub fn render_options(options: &[&ConfigOption]) -> String {
    options
        .iter()
        .map(|opt| opt.render())
        .collect::<Vec<_>>()
        .join("\n")
}

/// The full reference as a Markdown document.
#[must_use]
pub fn render_reference() -> String {
    format!(
        "# Configuration reference\n\n\
         The configuration file is JSON. It is read from the path given on the command \
         line, or from `~/.docs-mcp/config.json` when present. Unknown keys are rejected.\n\n{}",
        render_options(&matching_options(None))
    )
}
