//! Tool implementations.
//!
//! Each tool validates its own arguments and returns plain text. A lookup
//! that finds nothing is a normal text answer, not an error.

use serde_json::{json, Map, Value};

use crate::docs::catalog::{self, METHODS};
use crate::docs::changelog::{self, Changelog};
use crate::docs::corpus::DocCorpus;
use crate::docs::reference;
use crate::error::ToolError;
use crate::mcp::registry::Tool;

/// Returns a required, non-empty string argument.
fn required_str<'a>(
    arguments: &'a Map<String, Value>,
    name: &'static str,
) -> Result<&'a str, ToolError> {
    match arguments.get(name) {
        None | Some(Value::Null) => Err(ToolError::MissingArgument { name }),
        Some(Value::String(s)) if s.trim().is_empty() => Err(ToolError::InvalidArgument {
            name,
            message: "must not be empty".to_string(),
        }),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ToolError::InvalidArgument {
            name,
            message: "must be a string".to_string(),
        }),
    }
}

/// Returns an optional string argument.
fn optional_str<'a>(
    arguments: &'a Map<String, Value>,
    name: &'static str,
) -> Result<Option<&'a str>, ToolError> {
    match arguments.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(ToolError::InvalidArgument {
            name,
            message: "must be a string".to_string(),
        }),
    }
}

/// Returns an optional positive integer argument.
fn optional_positive(
    arguments: &Map<String, Value>,
    name: &'static str,
) -> Result<Option<usize>, ToolError> {
    match arguments.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .filter(|n| *n > 0)
            .and_then(|n| usize::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| ToolError::InvalidArgument {
                name,
                message: "must be a positive integer".to_string(),
            }),
    }
}

/// `docs_search_docs`: substring search over the documentation corpus.
pub struct SearchDocs {
    corpus: DocCorpus,
    default_limit: usize,
}

impl SearchDocs {
    /// Creates the tool over `corpus`, capping results at `default_limit`
    /// unless the caller passes `limit`.
    #[must_use]
    pub const fn new(corpus: DocCorpus, default_limit: usize) -> Self {
        Self {
            corpus,
            default_limit,
        }
    }
}

impl Tool for SearchDocs {
    fn description(&self) -> &str {
        "Search the project documentation for a phrase. Matching is a case-insensitive \
         substring search over every line of every documentation file. Returns \
         `path:line: text` for each hit."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Text to search for"
                },
                "limit": {
                    "type": "integer",
                    "description": "Optional: maximum number of matching lines (default from configuration)"
                }
            },
            "required": ["query"]
        })
    }

    fn call(&self, arguments: &Map<String, Value>) -> Result<String, ToolError> {
        let query = required_str(arguments, "query")?;
        let limit = optional_positive(arguments, "limit")?.unwrap_or(self.default_limit);

        let hits = self.corpus.search(query, limit)?;
        if hits.is_empty() {
            return Ok(format!("No matches for '{query}'"));
        }

        Ok(hits
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// `docs_get_changelog`: one version section of the changelog.
pub struct GetChangelog {
    changelog: Changelog,
}

impl GetChangelog {
    /// Creates the tool over `changelog`.
    #[must_use]
    pub const fn new(changelog: Changelog) -> Self {
        Self { changelog }
    }
}

impl Tool for GetChangelog {
    fn description(&self) -> &str {
        "Get the release notes for one version from the changelog. Without a version, \
         returns the newest released version. Use 'Unreleased' for pending changes."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "version": {
                    "type": "string",
                    "description": "Optional: version such as '1.2.0' or 'v1.2.0' (default: latest release)"
                }
            }
        })
    }

    fn call(&self, arguments: &Map<String, Value>) -> Result<String, ToolError> {
        let version = optional_str(arguments, "version")?;
        let entries = self.changelog.entries()?;

        if entries.is_empty() {
            return Ok("The changelog has no version sections".to_string());
        }

        let entry = match version {
            Some(v) => entries.iter().find(|e| e.matches(v)),
            None => changelog::latest(&entries),
        };

        Ok(match (entry, version) {
            (Some(entry), _) => entry.render(),
            (None, requested) => {
                let known: Vec<_> = entries.iter().map(|e| e.version.as_str()).collect();
                format!(
                    "Version '{}' not found in changelog. Known versions: {}",
                    requested.unwrap_or_default(),
                    known.join(", ")
                )
            }
        })
    }
}

/// `docs_search_changelog`: substring search over changelog lines.
pub struct SearchChangelog {
    changelog: Changelog,
}

impl SearchChangelog {
    /// Creates the tool over `changelog`.
    #[must_use]
    pub const fn new(changelog: Changelog) -> Self {
        Self { changelog }
    }
}

impl Tool for SearchChangelog {
    fn description(&self) -> &str {
        "Search the changelog for a phrase (case-insensitive). Each matching line is \
         reported with the version it belongs to."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Text to search for"
                }
            },
            "required": ["query"]
        })
    }

    fn call(&self, arguments: &Map<String, Value>) -> Result<String, ToolError> {
        let query = required_str(arguments, "query")?;
        let needle = query.to_lowercase();

        let mut hits = Vec::new();
        for entry in self.changelog.entries()? {
            for line in entry.body.lines() {
                if line.to_lowercase().contains(&needle) {
                    hits.push(format!("[{}] {}", entry.version, line.trim()));
                }
            }
        }

        if hits.is_empty() {
            return Ok(format!("No changelog entries mention '{query}'"));
        }

        Ok(hits.join("\n"))
    }
}

/// `docs_get_example`: a built-in example by topic.
pub struct GetExample;

impl Tool for GetExample {
    fn description(&self) -> &str {
        "Get a worked example for a topic, such as 'framing', 'search' or 'configuration'."
    }

    fn input_schema(&self) -> Value {
        let topics = catalog::example_topics();
        json!({
            "type": "object",
            "properties": {
                "topic": {
                    "type": "string",
                    "description": "Example topic",
                    "enum": topics
                }
            },
            "required": ["topic"]
        })
    }

    fn call(&self, arguments: &Map<String, Value>) -> Result<String, ToolError> {
        let topic = required_str(arguments, "topic")?;

        Ok(catalog::find_example(topic).map_or_else(
            || {
                format!(
                    "No example for topic '{topic}'. Available topics: {}",
                    catalog::example_topics().join(", ")
                )
            },
            catalog::Example::render,
        ))
    }
}

/// `docs_describe_method`: reference entry for a protocol method.
pub struct DescribeMethod;

impl Tool for DescribeMethod {
    fn description(&self) -> &str {
        "Describe a JSON-RPC method supported by this server: what it does and the shape \
         of its params and result."
    }

    fn input_schema(&self) -> Value {
        let methods: Vec<_> = METHODS.iter().map(|m| m.name).collect();
        json!({
            "type": "object",
            "properties": {
                "method": {
                    "type": "string",
                    "description": "Method name, e.g. 'tools/call'",
                    "enum": methods
                }
            },
            "required": ["method"]
        })
    }

    fn call(&self, arguments: &Map<String, Value>) -> Result<String, ToolError> {
        let method = required_str(arguments, "method")?;

        Ok(catalog::find_method(method).map_or_else(
            || {
                let known: Vec<_> = METHODS.iter().map(|m| m.name).collect();
                format!(
                    "Unknown method '{method}'. Known methods: {}",
                    known.join(", ")
                )
            },
            catalog::MethodDoc::render,
        ))
    }
}

/// `docs_config_reference`: configuration keys, optionally filtered.
pub struct ConfigReference;

impl Tool for ConfigReference {
    fn description(&self) -> &str {
        "Look up configuration file keys with their types, defaults and meaning. \
         Pass 'key' to filter by a case-insensitive substring."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "key": {
                    "type": "string",
                    "description": "Optional: substring of the key to look up, e.g. 'search'"
                }
            }
        })
    }

    fn call(&self, arguments: &Map<String, Value>) -> Result<String, ToolError> {
        let key = optional_str(arguments, "key")?;
        let options = reference::matching_options(key);

        if options.is_empty() {
            let known: Vec<_> = reference::CONFIG_OPTIONS.iter().map(|o| o.key).collect();
            return Ok(format!(
                "No configuration key matches '{}'. Known keys: {}",
                key.unwrap_or_default(),
                known.join(", ")
            ));
        }

        Ok(reference::render_options(&options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn required_str_checks_type_and_presence() {
        let a = args(json!({"q": "x", "n": 3, "e": "  ", "z": null}));
        assert_eq!(required_str(&a, "q").unwrap(), "x");
        assert!(matches!(
            required_str(&a, "missing"),
            Err(ToolError::MissingArgument { name: "missing" })
        ));
        assert!(matches!(
            required_str(&a, "z"),
            Err(ToolError::MissingArgument { .. })
        ));
        assert!(matches!(
            required_str(&a, "n"),
            Err(ToolError::InvalidArgument { .. })
        ));
        assert!(matches!(
            required_str(&a, "e"),
            Err(ToolError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn optional_positive_rejects_zero_and_negative() {
        let a = args(json!({"ok": 4, "zero": 0, "neg": -1, "text": "5"}));
        assert_eq!(optional_positive(&a, "ok").unwrap(), Some(4));
        assert_eq!(optional_positive(&a, "absent").unwrap(), None);
        assert!(optional_positive(&a, "zero").is_err());
        assert!(optional_positive(&a, "neg").is_err());
        assert!(optional_positive(&a, "text").is_err());
    }

    #[test]
    fn get_example_known_and_unknown() {
        let text = GetExample.call(&args(json!({"topic": "Framing"}))).unwrap();
        assert!(text.contains("Content-Length"));

        let text = GetExample.call(&args(json!({"topic": "rockets"}))).unwrap();
        assert!(text.starts_with("No example for topic 'rockets'"));
        assert!(text.contains("framing"));
    }

    #[test]
    fn describe_method_known_and_unknown() {
        let text = DescribeMethod
            .call(&args(json!({"method": "resources/read"})))
            .unwrap();
        assert!(text.contains("contents"));

        let text = DescribeMethod
            .call(&args(json!({"method": "ping"})))
            .unwrap();
        assert!(text.starts_with("Unknown method 'ping'"));
    }

    #[test]
    fn config_reference_filters() {
        let text = ConfigReference.call(&Map::new()).unwrap();
        assert_eq!(text.lines().count(), reference::CONFIG_OPTIONS.len());

        let text = ConfigReference
            .call(&args(json!({"key": "logging"})))
            .unwrap();
        assert!(text.contains("logging.level"));
        assert!(!text.contains("docs_path"));

        let text = ConfigReference.call(&args(json!({"key": "port"}))).unwrap();
        assert!(text.starts_with("No configuration key matches 'port'"));
    }

    #[test]
    fn missing_required_argument_is_an_error() {
        assert!(GetExample.call(&Map::new()).is_err());
        assert!(DescribeMethod.call(&Map::new()).is_err());
    }

    #[test]
    fn schemas_are_objects() {
        assert_eq!(GetExample.input_schema()["type"], "object");
        assert_eq!(DescribeMethod.input_schema()["required"][0], "method");
        assert!(ConfigReference.input_schema()["properties"]["key"].is_object());
    }
}
