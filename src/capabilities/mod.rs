//! The capabilities this server exposes.
//!
//! | Tool (`docs_<key>`) | Backed by |
//! |---|---|
//! | `search_docs` | documentation corpus |
//! | `get_changelog` | changelog file |
//! | `search_changelog` | changelog file |
//! | `get_example` | built-in examples |
//! | `describe_method` | built-in method reference |
//! | `config_reference` | built-in configuration reference |
//!
//! | Resource (`docs://<key>`) | Content |
//! |---|---|
//! | `config-reference` | configuration reference |
//! | `changelog` | changelog file |
//! | `examples` | example topic index |
//! | `methods` | method reference |

pub mod resources;
pub mod tools;

use crate::docs::catalog::EXAMPLES;
use crate::docs::DocSources;
use crate::mcp::dispatcher::Dispatcher;
use crate::mcp::registry::CapabilityRegistry;

use resources::{ChangelogResource, ConfigReferenceResource, ExamplesResource, MethodsResource};
use tools::{
    ConfigReference, DescribeMethod, GetChangelog, GetExample, SearchChangelog, SearchDocs,
};

/// Builds the registry of every tool and resource, in listing order.
#[must_use]
pub fn standard_registry(sources: &DocSources) -> CapabilityRegistry {
    CapabilityRegistry::builder()
        .tool(
            "search_docs",
            SearchDocs::new(sources.corpus.clone(), sources.max_results),
        )
        .tool("get_changelog", GetChangelog::new(sources.changelog.clone()))
        .tool(
            "search_changelog",
            SearchChangelog::new(sources.changelog.clone()),
        )
        .tool("get_example", GetExample)
        .tool("describe_method", DescribeMethod)
        .tool("config_reference", ConfigReference)
        .resource("config-reference", ConfigReferenceResource)
        .resource("changelog", ChangelogResource::new(sources.changelog.clone()))
        .resource("examples", ExamplesResource)
        .resource("methods", MethodsResource)
        .build()
}

/// Example topics offered by `completion/complete`.
#[must_use]
pub fn completion_topics() -> Vec<String> {
    EXAMPLES.iter().map(|e| e.topic.to_string()).collect()
}

/// Builds a dispatcher over the standard registry.
#[must_use]
pub fn standard_dispatcher(sources: &DocSources) -> Dispatcher {
    Dispatcher::new(standard_registry(sources), completion_topics())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn registers_fixed_set_in_order() {
        let registry = standard_registry(&DocSources::from_config(&Config::default()));

        let tools: Vec<_> = registry.list_tools().into_iter().map(|t| t.name).collect();
        assert_eq!(
            tools,
            vec![
                "docs_search_docs",
                "docs_get_changelog",
                "docs_search_changelog",
                "docs_get_example",
                "docs_describe_method",
                "docs_config_reference",
            ]
        );

        let resources: Vec<_> = registry
            .list_resources()
            .into_iter()
            .map(|r| r.uri)
            .collect();
        assert_eq!(
            resources,
            vec![
                "docs://config-reference",
                "docs://changelog",
                "docs://examples",
                "docs://methods",
            ]
        );
    }

    #[test]
    fn every_tool_schema_is_an_object() {
        let registry = standard_registry(&DocSources::from_config(&Config::default()));
        for tool in registry.list_tools() {
            assert_eq!(tool.input_schema["type"], "object", "{}", tool.name);
            assert!(!tool.description.is_empty());
        }
    }

    #[test]
    fn completion_topics_follow_table_order() {
        let topics = completion_topics();
        assert_eq!(topics.len(), EXAMPLES.len());
        assert_eq!(topics[0], EXAMPLES[0].topic);
    }
}
