//! Built-in usage examples and protocol method reference.
//!
//! Both tables are fixed at compile time. Lookups are case-insensitive.

/// A worked example for one topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Example {
    /// Lookup key.
    pub topic: &'static str,
    /// One-line title.
    pub title: &'static str,
    /// What the example demonstrates.
    pub summary: &'static str,
    /// Example body (wire frames or shell commands).
    pub code: &'static str,
}

impl Example {
    /// Renders the example as Markdown.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "# {}\n\n{}\n\n```text\n{}\n```",
            self.title, self.summary, self.code
        )
    }
}

/// Reference entry for one protocol method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodDoc {
    /// Method name as sent on the wire.
    pub name: &'static str,
    /// What the method does.
    pub summary: &'static str,
    /// Shape of `params`.
    pub params: &'static str,
    /// Shape of `result`.
    pub result: &'static str,
}

impl MethodDoc {
    /// Renders the entry as Markdown.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "## `{}`\n\n{}\n\n- **params:** `{}`\n- **result:** `{}`",
            self.name, self.summary, self.params, self.result
        )
    }
}

/// The example table, in presentation order.
pub const EXAMPLES: &[Example] = &[
    Example {
        topic: "framing",
        title: "Framing a request",
        summary: "Every message is a Content-Length header, a blank line, and a JSON body. \
                  The length counts bytes, not characters.",
        code: "printf 'Content-Length: 46\\r\\n\\r\\n{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"initialize\"}' \\\n  | docs-mcp",
    },
    Example {
        topic: "initialize",
        title: "Initialising a session",
        summary: "The first request a client sends. The reply carries the protocol version and \
                  the capability classes the server supports.",
        code: "--> {\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"initialize\"}\n\
               <-- {\"jsonrpc\":\"2.0\",\"id\":1,\"result\":{\"protocolVersion\":\"2024-11-05\",\
               \"capabilities\":{\"tools\":{},\"resources\":{},\"completion\":{}},...}}",
    },
    Example {
        topic: "search",
        title: "Searching the documentation",
        summary: "Tool names are prefixed with `docs_`. Matching is a case-insensitive \
                  substring search over every documentation line.",
        code: "--> {\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/call\",\
               \"params\":{\"name\":\"docs_search_docs\",\"arguments\":{\"query\":\"content-length\",\"limit\":5}}}\n\
               <-- {\"jsonrpc\":\"2.0\",\"id\":2,\"result\":{\"content\":[{\"type\":\"text\",\
               \"text\":\"protocol.md:12: Every frame starts with a Content-Length header.\"}]}}",
    },
    Example {
        topic: "changelog",
        title: "Reading release notes",
        summary: "Omit `version` to get the newest released section.",
        code: "--> {\"jsonrpc\":\"2.0\",\"id\":3,\"method\":\"tools/call\",\
               \"params\":{\"name\":\"docs_get_changelog\",\"arguments\":{\"version\":\"1.2.0\"}}}",
    },
    Example {
        topic: "resources",
        title: "Reading a resource",
        summary: "Resources are addressed as `docs://<key>`. The reply echoes the URI.",
        code: "--> {\"jsonrpc\":\"2.0\",\"id\":4,\"method\":\"resources/read\",\
               \"params\":{\"uri\":\"docs://config-reference\"}}\n\
               <-- {\"jsonrpc\":\"2.0\",\"id\":4,\"result\":{\"contents\":[{\"uri\":\"docs://config-reference\",\
               \"mimeType\":\"text/markdown\",\"text\":\"# Configuration reference...\"}]}}",
    },
    Example {
        topic: "completion",
        title: "Completing a topic argument",
        summary: "Only the `topic` argument has suggestions; every other argument gets an \
                  empty list.",
        code: "--> {\"jsonrpc\":\"2.0\",\"id\":5,\"method\":\"completion/complete\",\
               \"params\":{\"ref\":{\"type\":\"ref/prompt\",\"name\":\"example\"},\
               \"argument\":{\"name\":\"topic\",\"value\":\"\"}}}",
    },
    Example {
        topic: "configuration",
        title: "Configuring the server",
        summary: "Point the server at a documentation tree and a changelog with a JSON file \
                  passed as the first argument.",
        code: "{\n  \"docs_path\": \"./docs\",\n  \"changelog_path\": \"./CHANGELOG.md\",\n  \
               \"search\": { \"max_results\": 20, \"extensions\": [\"md\", \"txt\"] },\n  \
               \"logging\": { \"level\": \"info\" }\n}",
    },
];

/// The method reference table, in protocol order.
pub const METHODS: &[MethodDoc] = &[
    MethodDoc {
        name: "initialize",
        summary: "Returns the protocol version, supported capability classes and server identity.",
        params: "{} (ignored)",
        result: "{protocolVersion, capabilities: {tools, resources, completion}, serverInfo: {name, version, protocol_version}}",
    },
    MethodDoc {
        name: "tools/list",
        summary: "Lists every tool with its namespaced name, description and input schema.",
        params: "{}",
        result: "{tools: [{name, description, inputSchema}]}",
    },
    MethodDoc {
        name: "tools/call",
        summary: "Invokes a tool by namespaced name. Unknown names fail with -32602.",
        params: "{name: string, arguments?: object}",
        result: "{content: [{type: \"text\", text}]}",
    },
    MethodDoc {
        name: "resources/list",
        summary: "Lists every resource with its URI, name, description and MIME type.",
        params: "{}",
        result: "{resources: [{uri, name, description, mimeType}]}",
    },
    MethodDoc {
        name: "resources/read",
        summary: "Reads a resource by `docs://` URI. Unknown URIs fail with -32602.",
        params: "{uri: string}",
        result: "{contents: [{uri, mimeType, text}]}",
    },
    MethodDoc {
        name: "completion/complete",
        summary: "Suggests values for the `topic` argument; other arguments get no suggestions.",
        params: "{ref: object, argument: {name, value}}",
        result: "{completion: {values: [string], total, hasMore: false}}",
    },
];

/// Finds an example by topic, ignoring ASCII case.
#[must_use]
pub fn find_example(topic: &str) -> Option<&'static Example> {
    let topic = topic.trim();
    EXAMPLES.iter().find(|e| e.topic.eq_ignore_ascii_case(topic))
}

/// Finds a method entry by name, ignoring ASCII case.
#[must_use]
pub fn find_method(name: &str) -> Option<&'static MethodDoc> {
    let name = name.trim();
    METHODS.iter().find(|m| m.name.eq_ignore_ascii_case(name))
}

/// All example topics, in table order.
#[must_use]
pub fn example_topics() -> Vec<&'static str> {
    EXAMPLES.iter().map(|e| e.topic).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topics_are_unique() {
        let mut topics = example_topics();
        let count = topics.len();
        topics.sort_unstable();
        topics.dedup();
        assert_eq!(topics.len(), count);
    }

    #[test]
    fn find_example_ignores_case() {
        assert_eq!(find_example("FRAMING").unwrap().topic, "framing");
        assert_eq!(find_example(" search ").unwrap().topic, "search");
        assert!(find_example("missing").is_none());
    }

    #[test]
    fn framing_example_length_is_correct() {
        let body = r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#;
        assert!(find_example("framing")
            .unwrap()
            .code
            .contains(&format!("Content-Length: {}", body.len())));
    }

    #[test]
    fn every_protocol_method_is_documented() {
        for name in [
            "initialize",
            "tools/list",
            "tools/call",
            "resources/list",
            "resources/read",
            "completion/complete",
        ] {
            assert!(find_method(name).is_some(), "{name} is undocumented");
        }
    }

    #[test]
    fn render_includes_parts() {
        let rendered = find_method("tools/call").unwrap().render();
        assert!(rendered.starts_with("## `tools/call`"));
        assert!(rendered.contains("**params:**"));

        let rendered = find_example("completion").unwrap().render();
        assert!(rendered.starts_with("# Completing a topic argument"));
        assert!(rendered.contains("```text"));
    }
}
