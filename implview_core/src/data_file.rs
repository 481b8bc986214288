// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use anyhow::{Context, Result};
use regex::Regex;
use serde_json::Value;

use crate::registry::ImplementorRegistry;
use crate::table::ImplementorTable;

/// Page global a data file calls when the viewer got there first
pub const REGISTER_HOOK_GLOBAL: &str = "register_implementors";
/// Page global a data file writes when the viewer has not arrived yet
pub const PENDING_BUFFER_GLOBAL: &str = "pending_implementors";

/// One parsed `trait.<Name>.js` data file: the trait it describes plus its
/// implementor table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFile {
    /// Fully qualified trait path, e.g. `core::convert::From`
    pub trait_path: String,
    pub table: ImplementorTable,
}

impl DataFile {
    /// Performs this file's hand-off: submits the table through the registry,
    /// landing it in the hook or the pending buffer as appropriate.
    pub fn dispatch(self, registry: &mut ImplementorRegistry) {
        registry.submit(self.table);
    }
}

/// Parses the content of a generated implementors data file.
///
/// The wire shape is fixed by rustdoc:
///
/// ```text
/// (function() {var implementors = {
/// "crate_a":["<fragment>", ...],
/// "crate_b":[...]
/// };if (window.register_implementors) {...} else {...}})()
/// ```
///
/// The object literal between the prelude and the dispatch stub is plain
/// JSON; key order is authored order and is preserved. Fragments pass
/// through opaque - nothing here inspects the markup.
pub fn parse(content: &str) -> Result<ImplementorTable> {
    let stub = Regex::new(r"(?s)var implementors = (\{.*\});\s*if\s*\(window\.register_implementors\)")
        .expect("Failed compiling data file pattern");

    let captures = stub.captures(content).context(
        "Not an implementors data file: missing `var implementors` prelude or dispatch stub",
    )?;
    let literal = captures
        .get(1)
        .expect("pattern has one capture group")
        .as_str();

    let object: serde_json::Map<String, Value> =
        serde_json::from_str(literal).context("Implementor table is not a valid JSON object")?;

    let mut pairs = Vec::with_capacity(object.len());
    for (name, value) in object {
        let fragments = value
            .as_array()
            .with_context(|| format!("Entries for crate '{name}' are not an array"))?
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .with_context(|| format!("Non-string impl fragment under crate '{name}'"))
            })
            .collect::<Result<Vec<String>>>()?;

        if fragments.is_empty() {
            anyhow::bail!("Crate '{name}' has an empty implementor list");
        }
        pairs.push((name, fragments));
    }

    Ok(ImplementorTable::from_entries(pairs))
}

/// Renders a table back into the generated-file shape, one crate per line,
/// with the same two-branch dispatch stub rustdoc emits.
pub fn render(table: &ImplementorTable) -> String {
    let entries: Vec<String> = table
        .iter()
        .map(|entry| {
            let name =
                serde_json::to_string(&entry.name).expect("Failed serializing crate name");
            let fragments = serde_json::to_string(&entry.fragments)
                .expect("Failed serializing impl fragments");
            format!("{name}:{fragments}")
        })
        .collect();

    format!(
        "(function() {{var implementors = {{\n{body}\n}};\
         if (window.{hook}) {{window.{hook}(implementors);}} \
         else {{window.{buffer} = implementors;}}}})()",
        body = entries.join(",\n"),
        hook = REGISTER_HOOK_GLOBAL,
        buffer = PENDING_BUFFER_GLOBAL,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = concat!(
        "(function() {var implementors = {\n",
        r#""serde_json":["impl From&lt;u8&gt; for <a href=\"x\">Value</a>","impl From&lt;i64&gt; for Value"],"#,
        "\n",
        r#""aho_corasick":["impl From&lt;u8&gt; for PatternID"]"#,
        "\n",
        "};if (window.register_implementors) {window.register_implementors(implementors);} \
         else {window.pending_implementors = implementors;}})()"
    );

    #[test]
    fn test_parse_extracts_table_in_authored_order() {
        let table = parse(SAMPLE).expect("sample should parse");
        let names: Vec<&str> = table.crate_names().collect();
        assert_eq!(names, vec!["serde_json", "aho_corasick"]);
        assert_eq!(table.fragment_count(), 3);
        assert_eq!(
            table.get("aho_corasick"),
            Some(&["impl From&lt;u8&gt; for PatternID".to_string()][..])
        );
    }

    #[test]
    fn test_parse_is_stable_across_repeated_loads() {
        let first = parse(SAMPLE).expect("sample should parse");
        let second = parse(SAMPLE).expect("sample should parse");
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_rejects_non_data_file() {
        let err = parse("function search() { return []; }").unwrap_err();
        assert!(err.to_string().contains("Not an implementors data file"));
    }

    #[test]
    fn test_parse_rejects_non_array_entries() {
        let content = "(function() {var implementors = {\n\
                       \"bad\":\"not an array\"\n\
                       };if (window.register_implementors) {} else {}})()";
        let err = parse(content).unwrap_err();
        assert!(err.to_string().contains("not an array"));
    }

    #[test]
    fn test_parse_rejects_empty_implementor_list() {
        let content = "(function() {var implementors = {\n\
                       \"hollow\":[]\n\
                       };if (window.register_implementors) {} else {}})()";
        let err = parse(content).unwrap_err();
        assert!(err.to_string().contains("empty implementor list"));
    }

    #[test]
    fn test_render_emits_the_generated_shape() {
        let table = ImplementorTable::from_entries([
            ("regex", vec!["impl A".to_string()]),
            ("serde_json", vec!["impl B".to_string(), "impl C".to_string()]),
        ]);

        let content = render(&table);
        assert!(content.starts_with("(function() {var implementors = {"));
        assert!(content.contains("if (window.register_implementors)"));
        assert!(content.contains("window.pending_implementors = implementors;"));
        assert!(content.ends_with("})()"));

        // A rendered file is itself loadable, table intact
        let reparsed = parse(&content).expect("rendered content should parse");
        assert_eq!(reparsed, table);
    }

    #[test]
    fn test_dispatch_lands_in_pending_buffer() {
        let file = DataFile {
            trait_path: "core::convert::From".to_string(),
            table: ImplementorTable::from_entries([("regex", vec!["impl A".to_string()])]),
        };
        let expected = file.table.clone();

        let mut registry = ImplementorRegistry::new();
        file.dispatch(&mut registry);
        assert_eq!(registry.drain_pending(), Some(expected));
    }
}
