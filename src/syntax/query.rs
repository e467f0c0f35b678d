use std::path::Path;

use tree_sitter::StreamingIterator;

use crate::error::{DocsyncError, Result};
use crate::languages::LanguageRegistry;
use crate::syntax::parser::{ParsedFile, Parser};

/// A single captured node: its text and where it sits in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub text: String,
    pub start_byte: usize,
    pub end_byte: usize,
}

/// Runs tree-sitter patterns against files and returns the text of one named capture.
pub struct QueryEngine {
    parser: Parser,
}

impl QueryEngine {
    pub fn new(registry: LanguageRegistry) -> Self {
        Self {
            parser: Parser::new(registry),
        }
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    /// Returns the text of every `capture` node matched by `pattern` in `path`.
    pub fn query_file(&self, path: &Path, pattern: &str, capture: &str) -> Result<Vec<String>> {
        let parsed = self.parser.parse_file(path)?;
        let captures = self.captures(&parsed, pattern, capture)?;
        Ok(captures.into_iter().map(|c| c.text).collect())
    }

    /// Runs `pattern` over an already parsed file. Results are in document order.
    pub fn captures(
        &self,
        parsed: &ParsedFile,
        pattern: &str,
        capture: &str,
    ) -> Result<Vec<Capture>> {
        let query = tree_sitter::Query::new(&parsed.grammar.language(), pattern)
            .map_err(|e| DocsyncError::Query(format!("Invalid {} query: {}", parsed.language, e)))?;

        let index = query.capture_index_for_name(capture).ok_or_else(|| {
            DocsyncError::Query(format!("Query has no capture named @{}", capture))
        })?;

        let mut cursor = tree_sitter::QueryCursor::new();
        let mut matches = cursor.matches(&query, parsed.root_node(), parsed.source_bytes());

        let mut results = Vec::new();
        while let Some(m) = matches.next() {
            for c in m.captures.iter().filter(|c| c.index == index) {
                results.push(Capture {
                    text: parsed.node_text(&c.node).to_string(),
                    start_byte: c.node.start_byte(),
                    end_byte: c.node.end_byte(),
                });
            }
        }

        results.sort_by_key(|c| c.start_byte);
        results.dedup();

        tracing::debug!(
            "@{} matched {} node(s) in {} source",
            capture,
            results.len(),
            parsed.language
        );
        Ok(results)
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(LanguageRegistry::new())
    }
}
