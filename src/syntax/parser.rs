use std::path::Path;
use std::sync::Arc;

use crate::error::{DocsyncError, Result};
use crate::languages::{LanguageGrammar, LanguageRegistry};

pub struct Parser {
    registry: LanguageRegistry,
}

impl Parser {
    pub fn new(registry: LanguageRegistry) -> Self {
        Self { registry }
    }

    pub fn parse_file(&self, path: &Path) -> Result<ParsedFile> {
        let source = std::fs::read_to_string(path).map_err(|e| DocsyncError::io(path, e))?;
        self.parse_text(path, source)
    }

    /// Parses text already in memory, picking the grammar from `path`'s extension.
    pub fn parse_text(&self, path: &Path, source: String) -> Result<ParsedFile> {
        let grammar = self.grammar_for(path)?;
        self.parse_source(source, grammar)
    }

    /// Parses `source` with `grammar`. Sources with syntax errors are rejected,
    /// since tree-sitter hides the statements it could not place inside ERROR nodes.
    pub fn parse_source(
        &self,
        source: String,
        grammar: Arc<dyn LanguageGrammar>,
    ) -> Result<ParsedFile> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&grammar.language())
            .map_err(|e| DocsyncError::Parse(e.to_string()))?;

        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| DocsyncError::Parse("Failed to parse source".to_string()))?;

        let root = tree.root_node();
        if root.has_error() {
            let at = first_error(root).unwrap_or(root).start_position();
            return Err(DocsyncError::Parse(format!(
                "Syntax error in {} source at line {}, column {}",
                grammar.name(),
                at.row + 1,
                at.column + 1
            )));
        }

        Ok(ParsedFile {
            tree,
            source,
            language: grammar.name().to_string(),
            grammar,
        })
    }

    pub fn grammar_for(&self, path: &Path) -> Result<Arc<dyn LanguageGrammar>> {
        self.registry
            .get_for_file(path)
            .ok_or_else(|| DocsyncError::UnsupportedLanguage(path.display().to_string()))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(LanguageRegistry::new())
    }
}

fn first_error(node: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let child = node.children(&mut cursor).find(|c| c.has_error())?;
    first_error(child)
}

pub struct ParsedFile {
    pub tree: tree_sitter::Tree,
    pub source: String,
    pub language: String,
    pub grammar: Arc<dyn LanguageGrammar>,
}

impl ParsedFile {
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    pub fn source_bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }

    pub fn node_text(&self, node: &tree_sitter::Node) -> &str {
        node.utf8_text(self.source_bytes()).unwrap_or("")
    }
}
