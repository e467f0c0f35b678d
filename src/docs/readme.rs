//! README setup sample synchronization
//!
//! The README carries a `setup(...)` example showing every default option.
//! It is regenerated from the `default_config` table in the plugin source.

use std::path::Path;

use crate::error::{DocsyncError, Result};
use crate::syntax::{ParsedFile, QueryEngine};

pub const DEFAULT_CONFIG_QUERY: &str = r#"
(assignment_statement
    (variable_list
        name: (identifier) @name
        (#eq? @name "default_config"))
    (expression_list
        value: (table_constructor) @value))
"#;
const DEFAULT_CONFIG_CAPTURE: &str = "value";

/// Only closed fences: an unclosed fence swallows the rest of the document,
/// including a final ``` with no newline after it.
pub const CODE_BLOCKS_QUERY: &str = r#"
(fenced_code_block
    (code_fence_content) @content
    (fenced_code_block_delimiter))
"#;
const CODE_BLOCK_CAPTURE: &str = "content";

/// Content of the fenced code block holding the sample, with its byte range in the README
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSample {
    pub content: String,
    pub start_byte: usize,
    pub end_byte: usize,
}

pub struct ReadmeSync<'a> {
    engine: &'a QueryEngine,
    module: &'a str,
    marker: &'a str,
}

impl<'a> ReadmeSync<'a> {
    pub fn new(engine: &'a QueryEngine, module: &'a str, marker: &'a str) -> Self {
        Self {
            engine,
            module,
            marker,
        }
    }

    /// The table literal assigned to `default_config`, verbatim.
    pub fn default_config(&self, source: &ParsedFile) -> Result<String> {
        let mut values = self
            .engine
            .captures(source, DEFAULT_CONFIG_QUERY, DEFAULT_CONFIG_CAPTURE)?;
        if values.len() != 1 {
            return Err(DocsyncError::DefaultConfigCardinality {
                found: values.len(),
            });
        }
        Ok(values.remove(0).text)
    }

    pub fn render_sample(&self, default_config: &str) -> String {
        format!("require('{}').setup({})", self.module, default_config)
    }

    /// Finds the one fenced code block whose content mentions the marker.
    pub fn locate_sample(&self, readme: &ParsedFile) -> Result<CodeSample> {
        let blocks = self
            .engine
            .captures(readme, CODE_BLOCKS_QUERY, CODE_BLOCK_CAPTURE)?;
        let mut samples: Vec<CodeSample> = blocks
            .into_iter()
            .filter(|b| b.text.contains(self.marker))
            .map(|b| CodeSample {
                content: b.text,
                start_byte: b.start_byte,
                end_byte: b.end_byte,
            })
            .collect();

        if samples.len() != 1 {
            return Err(DocsyncError::SampleBlockCardinality {
                marker: self.marker.to_string(),
                found: samples.len(),
            });
        }
        Ok(samples.remove(0))
    }

    /// Returns the full README text with the sample block regenerated.
    pub fn render(&self, source: &ParsedFile, readme: &ParsedFile) -> Result<String> {
        let default_config = self.default_config(source)?;
        let sample = self.locate_sample(readme)?;
        let rendered = self.render_sample(&default_config);
        Ok(splice(&readme.source, &sample, &rendered))
    }

    /// Regenerates the sample in `readme_path` in place. Returns whether the file changed.
    pub fn sync_file(&self, source_path: &Path, readme_path: &Path) -> Result<bool> {
        let parser = self.engine.parser();
        let source = parser.parse_file(source_path)?;
        let readme = parser.parse_file(readme_path)?;

        let updated = self.render(&source, &readme)?;
        if updated == readme.source {
            return Ok(false);
        }
        std::fs::write(readme_path, updated).map_err(|e| DocsyncError::io(readme_path, e))?;
        Ok(true)
    }
}

/// Replaces the sample's byte range with `replacement`. The old content's
/// trailing line break and the indentation after it are kept, so the closing
/// fence stays on its own line at its original indent.
pub fn splice(document: &str, sample: &CodeSample, replacement: &str) -> String {
    let old_suffix = closing_suffix(&sample.content);
    let keep_suffix = !old_suffix.is_empty() && closing_suffix(replacement).is_empty();

    let mut out = String::with_capacity(document.len() + replacement.len());
    out.push_str(&document[..sample.start_byte]);
    out.push_str(replacement);
    if keep_suffix {
        out.push_str(old_suffix);
    }
    out.push_str(&document[sample.end_byte..]);
    out
}

/// The final line break of `text` plus any spaces or tabs after it.
fn closing_suffix(text: &str) -> &str {
    let trimmed = text.trim_end_matches([' ', '\t']);
    let start = if trimmed.ends_with("\r\n") {
        trimmed.len() - 2
    } else if trimmed.ends_with('\n') {
        trimmed.len() - 1
    } else {
        return "";
    };
    &text[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(engine: &QueryEngine, name: &str, source: &str) -> ParsedFile {
        engine
            .parser()
            .parse_text(Path::new(name), source.to_string())
            .unwrap()
    }

    fn sync(engine: &QueryEngine) -> ReadmeSync<'_> {
        ReadmeSync::new(engine, "render-markdown", "query")
    }

    #[test]
    fn test_default_config_local() {
        let engine = QueryEngine::default();
        let source = parse(
            &engine,
            "init.lua",
            "local M = {}\nlocal default_config = { foo = true }\nreturn M\n",
        );
        assert_eq!(sync(&engine).default_config(&source).unwrap(), "{ foo = true }");
    }

    #[test]
    fn test_default_config_global() {
        let engine = QueryEngine::default();
        let source = parse(&engine, "init.lua", "default_config = {\n    bar = 'x',\n}\n");
        assert_eq!(
            sync(&engine).default_config(&source).unwrap(),
            "{\n    bar = 'x',\n}"
        );
    }

    #[test]
    fn test_default_config_ignores_other_names() {
        let engine = QueryEngine::default();
        let source = parse(
            &engine,
            "init.lua",
            "local config = { a = 1 }\nlocal default_config = { b = 2 }\nlocal user_config = { c = 3 }\n",
        );
        assert_eq!(sync(&engine).default_config(&source).unwrap(), "{ b = 2 }");
    }

    #[test]
    fn test_default_config_missing() {
        let engine = QueryEngine::default();
        let source = parse(&engine, "init.lua", "local config = { a = 1 }\n");
        assert!(matches!(
            sync(&engine).default_config(&source),
            Err(DocsyncError::DefaultConfigCardinality { found: 0 })
        ));
    }

    #[test]
    fn test_default_config_not_a_table() {
        let engine = QueryEngine::default();
        let source = parse(&engine, "init.lua", "local default_config = make_config()\n");
        assert!(matches!(
            sync(&engine).default_config(&source),
            Err(DocsyncError::DefaultConfigCardinality { found: 0 })
        ));
    }

    #[test]
    fn test_default_config_duplicate() {
        let engine = QueryEngine::default();
        let source = parse(
            &engine,
            "init.lua",
            "local default_config = { a = 1 }\ndefault_config = { a = 2 }\n",
        );
        assert!(matches!(
            sync(&engine).default_config(&source),
            Err(DocsyncError::DefaultConfigCardinality { found: 2 })
        ));
    }

    #[test]
    fn test_render_sample() {
        let engine = QueryEngine::default();
        assert_eq!(
            sync(&engine).render_sample("{ foo = true }"),
            "require('render-markdown').setup({ foo = true })"
        );

        let other = ReadmeSync::new(&engine, "my-plugin", "query");
        assert_eq!(other.render_sample("{}"), "require('my-plugin').setup({})");
    }

    #[test]
    fn test_locate_sample() {
        let engine = QueryEngine::default();
        let readme = parse(
            &engine,
            "README.md",
            "# Plugin\n\n```lua\nrequire('x').setup()\n```\n\n```lua\nrequire('x').setup({ query = 1 })\n```\n",
        );

        let sample = sync(&engine).locate_sample(&readme).unwrap();
        assert!(sample.content.starts_with("require('x').setup({ query = 1 })"));
        assert_eq!(&readme.source[sample.start_byte..sample.end_byte], sample.content);
    }

    #[test]
    fn test_locate_sample_none() {
        let engine = QueryEngine::default();
        let readme = parse(&engine, "README.md", "# Plugin\n\n```lua\nlocal a = 1\n```\n");
        assert!(matches!(
            sync(&engine).locate_sample(&readme),
            Err(DocsyncError::SampleBlockCardinality { found: 0, .. })
        ));
    }

    #[test]
    fn test_locate_sample_ambiguous() {
        let engine = QueryEngine::default();
        let readme = parse(
            &engine,
            "README.md",
            "```lua\n-- query one\n```\n\n```lua\n-- query two\n```\n",
        );
        assert!(matches!(
            sync(&engine).locate_sample(&readme),
            Err(DocsyncError::SampleBlockCardinality { found: 2, .. })
        ));
    }

    #[test]
    fn test_marker_outside_code_block_is_ignored() {
        let engine = QueryEngine::default();
        let readme = parse(
            &engine,
            "README.md",
            "Uses a treesitter query.\n\n```lua\n-- query sample\n```\n",
        );
        let sample = sync(&engine).locate_sample(&readme).unwrap();
        assert!(sample.content.starts_with("-- query sample"));
    }

    #[test]
    fn test_render_replaces_only_the_sample() {
        let engine = QueryEngine::default();
        let source = parse(&engine, "init.lua", "local default_config = { foo = true }\n");
        let readme = parse(
            &engine,
            "README.md",
            "# Title\n\nIntro.\n\n```lua\nrequire('lib').setup({ bar = false })  -- query example\n```\n\nOutro.\n",
        );

        let updated = sync(&engine).render(&source, &readme).unwrap();
        assert_eq!(
            updated,
            "# Title\n\nIntro.\n\n```lua\nrequire('render-markdown').setup({ foo = true })\n```\n\nOutro.\n"
        );
    }

    #[test]
    fn test_render_leaves_duplicate_text_elsewhere() {
        let engine = QueryEngine::default();
        let source = parse(&engine, "init.lua", "local default_config = { query = 2 }\n");
        let readme = parse(
            &engine,
            "README.md",
            "Old: require('x').setup({ query = 1 })\n\n```lua\nrequire('x').setup({ query = 1 })\n```\n",
        );

        let updated = sync(&engine).render(&source, &readme).unwrap();
        assert_eq!(
            updated,
            "Old: require('x').setup({ query = 1 })\n\n```lua\nrequire('render-markdown').setup({ query = 2 })\n```\n"
        );
    }

    #[test]
    fn test_sync_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let init = dir.path().join("init.lua");
        let readme = dir.path().join("README.md");
        std::fs::write(&init, "local default_config = { query = 'x' }\n").unwrap();
        std::fs::write(&readme, "```lua\n-- query\n```\n").unwrap();

        let engine = QueryEngine::default();
        assert!(sync(&engine).sync_file(&init, &readme).unwrap());
        assert_eq!(
            std::fs::read_to_string(&readme).unwrap(),
            "```lua\nrequire('render-markdown').setup({ query = 'x' })\n```\n"
        );
        assert!(!sync(&engine).sync_file(&init, &readme).unwrap());
    }

    #[test]
    fn test_render_fence_in_list_item() {
        let engine = QueryEngine::default();
        let source = parse(&engine, "init.lua", "local default_config = { a = 1 }\n");
        let readme = parse(
            &engine,
            "README.md",
            "- item\n  ```lua\n  -- query\n  x = 1\n  ```\n",
        );

        let updated = sync(&engine).render(&source, &readme).unwrap();
        assert_eq!(
            updated,
            "- item\n  ```lua\n  require('render-markdown').setup({ a = 1 })\n  ```\n"
        );
    }

    #[test]
    fn test_locate_sample_skips_unclosed_fence() {
        let engine = QueryEngine::default();
        let readme = parse(&engine, "README.md", "```lua\n-- query\n```");
        assert!(matches!(
            sync(&engine).locate_sample(&readme),
            Err(DocsyncError::SampleBlockCardinality { found: 0, .. })
        ));
    }

    #[test]
    fn test_locate_sample_closed_before_unclosed() {
        let engine = QueryEngine::default();
        let readme = parse(
            &engine,
            "README.md",
            "```lua\n-- query\n```\n\n```lua\n-- query again\n```",
        );
        let sample = sync(&engine).locate_sample(&readme).unwrap();
        assert!(sample.content.starts_with("-- query\n"));
        assert!(!sample.content.contains("```"));
    }

    #[test]
    fn test_splice_keeps_indented_line_break() {
        let document = "- a\n  old\n  ```\n";
        let sample = CodeSample {
            content: "old\n  ".to_string(),
            start_byte: 6,
            end_byte: 12,
        };
        assert_eq!(splice(document, &sample, "new"), "- a\n  new\n  ```\n");
    }

    #[test]
    fn test_closing_suffix() {
        assert_eq!(closing_suffix("x\n"), "\n");
        assert_eq!(closing_suffix("x\n  "), "\n  ");
        assert_eq!(closing_suffix("x\r\n\t"), "\r\n\t");
        assert_eq!(closing_suffix("x  "), "");
        assert_eq!(closing_suffix("x"), "");
    }

    #[test]
    fn test_splice_keeps_line_break() {
        let document = "a\nold\nb";
        let sample = CodeSample {
            content: "old\n".to_string(),
            start_byte: 2,
            end_byte: 6,
        };
        assert_eq!(splice(document, &sample, "new"), "a\nnew\nb");
    }

    #[test]
    fn test_splice_without_line_break() {
        let document = "a\nold\nb";
        let sample = CodeSample {
            content: "old".to_string(),
            start_byte: 2,
            end_byte: 5,
        };
        assert_eq!(splice(document, &sample, "new"), "a\nnew\nb");
    }

    #[test]
    fn test_splice_keeps_crlf() {
        let document = "x\r\nold\r\ny";
        let sample = CodeSample {
            content: "old\r\n".to_string(),
            start_byte: 3,
            end_byte: 8,
        };
        assert_eq!(splice(document, &sample, "new"), "x\r\nnew\r\ny");
    }
}
