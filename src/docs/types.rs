//! Type annotation listing
//!
//! Collects the `---@class` and `---@field` annotations of a Lua source file
//! into a standalone declaration listing. Fields documented as optional in the
//! source (`---@field enabled? boolean`) are declared as plain fields, since the
//! listing describes the fully resolved configuration shape.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DocsyncError, Result};
use crate::syntax::{ParsedFile, QueryEngine};

pub const COMMENTS_QUERY: &str = "(comment) @comment";
const COMMENT_CAPTURE: &str = "comment";

const OPTIONAL_MARKER: char = '?';

/// Classification of a comment by its leading annotation tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentTag {
    Class,
    Field,
    Other,
}

impl CommentTag {
    /// Tag is the part of the first word after its last `@`.
    pub fn classify(comment: &str) -> Self {
        let Some(first) = comment.split_whitespace().next() else {
            return CommentTag::Other;
        };
        match first.rsplit('@').next().unwrap_or(first) {
            "class" => CommentTag::Class,
            "field" => CommentTag::Field,
            _ => CommentTag::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommentTag::Class => "class",
            CommentTag::Field => "field",
            CommentTag::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocComment {
    pub tag: CommentTag,
    pub text: String,
}

impl DocComment {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            tag: CommentTag::classify(&text),
            text,
        }
    }
}

/// Ordered declaration lines, with a blank line opening every class after the first
#[derive(Debug, Clone, Default)]
pub struct TypeListing {
    lines: Vec<String>,
    strip_prefix: String,
}

impl TypeListing {
    pub fn new(strip_prefix: impl Into<String>) -> Self {
        Self {
            lines: Vec::new(),
            strip_prefix: strip_prefix.into(),
        }
    }

    /// Adds a comment to the listing. `Other` comments are ignored.
    pub fn push(&mut self, comment: &DocComment) -> Result<()> {
        let mut text = if self.strip_prefix.is_empty() {
            comment.text.clone()
        } else {
            comment.text.replace(&self.strip_prefix, "")
        };

        match comment.tag {
            CommentTag::Other => return Ok(()),
            CommentTag::Field => {
                if !text.contains(OPTIONAL_MARKER) {
                    return Err(DocsyncError::MissingOptionalMarker {
                        comment: comment.text.clone(),
                    });
                }
                text = text.replace(OPTIONAL_MARKER, "");
            }
            CommentTag::Class => {
                if !self.lines.is_empty() {
                    self.lines.push(String::new());
                }
            }
        }

        self.lines.push(text);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

pub struct TypeExtractor<'a> {
    engine: &'a QueryEngine,
    strip_prefix: &'a str,
}

impl<'a> TypeExtractor<'a> {
    pub fn new(engine: &'a QueryEngine, strip_prefix: &'a str) -> Self {
        Self {
            engine,
            strip_prefix,
        }
    }

    pub fn comments(&self, parsed: &ParsedFile) -> Result<Vec<DocComment>> {
        let captures = self.engine.captures(parsed, COMMENTS_QUERY, COMMENT_CAPTURE)?;
        Ok(captures.into_iter().map(|c| DocComment::new(c.text)).collect())
    }

    pub fn listing(&self, parsed: &ParsedFile) -> Result<TypeListing> {
        let mut listing = TypeListing::new(self.strip_prefix);
        for comment in self.comments(parsed)? {
            listing.push(&comment)?;
        }
        tracing::debug!("Collected {} type listing line(s)", listing.lines().len());
        Ok(listing)
    }

    /// Renders the declaration listing for a parsed source file.
    pub fn extract(&self, parsed: &ParsedFile) -> Result<String> {
        Ok(self.listing(parsed)?.render())
    }

    pub fn extract_file(&self, path: &Path) -> Result<String> {
        let parsed = self.engine.parser().parse_file(path)?;
        self.extract(&parsed)
    }

    pub fn extract_source(&self, source: &str) -> Result<String> {
        let parsed = self
            .engine
            .parser()
            .parse_text(Path::new("init.lua"), source.to_string())?;
        self.extract(&parsed)
    }
}
