use super::LanguageGrammar;

/// Block-level markdown grammar. Fenced code blocks live at this level, so
/// the inline grammar is never needed.
pub struct MarkdownGrammar;

impl LanguageGrammar for MarkdownGrammar {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn file_extensions(&self) -> &[&'static str] {
        &["md", "markdown"]
    }

    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }
}
