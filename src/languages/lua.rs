use super::LanguageGrammar;

pub struct LuaGrammar;

impl LanguageGrammar for LuaGrammar {
    fn name(&self) -> &'static str {
        "lua"
    }

    fn file_extensions(&self) -> &[&'static str] {
        &["lua"]
    }

    fn language(&self) -> tree_sitter::Language {
        tree_sitter_lua::LANGUAGE.into()
    }
}
