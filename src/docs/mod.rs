//! Generated documentation artifacts
//!
//! This module derives documentation from the plugin's Lua source: the type
//! annotation listing (`types.lua`) and the setup sample embedded in the README.

pub mod readme;
pub mod types;

pub use readme::{splice, CodeSample, ReadmeSync};
pub use types::{CommentTag, DocComment, TypeExtractor, TypeListing};
