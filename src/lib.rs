pub mod config;
pub mod docs;
pub mod error;
pub mod languages;
pub mod sync;
pub mod syntax;

pub use config::{Config, CONFIG_FILENAME};
pub use docs::{CodeSample, CommentTag, DocComment, ReadmeSync, TypeExtractor, TypeListing};
pub use error::{DocsyncError, Result};
pub use languages::{LanguageGrammar, LanguageRegistry};
pub use sync::{FileReport, FileStatus, PendingWrite, SyncPlan};
pub use syntax::{Capture, ParsedFile, Parser, QueryEngine};
