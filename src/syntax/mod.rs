pub mod parser;
pub mod query;

pub use parser::{ParsedFile, Parser};
pub use query::{Capture, QueryEngine};
