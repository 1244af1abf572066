//! Source parsing.
//!
//! - `jsx`: swc-based parser building the arena [`SyntaxTree`](crate::core::tree::SyntaxTree)
//! - `comments`: attaches source comments to tree nodes
//! - `lines`: byte offset to line lookup

pub mod comments;
pub mod jsx;
mod lines;

pub use jsx::{parse_source, syntax_for_path};
