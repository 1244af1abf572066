//! Hushlint - place ESLint suppression directives for existing violations
//!
//! Given the errors ESLint reports for a file, hushlint inserts
//! `eslint-disable-next-line` (or `eslint-disable-line`) comments at the
//! right place, including inside JSX markup, and extends directives that are
//! already there instead of stacking new ones. Running it twice changes
//! nothing the second time.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Syntax tree, directive placement and the per-file pipeline
//! - `lint`: Diagnostic sources (ESLint process or saved report)
//! - `mcp`: Model Context Protocol server implementation

pub mod cli;
pub mod config;
pub mod core;
pub mod lint;
pub mod mcp;
