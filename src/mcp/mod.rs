//! Model Context Protocol (MCP) server.
//!
//! Exposes the annotator to AI coding agents over stdio.

mod server;
pub mod types;

pub use server::{HushlintMcpServer, run_server};
