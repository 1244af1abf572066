use std::path::Path;

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use super::types::{
    ConfigDto, ConfigValues, GetConfigParams, SkippedItem, SuppressSourceParams,
    SuppressSourceResult,
};
use crate::{
    config::{Config, load_config, validate_message},
    core::{Diagnostic, FileOutcome, annotate_source},
};

#[derive(Clone)]
pub struct HushlintMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for HushlintMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

fn project_config(project_root_path: Option<&str>) -> Result<Config, McpError> {
    match project_root_path {
        Some(path) => load_config(Path::new(path))
            .map(|result| result.config)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None)),
        None => Ok(Config::default()),
    }
}

#[tool_router]
impl HushlintMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Insert suppression directives into one source text
    #[tool(
        description = "Insert eslint-disable-next-line (or eslint-disable-line) comments into a JS/TS/JSX source text so the given lint errors are suppressed. Existing directives on the same line are extended instead of duplicated. Returns the annotated text; nothing is written to disk."
    )]
    pub async fn suppress_source(
        &self,
        params: Parameters<SuppressSourceParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let mut config = project_config(params.project_root_path.as_deref())?;
        if let Some(message) = params.message {
            validate_message(&message)
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
            config.message = message;
        }
        if let Some(rules) = params.rules {
            config.rules = rules;
        }
        if let Some(inline) = params.inline {
            config.inline = inline;
        }

        let diagnostics: Vec<Diagnostic> =
            params.diagnostics.into_iter().map(Diagnostic::from).collect();
        let (outcome, summary) = annotate_source(
            &params.source,
            &params.file_path,
            &diagnostics,
            &config.annotate_options(),
        )
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        let (changed, source) = match outcome {
            FileOutcome::Changed(text) => (true, text),
            FileOutcome::Unchanged => (false, params.source),
        };
        to_json_result(&SuppressSourceResult {
            changed,
            source,
            inserted: summary.inserted,
            merged: summary.merged,
            already_suppressed: summary.already_suppressed,
            skipped: summary.skipped.iter().map(SkippedItem::from).collect(),
        })
    }

    /// Get the current hushlint configuration
    #[tool(description = "Get the current hushlint configuration.")]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?;

        to_json_result(&ConfigDto {
            from_file: result.from_file,
            config: ConfigValues::from(result.config),
        })
    }
}

#[tool_handler]
impl ServerHandler for HushlintMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Hushlint MCP places ESLint suppression comments for existing errors.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration (default message, rule whitelist, inline mode)\n\
                 2. suppress_source - Annotate one source text given its lint errors\n\n\
                 Pass the diagnostics exactly as ESLint reported them (line, ruleId, severity). \
                 Running suppress_source again on its own output changes nothing."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = HushlintMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
