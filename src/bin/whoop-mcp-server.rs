// ABOUTME: WHOOP MCP server binary speaking JSON-RPC over stdin/stdout
// ABOUTME: Loads configuration from the environment, builds the client, and serves until EOF
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # WHOOP MCP Server Binary
//!
//! Intended to be launched by an MCP client (e.g. Claude Desktop) as a stdio
//! subprocess. Logs go to stderr.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::{error, info};
use whoop_mcp_server::{
    config::ServerConfig,
    logging::{LogFormat, LoggingConfig},
    mcp::{run_stdio, McpServer},
    providers::WhoopClient,
};

/// Command-line arguments for the WHOOP MCP server
#[derive(Parser)]
#[command(name = "whoop-mcp-server")]
#[command(about = "WHOOP MCP Server - cycles, recovery, sleep and workout data for LLMs")]
#[command(version)]
pub struct Args {
    /// Log output format (json, pretty, compact); overrides `LOG_FORMAT`
    #[arg(long, value_parser = parse_log_format)]
    log_format: Option<LogFormat>,
}

fn parse_log_format(raw: &str) -> Result<LogFormat, String> {
    LogFormat::from_str_param(raw)
        .ok_or_else(|| format!("unknown log format '{raw}', expected json, pretty, or compact"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut logging = LoggingConfig::from_env();
    if let Some(format) = args.log_format {
        logging = logging.with_format(format);
    }
    logging.init()?;

    let config = ServerConfig::from_env().map_err(|e| {
        error!("Failed to load configuration: {e}");
        anyhow!(e)
    })?;

    let client = WhoopClient::new(&config).map_err(|e| {
        error!("Failed to create WHOOP client: {e}");
        anyhow!(e)
    })?;

    let server = McpServer::with_builtin_tools(Arc::new(client));
    info!("Starting WHOOP MCP server");

    run_stdio(&server).await?;

    info!("WHOOP MCP server shutting down");
    Ok(())
}
