// ABOUTME: Newline-delimited JSON-RPC transport over async readers and writers
// ABOUTME: Runs the MCP server on stdin/stdout until the client closes the stream
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use super::server::McpServer;
use crate::errors::{AppError, AppResult};
use crate::jsonrpc::JsonRpcResponse;

/// Serve requests read line by line from `reader`, writing one response line
/// per request to `writer`. Returns at end of input.
///
/// # Errors
///
/// Returns an error if reading, writing, or serializing a response fails
pub async fn serve<R, W>(server: &McpServer, reader: R, mut writer: W) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        if let Some(response) = server.handle_message(&line).await {
            write_response(&mut writer, &response).await?;
        }
    }

    debug!("MCP input closed");
    Ok(())
}

/// Run the server on the process's stdin and stdout
///
/// # Errors
///
/// Returns an error if stdio processing fails
pub async fn run_stdio(server: &McpServer) -> AppResult<()> {
    info!("MCP stdio transport ready - listening on stdin/stdout");
    serve(server, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}

async fn write_response<W>(writer: &mut W, response: &JsonRpcResponse) -> AppResult<()>
where
    W: AsyncWrite + Unpin,
{
    let response_json = serde_json::to_string(response)
        .map_err(|e| AppError::internal(format!("JSON serialization failed: {e}")))?;
    debug!("Sending MCP response: {} bytes", response_json.len());

    writer.write_all(response_json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
