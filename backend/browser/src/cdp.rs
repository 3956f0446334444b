//! Minimal Chrome DevTools Protocol client.
//!
//! JSON-RPC over a page-target WebSocket: send a command, read frames until
//! the reply with our id arrives, skipping interleaved protocol events.

use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, trace};

const COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

pub struct CdpClient {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
    next_id: u64,
}

impl CdpClient {
    /// Attach to a page target's WebSocket endpoint.
    pub async fn connect(ws_endpoint: &str) -> Result<Self> {
        debug!(ws_endpoint, "connecting to CDP websocket");
        let (ws, _) = connect_async(ws_endpoint).await?;
        Ok(Self { ws, next_id: 0 })
    }

    /// Dispatch one CDP command and wait for its reply.
    pub async fn send_command(&mut self, method: &str, params: Value) -> Result<Value> {
        self.next_id += 1;
        let id = self.next_id;
        let payload = json!({ "id": id, "method": method, "params": params });
        trace!(method, id, "sending CDP command");
        self.ws.send(Message::Text(payload.to_string())).await?;

        tokio::time::timeout(COMMAND_TIMEOUT, self.wait_for_reply(id))
            .await
            .map_err(|_| anyhow!("CDP command {method} timed out"))?
    }

    async fn wait_for_reply(&mut self, id: u64) -> Result<Value> {
        while let Some(frame) = self.ws.next().await {
            let frame = frame?;
            let text = match frame {
                Message::Text(t) => t,
                // Events and pings are not ours to handle here.
                _ => continue,
            };
            let msg: Value = match serde_json::from_str(&text) {
                Ok(v) => v,
                Err(_) => continue,
            };
            if msg["id"].as_u64() != Some(id) {
                continue;
            }
            if let Some(err) = msg.get("error") {
                bail!("CDP error: {err}");
            }
            return Ok(msg["result"].clone());
        }
        bail!("CDP websocket closed before reply")
    }
}
