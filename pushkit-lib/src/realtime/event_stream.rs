//! Parser for the Realtime Database streaming protocol.
//!
//! The REST streaming endpoint speaks Server-Sent Events. Each event is a
//! block of `event:` and `data:` lines terminated by a blank line:
//!
//! ```text
//! event: put
//! data: {"path": "/", "data": {"n1": {"title": "Hi"}}}
//!
//! event: keep-alive
//! data: null
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::{PushkitError, Result};

/// One decoded server event.
#[derive(Clone, Debug, PartialEq)]
pub enum StreamEvent {
    /// Replace the value at `path` (relative to the subscribed node).
    Put { path: String, data: Value },
    /// Merge the children of `data` into the value at `path`.
    Patch { path: String, data: Value },
    /// Heartbeat, no payload.
    KeepAlive,
    /// The server stopped the subscription, usually because rules deny reads.
    Cancel(String),
    /// The auth token expired or was revoked.
    AuthRevoked(String),
}

#[derive(Deserialize)]
struct PathPayload {
    path: String,
    data: Value,
}

/// Incremental event stream parser.
///
/// Feed it raw bytes as they arrive; it buffers partial lines (including
/// split UTF-8 sequences) until a full event is available.
#[derive(Debug, Default)]
pub struct EventStreamParser {
    buffer: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
}

impl EventStreamParser {
    /// Create an empty parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a chunk and return every event it completes.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if a line is not UTF-8 or a `put`/`patch`
    /// payload is not `{ "path", "data" }` JSON.
    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<StreamEvent>> {
        self.buffer.extend_from_slice(chunk);
        let mut events = Vec::new();

        while let Some(end) = self.buffer.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=end).collect();
            let line = std::str::from_utf8(&raw[..end])
                .map_err(|e| PushkitError::Serialization(format!("event stream is not UTF-8: {}", e)))?;
            let line = line.strip_suffix('\r').unwrap_or(line);

            if let Some(event) = self.handle_line(line)? {
                events.push(event);
            }
        }

        Ok(events)
    }

    fn handle_line(&mut self, line: &str) -> Result<Option<StreamEvent>> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return Ok(None);
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            _ => {}
        }
        Ok(None)
    }

    fn dispatch(&mut self) -> Result<Option<StreamEvent>> {
        let event = self.event.take();
        let data = std::mem::take(&mut self.data).join("\n");

        let Some(event) = event else {
            return Ok(None);
        };

        let decoded = match event.as_str() {
            "put" => {
                let payload: PathPayload = serde_json::from_str(&data)?;
                Some(StreamEvent::Put {
                    path: payload.path,
                    data: payload.data,
                })
            }
            "patch" => {
                let payload: PathPayload = serde_json::from_str(&data)?;
                Some(StreamEvent::Patch {
                    path: payload.path,
                    data: payload.data,
                })
            }
            "keep-alive" => Some(StreamEvent::KeepAlive),
            "cancel" => Some(StreamEvent::Cancel(reason(&data))),
            "auth_revoked" => Some(StreamEvent::AuthRevoked(reason(&data))),
            _other => {
                #[cfg(feature = "tracing")]
                tracing::debug!(event = _other, "ignoring unknown stream event");
                None
            }
        };

        Ok(decoded)
    }
}

/// `cancel` and `auth_revoked` carry a JSON string, `null`, or bare text.
fn reason(data: &str) -> String {
    match serde_json::from_str::<Value>(data) {
        Ok(Value::String(s)) => s,
        Ok(Value::Null) => String::new(),
        _ => data.to_string(),
    }
}

/// Parse a complete event stream body in one go.
///
/// A trailing event without its terminating blank line is dropped.
pub fn parse_event_stream(body: &str) -> Result<Vec<StreamEvent>> {
    EventStreamParser::new().push(body.as_bytes())
}
