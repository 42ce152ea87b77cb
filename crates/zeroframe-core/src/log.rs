use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use serde_json::Value;
use tracing::debug;

use crate::command::Params;

/// Diagnostic entry emitted around a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    /// Written before the frame is invoked.
    Sending { command: String, params: Params },
    /// Written once the frame delivered a result.
    Received { result: Value },
}

impl LogEntry {
    pub fn sending(command: &str, params: &Params) -> Self {
        Self::Sending {
            command: command.to_string(),
            params: params.clone(),
        }
    }

    pub fn received(result: Value) -> Self {
        Self::Received { result }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sending { command, params } => {
                let params = serde_json::to_string(params).map_err(|_| fmt::Error)?;
                write!(f, "sending {command} {params}")
            }
            // Bare strings read better unquoted ("received result pong").
            Self::Received {
                result: Value::String(text),
            } => write!(f, "received result {text}"),
            Self::Received { result } => write!(f, "received result {result}"),
        }
    }
}

/// Append-only destination for dispatch diagnostics.
pub trait LogSink: Send + Sync {
    fn append(&self, entry: LogEntry);
}

/// Forwards entries to `tracing` at debug level under the `zeroframe` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn append(&self, entry: LogEntry) {
        match entry {
            LogEntry::Sending { command, params } => {
                let params = Value::Object(params);
                debug!(target: "zeroframe", %command, %params, "sending");
            }
            LogEntry::Received { result } => {
                debug!(target: "zeroframe", %result, "received result");
            }
        }
    }
}

/// Keeps entries in memory, in append order. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemoryLogSink {
    inner: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    /// Entries rendered with their `Display` form.
    pub fn lines(&self) -> Vec<String> {
        self.lock().iter().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        // Push is the only mutation, so a poisoned buffer is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LogSink for MemoryLogSink {
    fn append(&self, entry: LogEntry) {
        self.lock().push(entry);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn renders_sending_with_json_params() {
        let entry = LogEntry::sending("ping", &params(json!({ "x": 1 })));
        assert_eq!(entry.to_string(), r#"sending ping {"x":1}"#);
    }

    #[test]
    fn renders_string_results_bare_and_others_as_json() {
        assert_eq!(
            LogEntry::received(json!("pong")).to_string(),
            "received result pong"
        );
        assert_eq!(
            LogEntry::received(json!({ "data": 42 })).to_string(),
            r#"received result {"data":42}"#
        );
    }

    #[test]
    fn memory_sink_keeps_order_across_clones() {
        let sink = MemoryLogSink::new();
        let other = sink.clone();
        sink.append(LogEntry::sending("a", &Params::new()));
        other.append(LogEntry::received(json!(1)));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.lines(), vec!["sending a {}", "received result 1"]);
    }

    #[test]
    fn tracing_sink_accepts_entries_without_subscriber() {
        TracingLogSink.append(LogEntry::sending("ping", &params(json!({ "x": 1 }))));
        TracingLogSink.append(LogEntry::received(Value::Null));
    }
}
