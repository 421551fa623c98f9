//! Deferred diagnostics for rewritten attributes.
//!
//! The rewriter hands one [`Diagnostic`] per conversion to a [`DiagnosticSink`].
//! Sinks never block the tree walk: records are either buffered and logged after
//! the pass, or sent to a background task that logs them as they arrive.

use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// A diagnostic record: a message plus an arbitrary structured detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub detail: Value,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, detail: Value) -> Self {
        Self {
            message: message.into(),
            detail,
        }
    }
}

/// Destination for diagnostics emitted during a rewrite.
pub trait DiagnosticSink {
    /// Accept a record. Must not block.
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Discards all diagnostics.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _diagnostic: Diagnostic) {}
}

/// Buffers diagnostics until [`flush`] is called.
impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Sends diagnostics to a background task (see [`spawn_logger`]).
///
/// A closed channel drops the record.
impl DiagnosticSink for UnboundedSender<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        let _ = self.send(diagnostic);
    }
}

/// Log a single record with its detail pretty-printed.
pub fn log(diagnostic: &Diagnostic) {
    let detail = serde_json::to_string_pretty(&diagnostic.detail)
        .unwrap_or_else(|_| diagnostic.detail.to_string());
    tracing::debug!("{}\n{}", diagnostic.message, detail);
}

/// Log buffered records. Call once the synchronous pass has finished.
pub fn flush(diagnostics: Vec<Diagnostic>) -> usize {
    let count = diagnostics.len();
    for diagnostic in &diagnostics {
        log(diagnostic);
    }
    count
}

/// Spawn a task that logs records until every sender is dropped.
///
/// Resolves to the number of records logged.
pub fn spawn_logger(mut receiver: UnboundedReceiver<Diagnostic>) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut count = 0;
        while let Some(diagnostic) = receiver.recv().await {
            log(&diagnostic);
            count += 1;
        }
        count
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tokio::sync::mpsc;

    #[test]
    fn buffer_collects_in_order() {
        let mut buffer: Vec<Diagnostic> = Vec::new();

        buffer.emit(Diagnostic::new("first", json!(1)));
        buffer.emit(Diagnostic::new("second", json!({ "a": [1, 2] })));

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer[0].message, "first");
        assert_eq!(flush(buffer), 2);
    }

    #[tokio::test]
    async fn logger_drains_channel() {
        let (mut sender, receiver) = mpsc::unbounded_channel();
        let handle = spawn_logger(receiver);

        sender.emit(Diagnostic::new("one", json!(null)));
        sender.emit(Diagnostic::new("two", json!("detail")));
        drop(sender);

        assert_eq!(handle.await.unwrap(), 2);
    }

    #[test]
    fn closed_channel_drops_records() {
        let (mut sender, receiver) = mpsc::unbounded_channel();
        drop(receiver);

        sender.emit(Diagnostic::new("lost", json!(null)));
    }
}
