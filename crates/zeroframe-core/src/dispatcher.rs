use std::sync::Arc;

use serde_json::Value;

use crate::{
    command::Command,
    frame::Frame,
    log::{LogEntry, LogSink, TracingLogSink},
};

/// Sends commands to the frame in either calling mode and logs around each call.
///
/// Holds no state of its own: every call is independent, nothing is cached, retried,
/// timed out or correlated with other in-flight calls.
pub struct Dispatcher<F: Frame, L: LogSink = TracingLogSink> {
    frame: Arc<F>,
    sink: Arc<L>,
}

impl<F: Frame> Dispatcher<F> {
    /// Dispatcher that logs through `tracing`.
    pub fn new(frame: F) -> Self {
        Self::with_sink(frame, TracingLogSink)
    }
}

impl<F: Frame, L: LogSink + 'static> Dispatcher<F, L> {
    pub fn with_sink(frame: F, sink: L) -> Self {
        Self::from_shared(Arc::new(frame), Arc::new(sink))
    }

    /// Build from capabilities already shared with other components.
    pub fn from_shared(frame: Arc<F>, sink: Arc<L>) -> Self {
        Self { frame, sink }
    }

    pub fn frame(&self) -> &Arc<F> {
        &self.frame
    }

    pub fn sink(&self) -> &Arc<L> {
        &self.sink
    }

    /// Fire-and-forget: hand the command to the frame and return at once.
    ///
    /// The result is only logged, when and if the frame invokes the completion. Failures
    /// on the frame side are not observable here.
    pub fn dispatch(&self, command: impl Into<Command>) {
        let Command { name, params } = command.into();
        self.sink.append(LogEntry::sending(&name, &params));

        let sink = Arc::clone(&self.sink);
        self.frame.command(
            &name,
            params,
            Box::new(move |result: Value| sink.append(LogEntry::received(result))),
        );
    }

    /// Awaitable: run the command and resume with its result.
    ///
    /// The frame's error is returned as-is, and nothing is logged after a failure.
    pub async fn dispatch_async(&self, command: impl Into<Command>) -> Result<Value, F::Error> {
        let Command { name, params } = command.into();
        self.sink.append(LogEntry::sending(&name, &params));

        let result = self.frame.command_async(&name, params).await?;
        self.sink.append(LogEntry::received(result.clone()));
        Ok(result)
    }
}

impl<F: Frame, L: LogSink> Clone for Dispatcher<F, L> {
    fn clone(&self) -> Self {
        Self {
            frame: Arc::clone(&self.frame),
            sink: Arc::clone(&self.sink),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, PoisonError};

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::{
        command::Params,
        frame::Completion,
        log::MemoryLogSink,
        scripted::{Invocation, Mode, ScriptError, ScriptedFrame},
    };

    /// Echoes the command name back. Calls named `inline` complete before `command`
    /// returns; all others are stacked and released newest first.
    #[derive(Default)]
    struct StackFrame {
        stacked: Mutex<Vec<(Completion, Value)>>,
    }

    impl StackFrame {
        fn release(&self) {
            loop {
                let next = self
                    .stacked
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .pop();
                let Some((on_complete, result)) = next else {
                    break;
                };
                on_complete(result);
            }
        }
    }

    #[async_trait]
    impl Frame for StackFrame {
        type Error = ScriptError;

        fn command(&self, name: &str, _params: Params, on_complete: Completion) {
            if name == "inline" {
                on_complete(json!("pong"));
                return;
            }
            self.stacked
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((on_complete, json!(name)));
        }

        async fn command_async(&self, name: &str, _params: Params) -> Result<Value, ScriptError> {
            Ok(json!(name))
        }
    }

    fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn harness() -> (Dispatcher<ScriptedFrame, MemoryLogSink>, ScriptedFrame, MemoryLogSink) {
        let frame = ScriptedFrame::new();
        let sink = MemoryLogSink::new();
        let dispatcher = Dispatcher::with_sink(frame.clone(), sink.clone());
        (dispatcher, frame, sink)
    }

    #[test]
    fn fire_and_forget_logs_request_then_result() {
        let (dispatcher, frame, sink) = harness();
        frame.respond("ping", "pong");

        dispatcher.dispatch(Command::with_params("ping", params(json!({ "x": 1 }))));
        assert_eq!(sink.lines(), vec![r#"sending ping {"x":1}"#]);

        frame.flush();
        assert_eq!(
            sink.lines(),
            vec![r#"sending ping {"x":1}"#, "received result pong"]
        );
    }

    #[test]
    fn fire_and_forget_invokes_frame_exactly_once() {
        let (dispatcher, frame, _sink) = harness();
        let sent = params(json!({ "inner_path": "data.json" }));

        dispatcher.dispatch(("fileGet", sent.clone()));
        frame.flush();

        assert_eq!(
            frame.invocations(),
            vec![Invocation {
                mode: Mode::FireAndForget,
                command: "fileGet".into(),
                params: sent,
            }]
        );
    }

    #[test]
    fn omitted_params_reach_frame_as_empty_mapping() {
        let (dispatcher, frame, _sink) = harness();
        dispatcher.dispatch("siteUpdate");

        let calls = frame.invocations();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].params, Params::new());
    }

    #[test]
    fn missing_completion_leaves_single_entry() {
        let (dispatcher, frame, sink) = harness();
        frame.hang("slow");

        dispatcher.dispatch("slow");
        frame.flush();

        assert_eq!(sink.lines(), vec!["sending slow {}"]);
    }

    #[tokio::test]
    async fn awaitable_returns_result_and_logs_it() {
        let (dispatcher, frame, sink) = harness();
        frame.respond("fetch", json!({ "data": 42 }));

        let result = dispatcher
            .dispatch_async("fetch")
            .await
            .expect("fetch resolves");

        assert_eq!(result, json!({ "data": 42 }));
        assert_eq!(
            sink.lines(),
            vec!["sending fetch {}", r#"received result {"data":42}"#]
        );
        assert_eq!(frame.invocations()[0].mode, Mode::Awaitable);
    }

    #[tokio::test]
    async fn awaitable_failure_propagates_untouched() {
        let (dispatcher, frame, sink) = harness();
        frame.fail("fail", "boom");

        let err = dispatcher
            .dispatch_async("fail")
            .await
            .expect_err("fail rejects");

        assert_eq!(
            err,
            ScriptError::Failed {
                command: "fail".into(),
                message: "boom".into(),
            }
        );
        assert_eq!(sink.lines(), vec!["sending fail {}"]);
    }

    #[tokio::test]
    async fn unsettled_call_stays_suspended_after_logging_request() {
        let (dispatcher, frame, sink) = harness();
        frame.hang("never");

        let call = dispatcher.dispatch_async("never");
        let settled = tokio::select! {
            biased;
            _ = call => true,
            _ = std::future::ready(()) => false,
        };

        assert!(!settled);
        assert_eq!(sink.lines(), vec!["sending never {}"]);
    }

    #[tokio::test]
    async fn repeated_commands_are_not_deduplicated() {
        let (dispatcher, frame, sink) = harness();
        frame.respond("ping", "pong");

        dispatcher.dispatch("ping");
        dispatcher.dispatch("ping");
        dispatcher.dispatch_async("ping").await.expect("first");
        dispatcher.dispatch_async("ping").await.expect("second");
        frame.flush();

        assert_eq!(frame.invocations().len(), 4);
        assert_eq!(
            sink.lines(),
            vec![
                "sending ping {}",
                "sending ping {}",
                "sending ping {}",
                "received result pong",
                "sending ping {}",
                "received result pong",
                "received result pong",
                "received result pong",
            ]
        );
    }

    #[test]
    fn fifo_frame_completes_in_call_order() {
        let (dispatcher, frame, sink) = harness();
        frame.respond("a", "first").respond("b", "second");

        dispatcher.dispatch("a");
        dispatcher.dispatch("b");
        frame.flush();

        let received: Vec<_> = sink
            .entries()
            .into_iter()
            .filter_map(|entry| match entry {
                LogEntry::Received { result } => Some(result),
                LogEntry::Sending { .. } => None,
            })
            .collect();
        assert_eq!(received, vec![json!("first"), json!("second")]);
    }

    #[test]
    fn completions_follow_frame_order_not_call_order() {
        let frame = Arc::new(StackFrame::default());
        let sink = MemoryLogSink::new();
        let dispatcher = Dispatcher::from_shared(Arc::clone(&frame), Arc::new(sink.clone()));

        dispatcher.dispatch("a");
        dispatcher.dispatch("b");
        frame.release();

        assert_eq!(
            sink.lines(),
            vec![
                "sending a {}",
                "sending b {}",
                "received result b",
                "received result a",
            ]
        );
    }

    #[test]
    fn inline_completion_is_logged_after_request() {
        let sink = MemoryLogSink::new();
        let dispatcher = Dispatcher::with_sink(StackFrame::default(), sink.clone());

        dispatcher.dispatch(Command::with_params("inline", params(json!({ "x": 1 }))));

        assert_eq!(
            sink.lines(),
            vec![r#"sending inline {"x":1}"#, "received result pong"]
        );
    }
}
