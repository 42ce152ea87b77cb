use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::{
    command::Params,
    frame::{Completion, Frame},
};

/// Errors produced by [`ScriptedFrame`] on the awaitable path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScriptError {
    /// The command was scripted to fail.
    #[error("command {command} failed: {message}")]
    Failed { command: String, message: String },
    /// Nothing was scripted for the command.
    #[error("no scripted response for command: {0}")]
    Unscripted(String),
}

/// Which frame entry point a call went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    FireAndForget,
    Awaitable,
}

/// One recorded call into the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub mode: Mode,
    pub command: String,
    pub params: Params,
}

#[derive(Debug, Clone)]
enum Script {
    Respond(Value),
    Fail(String),
    Hang,
}

#[derive(Default)]
struct State {
    scripts: HashMap<String, Script>,
    invocations: Vec<Invocation>,
    pending: VecDeque<(Completion, Value)>,
    requests: VecDeque<(String, Value)>,
}

/// In-process frame that answers from canned responses. Used by tests and the CLI smoke runner.
///
/// Fire-and-forget completions are queued rather than run inline, and only delivered by
/// [`ScriptedFrame::flush`], the same way a real host answers on a later turn of its loop.
/// Clones share scripts, recorded calls and the pending queue.
#[derive(Clone, Default)]
pub struct ScriptedFrame {
    inner: Arc<Mutex<State>>,
}

impl ScriptedFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command` with `value` from now on.
    pub fn respond(&self, command: impl Into<String>, value: impl Into<Value>) -> &Self {
        self.state()
            .scripts
            .insert(command.into(), Script::Respond(value.into()));
        self
    }

    /// Reject awaitable calls to `command` with `message`.
    pub fn fail(&self, command: impl Into<String>, message: impl Into<String>) -> &Self {
        self.state()
            .scripts
            .insert(command.into(), Script::Fail(message.into()));
        self
    }

    /// Never settle awaitable calls to `command`, and never complete fire-and-forget ones.
    pub fn hang(&self, command: impl Into<String>) -> &Self {
        self.state().scripts.insert(command.into(), Script::Hang);
        self
    }

    /// Deliver queued completions in FIFO order. Returns how many ran.
    pub fn flush(&self) -> usize {
        let mut delivered = 0;
        loop {
            // Lock is released before the callback runs; callbacks may call back in.
            let next = self.state().pending.pop_front();
            let Some((on_complete, result)) = next else {
                break;
            };
            on_complete(result);
            delivered += 1;
        }
        delivered
    }

    /// Completions queued and not yet flushed.
    pub fn pending(&self) -> usize {
        self.state().pending.len()
    }

    /// Queue a request as if the host had pushed it to the page.
    pub fn push_request(&self, command: impl Into<String>, params: impl Into<Value>) -> &Self {
        self.state()
            .requests
            .push_back((command.into(), params.into()));
        self
    }

    /// Drain pushed requests, oldest first.
    pub fn take_requests(&self) -> Vec<(String, Value)> {
        self.state().requests.drain(..).collect()
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.state().invocations.clone()
    }

    fn record(&self, mode: Mode, command: &str, params: Params) -> Option<Script> {
        let mut state = self.state();
        state.invocations.push(Invocation {
            mode,
            command: command.to_string(),
            params,
        });
        state.scripts.get(command).cloned()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Frame for ScriptedFrame {
    type Error = ScriptError;

    fn command(&self, name: &str, params: Params, on_complete: Completion) {
        let result = match self.record(Mode::FireAndForget, name, params) {
            Some(Script::Respond(value)) => value,
            Some(Script::Hang) => return,
            // No error channel on this path: failures surface as a null result.
            Some(Script::Fail(_)) | None => Value::Null,
        };
        self.state().pending.push_back((on_complete, result));
    }

    async fn command_async(&self, name: &str, params: Params) -> Result<Value, ScriptError> {
        match self.record(Mode::Awaitable, name, params) {
            Some(Script::Respond(value)) => Ok(value),
            Some(Script::Fail(message)) => Err(ScriptError::Failed {
                command: name.to_string(),
                message,
            }),
            Some(Script::Hang) => std::future::pending().await,
            None => Err(ScriptError::Unscripted(name.to_string())),
        }
    }
}
