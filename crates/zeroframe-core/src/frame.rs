use async_trait::async_trait;
use serde_json::Value;

use crate::command::Params;

/// Single-shot completion handler for fire-and-forget commands.
pub type Completion = Box<dyn FnOnce(Value) + Send + 'static>;

/// The hosting frame that actually executes commands.
///
/// Implementations own the transport; the dispatcher only hands commands over and
/// never inspects what comes back.
#[async_trait]
pub trait Frame: Send + Sync {
    /// Failure reported by the awaitable path. Passed through to callers untouched.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Start a command and return immediately. `on_complete` is invoked at most once,
    /// at some later point, with the result. There is no error callback.
    fn command(&self, name: &str, params: Params, on_complete: Completion);

    /// Run a command and resolve with its result or the frame's error.
    async fn command_async(&self, name: &str, params: Params) -> Result<Value, Self::Error>;
}
