//! Typed ZeroFrame API on top of the `zeroframe-core` dispatcher.
//!
//! Each module adds one group of host commands to [`ZeroFrame`]. Commands the host answers
//! are `async` and interpret the response; the rest are fire-and-forget and return `()`.

pub mod bigfile;
pub mod chart;
pub mod cors;
pub mod crypt;
pub mod error;
pub mod feed;
pub mod merger;
pub mod multiuser;
pub mod mute;
pub mod optional;
pub mod requests;
pub mod responses;
pub mod site;
pub mod wrapper;

use serde_json::Value;
use zeroframe_core::{Command, Dispatcher, Frame, LogSink, TracingLogSink};

pub use error::ZeroFrameError;
pub use requests::RequestHandlers;
pub use responses::ZeroResponse;
pub use wrapper::{NotificationType, PromptType};

/// Site-side handle to the hosting frame.
pub struct ZeroFrame<F: Frame, L: LogSink = TracingLogSink> {
    dispatcher: Dispatcher<F, L>,
    requests: RequestHandlers,
}

impl<F: Frame> ZeroFrame<F> {
    pub fn new(frame: F) -> Self {
        Self::from_dispatcher(Dispatcher::new(frame))
    }
}

impl<F: Frame, L: LogSink + 'static> ZeroFrame<F, L> {
    pub fn from_dispatcher(dispatcher: Dispatcher<F, L>) -> Self {
        Self {
            dispatcher,
            requests: RequestHandlers::default(),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher<F, L> {
        &self.dispatcher
    }

    /// Handlers for requests pushed by the host (e.g. `setSiteInfo`).
    pub fn requests(&self) -> &RequestHandlers {
        &self.requests
    }

    fn cmd(&self, command: Command) {
        self.dispatcher.dispatch(command);
    }

    async fn cmdp(&self, command: Command) -> Result<Value, ZeroFrameError> {
        self.dispatcher
            .dispatch_async(command)
            .await
            .map_err(ZeroFrameError::transport)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use zeroframe_core::{Dispatcher, MemoryLogSink, ScriptedFrame};

    use super::ZeroFrame;

    pub(crate) fn harness() -> (ZeroFrame<ScriptedFrame, MemoryLogSink>, ScriptedFrame) {
        let frame = ScriptedFrame::new();
        let zf = ZeroFrame::from_dispatcher(Dispatcher::with_sink(
            frame.clone(),
            MemoryLogSink::new(),
        ));
        (zf, frame)
    }
}
