//! Core of the ZeroFrame bridge: the command dispatcher plus the frame and log-sink contracts
//! it is wired with. Typed commands live in `zeroframe-api`.

pub mod command;
pub mod dispatcher;
pub mod frame;
pub mod log;
pub mod scripted;

pub use command::{Command, Params};
pub use dispatcher::Dispatcher;
pub use frame::{Completion, Frame};
pub use log::{LogEntry, LogSink, MemoryLogSink, TracingLogSink};
pub use scripted::{Invocation, Mode, ScriptError, ScriptedFrame};
