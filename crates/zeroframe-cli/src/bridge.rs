use color_eyre::{eyre::eyre, Result};
use serde_json::Value;
use tracing::{info, instrument};
use zeroframe_api::ZeroFrame;
use zeroframe_core::{Command, Dispatcher, LogSink, Params, ScriptedFrame};

use crate::config::FrameConfig;

/// Build the scripted host described by the `[frame]` config table.
pub fn frame_from_config(config: &FrameConfig) -> ScriptedFrame {
    let frame = ScriptedFrame::new();
    for (command, value) in &config.responses {
        frame.respond(command.as_str(), value.clone());
    }
    for (command, message) in &config.failures {
        frame.fail(command.as_str(), message.as_str());
    }
    frame
}

/// Parse `--params`; absent means no parameters.
pub fn parse_params(raw: Option<&str>) -> Result<Params> {
    let Some(raw) = raw else {
        return Ok(Params::new());
    };
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(params) => Ok(params),
        other => Err(eyre!("--params must be a JSON object, got {other}")),
    }
}

/// Fire-and-forget a command, then let the host deliver pending completions.
/// Returns how many completions were delivered.
#[instrument(skip_all, fields(command = %command.name))]
pub fn send<L: LogSink + 'static>(
    dispatcher: &Dispatcher<ScriptedFrame, L>,
    command: Command,
) -> usize {
    dispatcher.dispatch(command);
    let delivered = dispatcher.frame().flush();
    info!(delivered, "host flushed completions");
    delivered
}

/// Run a command and return whatever the host answered.
pub async fn call<L: LogSink + 'static>(
    dispatcher: &Dispatcher<ScriptedFrame, L>,
    command: Command,
) -> Result<Value> {
    Ok(dispatcher.dispatch_async(command).await?)
}

pub async fn ping<L: LogSink + 'static>(dispatcher: Dispatcher<ScriptedFrame, L>) -> Result<()> {
    ZeroFrame::from_dispatcher(dispatcher).ping().await?;
    Ok(())
}
