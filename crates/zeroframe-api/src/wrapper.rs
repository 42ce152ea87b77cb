use std::fmt;

use serde_json::Value;
use zeroframe_core::{Command, Frame, LogSink};

use crate::{error::ZeroFrameError, ZeroFrame};

/// Style of a wrapper notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Error,
    Info,
    Done,
}

impl NotificationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Info => "info",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input style of a wrapper prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptType {
    Text,
    Password,
}

impl PromptType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
        }
    }
}

impl fmt::Display for PromptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Commands handled by the wrapper page around the site iframe.
///
/// The wrapper reads its arguments by position. The parameter names sent here (`message`,
/// `button`, `timeout`, ...) are this crate's convention, not names the wrapper is known to
/// accept; a frame talking to a positional host maps them back in declaration order.
impl<F: Frame, L: LogSink + 'static> ZeroFrame<F, L> {
    /// Show a notification; `timeout` in milliseconds, sticky when absent.
    pub fn notification(
        &self,
        notification_type: NotificationType,
        message: &str,
        timeout: Option<u64>,
    ) {
        self.cmd(
            Command::new("wrapperNotification")
                .param("type", notification_type.as_str())
                .param("message", message)
                .param_opt("timeout", timeout),
        );
    }

    pub fn notify_info(&self, message: impl fmt::Display, timeout: Option<u64>) {
        self.notification(NotificationType::Info, &message.to_string(), timeout);
    }

    pub fn notify_error(&self, message: impl fmt::Display, timeout: Option<u64>) {
        self.notification(NotificationType::Error, &message.to_string(), timeout);
    }

    pub fn notify_done(&self, message: impl fmt::Display, timeout: Option<u64>) {
        self.notification(NotificationType::Done, &message.to_string(), timeout);
    }

    /// Ask the user to confirm; resolves to whether the button was pressed.
    pub async fn confirm(&self, message: &str, button: &str) -> Result<bool, ZeroFrameError> {
        let response = self
            .cmdp(
                Command::new("wrapperConfirm")
                    .param("message", message)
                    .param("button", button),
            )
            .await?;
        response
            .as_f64()
            .map(|pressed| pressed == 1.0)
            .ok_or(ZeroFrameError::InvalidResponse)
    }

    /// Tell the wrapper the site finished loading (hash navigation is applied after this).
    pub fn inner_loaded(&self) {
        self.cmd(Command::new("wrapperInnerLoaded"));
    }

    pub async fn get_local_storage(&self) -> Result<Value, ZeroFrameError> {
        self.cmdp(Command::new("wrapperGetLocalStorage")).await
    }

    pub async fn get_state(&self) -> Result<Value, ZeroFrameError> {
        self.cmdp(Command::new("wrapperGetState")).await
    }

    pub async fn get_ajax_key(&self) -> Result<Value, ZeroFrameError> {
        self.cmdp(Command::new("wrapperGetAjaxKey")).await
    }

    pub fn open_window(&self, url: &str, target: Option<&str>, specs: Option<&str>) {
        self.cmd(
            Command::new("wrapperOpenWindow")
                .param("url", url)
                .param_opt("target", target)
                .param_opt("specs", specs),
        );
    }

    /// Request a site permission; `true` once granted.
    pub async fn permission_add(&self, permission: &str) -> Result<bool, ZeroFrameError> {
        let response = self
            .cmdp(Command::new("wrapperPermissionAdd").param("permission", permission))
            .await?;
        Ok(response.as_str() == Some("ok"))
    }

    pub async fn prompt(
        &self,
        message: &str,
        prompt_type: PromptType,
    ) -> Result<Value, ZeroFrameError> {
        self.cmdp(
            Command::new("wrapperPrompt")
                .param("message", message)
                .param("type", prompt_type.as_str()),
        )
        .await
    }

    pub fn push_state(&self, state: Value, title: &str, url: &str) {
        self.cmd(history_command("wrapperPushState", state, title, url));
    }

    pub fn replace_state(&self, state: Value, title: &str, url: &str) {
        self.cmd(history_command("wrapperReplaceState", state, title, url));
    }

    #[deprecated = "the fullscreen browser API can be used directly without asking the wrapper"]
    pub fn request_fullscreen(&self) {
        self.cmd(Command::new("wrapperRequestFullscreen"));
    }

    pub fn set_local_storage(&self, data: Value) {
        self.cmd(Command::new("wrapperSetLocalStorage").param("data", data));
    }

    pub fn set_title(&self, title: impl fmt::Display) {
        self.cmd(Command::new("wrapperSetTitle").param("title", title.to_string()));
    }

    pub fn set_viewport(&self, viewport: &str) {
        self.cmd(Command::new("wrapperSetViewport").param("viewport", viewport));
    }
}

fn history_command(name: &str, state: Value, title: &str, url: &str) -> Command {
    Command::new(name)
        .param("state", state)
        .param("title", title)
        .param("url", url)
}
