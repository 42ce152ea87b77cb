use serde_json::Value;
use zeroframe_core::{Command, Frame, LogSink};

use crate::{error::ZeroFrameError, ZeroFrame};

const CURRENT_SITE: &str = "current site";
const NEWEST_FIRST: &str = "time_downloaded DESC";

/// OptionalManager plugin: optional files and the help-distribute settings.
impl<F: Frame, L: LogSink + 'static> ZeroFrame<F, L> {
    pub async fn optional_file_list(
        &self,
        address: Option<&str>,
        orderby: Option<&str>,
        limit: u64,
    ) -> Result<Value, ZeroFrameError> {
        self.cmdp(
            Command::new("optionalFileList")
                .param("address", address.unwrap_or(CURRENT_SITE))
                .param("orderby", orderby.unwrap_or(NEWEST_FIRST))
                .param("limit", limit),
        )
        .await
    }

    pub async fn optional_file_info(&self, inner_path: &str) -> Result<Value, ZeroFrameError> {
        self.cmdp(Command::new("optionalFileInfo").param("inner_path", inner_path))
            .await
    }

    pub fn optional_file_pin(&self, inner_path: &str, address: Option<&str>) {
        self.cmd(
            Command::new("optionalFilePin")
                .param("inner_path", inner_path)
                .param_opt("address", address),
        );
    }

    pub fn optional_file_unpin(&self, inner_path: &str, address: Option<&str>) {
        self.cmd(
            Command::new("optionalFileUnpin")
                .param("inner_path", inner_path)
                .param_opt("address", address),
        );
    }

    pub async fn optional_limit_stats(&self) -> Result<Value, ZeroFrameError> {
        self.cmdp(Command::new("optionalLimitStats")).await
    }

    /// Storage limit for optional files, in GB.
    pub fn optional_limit_set(&self, limit: f64) {
        self.cmd(Command::new("optionalLimitSet").param("limit", limit));
    }

    pub async fn optional_help_list(&self, address: &str) -> Result<Value, ZeroFrameError> {
        self.cmdp(Command::new("optionalHelpList").param("address", address))
            .await
    }

    pub fn optional_help(&self, directory: &str, title: &str, address: Option<&str>) {
        self.cmd(
            Command::new("optionalHelp")
                .param("directory", directory)
                .param("title", title)
                .param_opt("address", address),
        );
    }

    pub fn optional_help_remove(&self, directory: &str, address: Option<&str>) {
        self.cmd(
            Command::new("optionalHelpRemove")
                .param("directory", directory)
                .param_opt("address", address),
        );
    }

    pub fn optional_help_all(&self, value: bool, address: Option<&str>) {
        self.cmd(
            Command::new("optionalHelpAll")
                .param("value", value)
                .param_opt("address", address),
        );
    }
}
