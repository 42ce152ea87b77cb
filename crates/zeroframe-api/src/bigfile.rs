use serde_json::Value;
use zeroframe_core::{Command, Frame, LogSink};

use crate::{error::ZeroFrameError, ZeroFrame};

impl<F: Frame, L: LogSink + 'static> ZeroFrame<F, L> {
    /// Prepare a big file upload. The answer carries the upload url and piece size.
    pub async fn bigfile_upload_init(
        &self,
        inner_path: &str,
        size: u64,
    ) -> Result<Value, ZeroFrameError> {
        self.cmdp(
            Command::new("bigfileUploadInit")
                .param("inner_path", inner_path)
                .param("size", size),
        )
        .await
    }
}
