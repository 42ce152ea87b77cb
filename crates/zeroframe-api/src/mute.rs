use zeroframe_core::{Command, Frame, LogSink};

use crate::{error::ZeroFrameError, responses::ZeroResponse, ZeroFrame};

/// Mute plugin: hide content from selected users.
impl<F: Frame, L: LogSink + 'static> ZeroFrame<F, L> {
    pub async fn mute_add(
        &self,
        auth_address: &str,
        cert_user_id: &str,
        reason: &str,
    ) -> Result<(), ZeroFrameError> {
        self.cmdp(
            Command::new("muteAdd")
                .param("auth_address", auth_address)
                .param("cert_user_id", cert_user_id)
                .param("reason", reason),
        )
        .await?
        .into_ok()
    }

    pub async fn mute_remove(&self, auth_address: &str) -> Result<(), ZeroFrameError> {
        self.cmdp(Command::new("muteRemove").param("auth_address", auth_address))
            .await?
            .into_ok()
    }

    pub async fn mute_list(&self) -> Result<Vec<String>, ZeroFrameError> {
        self.cmdp(Command::new("muteList")).await?.into_typed()
    }
}
