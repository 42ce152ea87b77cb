use zeroframe_core::{Command, Frame, LogSink};

use crate::{error::ZeroFrameError, responses::ZeroResponse, ZeroFrame};

impl<F: Frame, L: LogSink + 'static> ZeroFrame<F, L> {
    /// Ask for read access to another site's files.
    pub async fn cors_permission(&self, address: &str) -> Result<(), ZeroFrameError> {
        self.cmdp(Command::new("corsPermission").param("address", address))
            .await?
            .into_ok()
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::harness;

    use super::*;

    #[tokio::test]
    async fn cors_permission_accepts_ok_only() {
        let (zf, frame) = harness();
        frame.respond("corsPermission", "ok");
        zf.cors_permission("1Other").await.expect("granted");

        frame.respond("corsPermission", false);
        assert!(matches!(
            zf.cors_permission("1Other").await,
            Err(ZeroFrameError::FalsyResponse)
        ));
    }
}
