use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use zeroframe_core::{Command, Frame, LogSink};

use crate::{
    error::ZeroFrameError,
    responses::{PeerLocation, ZeroResponse},
    ZeroFrame,
};

/// Chart plugin: statistics about the client and its peers.
impl<F: Frame, L: LogSink + 'static> ZeroFrame<F, L> {
    pub async fn chart_db_query<T: DeserializeOwned>(
        &self,
        query: &str,
        params: &HashMap<String, Value>,
    ) -> Result<Vec<T>, ZeroFrameError> {
        self.cmdp(
            Command::new("chartDbQuery")
                .param("query", query)
                .param("params", serde_json::to_value(params)?),
        )
        .await?
        .into_typed()
    }

    pub async fn chart_peer_locations(&self) -> Result<Vec<PeerLocation>, ZeroFrameError> {
        self.cmdp(Command::new("chartGetPeerLocations"))
            .await?
            .into_typed()
    }
}
