use serde::Serialize;
use serde_json::Value;
use zeroframe_core::{Command, Frame, LogSink};

use crate::{error::ZeroFrameError, responses::ZeroResponse, ZeroFrame};

/// Newsfeed plugin.
impl<F: Frame, L: LogSink + 'static> ZeroFrame<F, L> {
    /// Replace the followed feed queries, keyed by feed title.
    pub async fn feed_follow<T: Serialize>(&self, feeds: &T) -> Result<(), ZeroFrameError> {
        let feeds = serde_json::to_value(feeds)?;
        self.cmdp(Command::new("feedFollow").param("feeds", feeds))
            .await?
            .into_ok()
    }

    pub async fn feed_list_follow(&self) -> Result<Value, ZeroFrameError> {
        self.cmdp(Command::new("feedListFollow")).await
    }

    /// Run the followed queries of every site for the user's news feed.
    pub async fn feed_query(&self, limit: u64, day_limit: u64) -> Result<Value, ZeroFrameError> {
        self.cmdp(
            Command::new("feedQuery")
                .param("limit", limit)
                .param("day_limit", day_limit),
        )
        .await
    }
}
