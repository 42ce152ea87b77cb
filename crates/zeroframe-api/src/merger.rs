use std::collections::HashMap;

use zeroframe_core::{Command, Frame, LogSink};

use crate::{
    error::ZeroFrameError,
    responses::{SiteInfo, ZeroResponse},
    ZeroFrame,
};

/// MergerSite plugin: sites that aggregate data from other sites.
impl<F: Frame, L: LogSink + 'static> ZeroFrame<F, L> {
    /// Start downloading the given sites.
    pub fn merger_site_add(&self, addresses: &[String]) {
        self.cmd(Command::new("mergerSiteAdd").param("addresses", addresses.to_vec()));
    }

    /// Stop seeding and delete a merged site.
    pub fn merger_site_delete(&self, address: &str) {
        self.cmd(Command::new("mergerSiteDelete").param("address", address));
    }

    /// Addresses of merged sites.
    pub async fn merger_site_list(&self) -> Result<Vec<String>, ZeroFrameError> {
        let sites: HashMap<String, String> = self
            .cmdp(Command::new("mergerSiteList").param("query_site_info", false))
            .await?
            .into_typed()?;
        let mut addresses: Vec<String> = sites.into_keys().collect();
        addresses.sort();
        Ok(addresses)
    }

    /// Merged sites with their full site info, keyed by address.
    pub async fn merger_site_info_list(
        &self,
    ) -> Result<HashMap<String, SiteInfo>, ZeroFrameError> {
        self.cmdp(Command::new("mergerSiteList").param("query_site_info", true))
            .await?
            .into_typed()
    }
}
