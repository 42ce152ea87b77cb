use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::instrument;
use zeroframe_core::{Command, Frame, LogSink};

use crate::{
    error::ZeroFrameError,
    responses::{AnnouncerInfo, FileRules, ServerInfo, SiteInfo, ZeroResponse},
    ZeroFrame,
};

const STORED_KEY: &str = "stored";
const ROOT_CONTENT: &str = "content.json";

/// Site and file commands served by the UI server.
impl<F: Frame, L: LogSink + 'static> ZeroFrame<F, L> {
    pub async fn announcer_info(&self) -> Result<AnnouncerInfo, ZeroFrameError> {
        self.cmdp(Command::new("announcerInfo")).await?.into_typed()
    }

    /// Add a certificate for the current user.
    /// `Ok(false)` means the same certificate was already present.
    #[instrument(skip(self, cert))]
    pub async fn cert_add(
        &self,
        domain: &str,
        auth_type: &str,
        auth_user_name: &str,
        cert: &str,
    ) -> Result<bool, ZeroFrameError> {
        self.cmdp(
            Command::new("certAdd")
                .param("domain", domain)
                .param("auth_type", auth_type)
                .param("auth_user_name", auth_user_name)
                .param("cert", cert),
        )
        .await?
        .into_changed()
    }

    /// Open the certificate selection dialog.
    pub fn cert_select(
        &self,
        accepted_domains: &[String],
        accept_any: bool,
        accepted_pattern: Option<&str>,
    ) {
        self.cmd(
            Command::new("certSelect")
                .param("accepted_domains", accepted_domains.to_vec())
                .param("accept_any", accept_any)
                .param_opt("accepted_pattern", accepted_pattern),
        );
    }

    pub fn channel_join(&self, channel: &str) {
        self.cmd(Command::new("channelJoin").param("channels", vec![channel]));
    }

    /// Run a query against the site database.
    #[instrument(skip(self, params))]
    pub async fn db_query<T: DeserializeOwned>(
        &self,
        query: &str,
        params: &HashMap<String, Value>,
    ) -> Result<Vec<T>, ZeroFrameError> {
        self.cmdp(
            Command::new("dbQuery")
                .param("query", query)
                .param("params", serde_json::to_value(params)?),
        )
        .await?
        .into_typed()
    }

    pub async fn dir_list(&self, inner_path: &str) -> Result<Vec<String>, ZeroFrameError> {
        self.cmdp(Command::new("dirList").param("inner_path", inner_path))
            .await?
            .into_typed()
    }

    pub async fn file_delete(&self, inner_path: &str) -> Result<(), ZeroFrameError> {
        self.cmdp(Command::new("fileDelete").param("inner_path", inner_path))
            .await?
            .into_ok()
    }

    /// File content as text; `None` when the file does not exist and was not required.
    pub async fn file_get_string(
        &self,
        inner_path: &str,
        required: bool,
        timeout: Option<u64>,
    ) -> Result<Option<String>, ZeroFrameError> {
        let response = self.file_get(inner_path, required, "text", timeout).await?;
        optional_text(response)
    }

    /// File content as bytes, fetched base64-encoded.
    pub async fn file_get_bytes(
        &self,
        inner_path: &str,
        required: bool,
        timeout: Option<u64>,
    ) -> Result<Option<Vec<u8>>, ZeroFrameError> {
        let response = self
            .file_get(inner_path, required, "base64", timeout)
            .await?;
        match optional_text(response)? {
            Some(encoded) => Ok(Some(BASE64.decode(encoded)?)),
            None => Ok(None),
        }
    }

    async fn file_get(
        &self,
        inner_path: &str,
        required: bool,
        format: &str,
        timeout: Option<u64>,
    ) -> Result<Value, ZeroFrameError> {
        self.cmdp(
            Command::new("fileGet")
                .param("inner_path", inner_path)
                .param("required", required)
                .param("format", format)
                .param("timeout", timeout.unwrap_or(0)),
        )
        .await
    }

    /// Recursive listing of the files under `inner_path`.
    pub async fn file_list(&self, inner_path: &str) -> Result<Vec<String>, ZeroFrameError> {
        self.cmdp(Command::new("fileList").param("inner_path", inner_path))
            .await?
            .into_typed()
    }

    /// Start downloading an optional file and wait until it arrives.
    pub async fn file_need(&self, inner_path: &str, timeout: u64) -> Result<(), ZeroFrameError> {
        if timeout == 0 {
            return Err(ZeroFrameError::InvalidArgument(
                "fileNeed timeout must be greater than 0".to_string(),
            ));
        }
        self.cmdp(
            Command::new("fileNeed")
                .param("inner_path", inner_path)
                .param("timeout", timeout),
        )
        .await?
        .into_ok()
    }

    /// Query JSON files directly, e.g. `data/users/*/data.json` with `messages`.
    pub async fn file_query<T: DeserializeOwned>(
        &self,
        dir_inner_path: &str,
        query: Option<&str>,
    ) -> Result<Vec<T>, ZeroFrameError> {
        self.cmdp(
            Command::new("fileQuery")
                .param("dir_inner_path", dir_inner_path)
                .param_opt("query", query),
        )
        .await?
        .into_typed()
    }

    pub async fn file_rules(&self, inner_path: &str) -> Result<FileRules, ZeroFrameError> {
        self.cmdp(Command::new("fileRules").param("inner_path", inner_path))
            .await?
            .into_typed()
    }

    #[instrument(skip(self, content), fields(len = content.len()))]
    pub async fn file_write_bytes(
        &self,
        inner_path: &str,
        content: &[u8],
    ) -> Result<(), ZeroFrameError> {
        self.cmdp(
            Command::new("fileWrite")
                .param("inner_path", inner_path)
                .param("content_base64", BASE64.encode(content)),
        )
        .await?
        .into_ok()
    }

    pub async fn file_write_string(
        &self,
        inner_path: &str,
        content: &str,
    ) -> Result<(), ZeroFrameError> {
        self.file_write_bytes(inner_path, content.as_bytes()).await
    }

    /// Succeeds when the host answers `pong`.
    pub async fn ping(&self) -> Result<(), ZeroFrameError> {
        let response = self.cmdp(Command::new("ping")).await?;
        match response.as_str() {
            Some("pong") => Ok(()),
            _ => Err(ZeroFrameError::InvalidResponse),
        }
    }

    pub async fn server_info(&self) -> Result<ServerInfo, ZeroFrameError> {
        self.cmdp(Command::new("serverInfo")).await?.into_typed()
    }

    pub async fn site_info(&self) -> Result<SiteInfo, ZeroFrameError> {
        self.cmdp(Command::new("siteInfo")).await?.into_typed()
    }

    /// Sign (when `sign`) and publish a content file.
    /// Defaults to the stored private key and the root `content.json`.
    #[instrument(skip(self, privatekey))]
    pub async fn site_publish(
        &self,
        privatekey: Option<&str>,
        inner_path: Option<&str>,
        sign: bool,
    ) -> Result<(), ZeroFrameError> {
        self.cmdp(
            Command::new("sitePublish")
                .param("privatekey", privatekey.unwrap_or(STORED_KEY))
                .param("inner_path", inner_path.unwrap_or(ROOT_CONTENT))
                .param("sign", sign),
        )
        .await?
        .into_ok()
    }

    pub async fn site_reload(&self) -> Result<(), ZeroFrameError> {
        self.cmdp(Command::new("siteReload")).await?.into_ok()
    }

    #[instrument(skip(self, privatekey))]
    pub async fn site_sign(
        &self,
        privatekey: Option<&str>,
        inner_path: Option<&str>,
        remove_missing_optional: bool,
    ) -> Result<(), ZeroFrameError> {
        self.cmdp(
            Command::new("siteSign")
                .param("privatekey", privatekey.unwrap_or(STORED_KEY))
                .param("inner_path", inner_path.unwrap_or(ROOT_CONTENT))
                .param("remove_missing_optional", remove_missing_optional),
        )
        .await?
        .into_ok()
    }

    /// Re-download the site (or `address`) from peers.
    pub fn site_update(&self, address: Option<&str>) {
        self.cmd(Command::new("siteUpdate").param_opt("address", address));
    }

    /// Per-user settings stored for this site.
    pub async fn user_get_settings<T: DeserializeOwned>(&self) -> Result<T, ZeroFrameError> {
        self.cmdp(Command::new("userGetSettings"))
            .await?
            .into_typed()
    }

    pub async fn user_set_settings<T: Serialize>(
        &self,
        settings: &T,
    ) -> Result<(), ZeroFrameError> {
        let settings = serde_json::to_value(settings)?;
        self.cmdp(Command::new("userSetSettings").param("settings", settings))
            .await?
            .into_ok()
    }
}

fn optional_text(response: Value) -> Result<Option<String>, ZeroFrameError> {
    match response {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        other => match other.into_ok() {
            Err(err @ ZeroFrameError::Remote(_)) => Err(err),
            _ => Err(ZeroFrameError::InvalidResponse),
        },
    }
}
