use std::collections::HashMap;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ZeroFrameError;

/// Interpretation of raw host responses.
pub trait ZeroResponse {
    /// `"ok"` means success; anything else is an error.
    fn into_ok(self) -> Result<(), ZeroFrameError>;
    /// `"ok"` when something changed, `"Not changed"` when it was already in place.
    fn into_changed(self) -> Result<bool, ZeroFrameError>;
    /// Deserialize the payload, also accepting JSON encoded inside a string.
    fn into_typed<T: DeserializeOwned>(self) -> Result<T, ZeroFrameError>;
}

impl ZeroResponse for Value {
    fn into_ok(self) -> Result<(), ZeroFrameError> {
        if self.as_str() == Some("ok") {
            return Ok(());
        }
        if let Some(err) = remote_error(&self) {
            return Err(err);
        }
        if is_falsy(&self) {
            return Err(ZeroFrameError::FalsyResponse);
        }
        Err(ZeroFrameError::InvalidResponse)
    }

    fn into_changed(self) -> Result<bool, ZeroFrameError> {
        match self.as_str() {
            Some("ok") => Ok(true),
            Some("Not changed") => Ok(false),
            _ => Err(remote_error(&self).unwrap_or(ZeroFrameError::InvalidResponse)),
        }
    }

    fn into_typed<T: DeserializeOwned>(self) -> Result<T, ZeroFrameError> {
        if let Some(err) = remote_error(&self) {
            return Err(err);
        }
        match serde_json::from_value(self.clone()) {
            Ok(typed) => Ok(typed),
            Err(err) => match self {
                Value::String(text) => {
                    serde_json::from_str(&text).map_err(|_| ZeroFrameError::InvalidResponse)
                }
                _ => Err(err.into()),
            },
        }
    }
}

/// `{"error": "..."}` as a lone key, either as an object or JSON text.
fn remote_error(value: &Value) -> Option<ZeroFrameError> {
    match value {
        Value::Object(map) => error_object(map),
        Value::String(text) => match serde_json::from_str::<Value>(text).ok()? {
            Value::Object(map) => error_object(&map),
            _ => None,
        },
        _ => None,
    }
}

fn error_object(map: &Map<String, Value>) -> Option<ZeroFrameError> {
    if map.len() != 1 {
        return None;
    }
    let message = map.get("error")?.as_str()?;
    Some(ZeroFrameError::Remote(message.to_string()))
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeerLocation {
    pub lat: f64,
    pub lon: f64,
    pub city: String,
    pub country: String,
    pub ping: Option<f64>,
}

/// Signing rules for a content file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FileRules {
    pub current_size: u64,
    pub max_size: u64,
    pub cert_signers: HashMap<String, Vec<String>>,
    pub files_allowed: String,
    pub signers: Vec<String>,
    pub user_address: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnnouncerStats {
    pub status: String,
    pub num_request: u64,
    pub num_success: u64,
    pub num_error: u64,
    pub time_request: f64,
    pub time_status: f64,
    pub time_last_error: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnnouncerInfo {
    /// Keyed by tracker address.
    pub stats: HashMap<String, AnnouncerStats>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerInfo {
    pub debug: bool,
    pub fileserver_ip: String,
    pub fileserver_port: u16,
    pub ip_external: bool,
    pub platform: String,
    pub ui_ip: String,
    pub ui_port: u16,
    pub version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteSettings {
    pub added: u64,
    pub ajax_key: String,
    pub bytes_recv: u64,
    pub bytes_sent: u64,
    pub cache: Value,
    pub downloaded: Option<u64>,
    pub modified: u64,
    pub optional_downloaded: u64,
    pub own: bool,
    pub peers: u64,
    pub permissions: Vec<String>,
    pub serving: bool,
    pub size: u64,
    pub size_files_optional: u64,
    pub size_optional: u64,
}

/// Summary of the site's root `content.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteContentSummary {
    pub address: String,
    pub address_index: u64,
    #[serde(rename = "background-color")]
    pub background_color: String,
    pub clone_root: String,
    pub cloneable: bool,
    pub cloned_from: String,
    pub description: String,
    pub files: u64,
    pub files_optional: u64,
    pub ignore: String,
    pub includes: u64,
    pub inner_path: String,
    pub merged_type: String,
    pub modified: u64,
    pub optional: String,
    pub postmessage_nonce_security: bool,
    pub signs_required: u64,
    pub title: String,
    pub translate: Vec<String>,
    pub zeronet_version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteInfo {
    pub address: String,
    pub address_hash: String,
    pub address_short: String,
    pub auth_address: Option<String>,
    pub auth_key: String,
    pub auth_key_sha512: String,
    pub cert_user_id: Option<String>,
    pub content: SiteContentSummary,
    pub settings: SiteSettings,
    pub bad_files: u64,
    pub peers: u64,
    pub tasks: u64,
    pub workers: u64,
    pub started_task_num: u64,
    pub size_limit: u64,
    pub next_size_limit: u64,
}
