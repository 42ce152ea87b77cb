use serde_json::Value;
use zeroframe_core::{Command, Frame, LogSink};

use crate::{error::ZeroFrameError, ZeroFrame};

const GENERATE_NEW: &str = "generate new";

/// CryptMessage plugin. Results are passed through as returned by the host.
impl<F: Frame, L: LogSink + 'static> ZeroFrame<F, L> {
    pub async fn user_publickey(&self, index: Option<u64>) -> Result<Value, ZeroFrameError> {
        self.cmdp(Command::new("userPublickey").param_opt("index", index))
            .await
    }

    pub async fn ecies_encrypt(
        &self,
        text: &str,
        publickey_index: u64,
        return_aes_key: bool,
    ) -> Result<Value, ZeroFrameError> {
        self.cmdp(
            Command::new("eciesEncrypt")
                .param("text", text)
                .param("publickey", publickey_index)
                .param("return_aes_key", return_aes_key),
        )
        .await
    }

    pub async fn ecies_decrypt(
        &self,
        param: &str,
        privatekey_index: u64,
    ) -> Result<Value, ZeroFrameError> {
        self.cmdp(
            Command::new("eciesDecrypt")
                .param("param", param)
                .param("privatekey", privatekey_index),
        )
        .await
    }

    /// AES encrypt `text`; the host generates key and iv when they are not given.
    pub async fn aes_encrypt(
        &self,
        text: &str,
        key: Option<&str>,
        iv: Option<&str>,
    ) -> Result<Value, ZeroFrameError> {
        self.cmdp(
            Command::new("aesEncrypt")
                .param("text", text)
                .param("key", key.unwrap_or(GENERATE_NEW))
                .param("iv", iv.unwrap_or(GENERATE_NEW)),
        )
        .await
    }

    /// The host reads this command's arguments by position; the `iv`/`encrypted_text`/`key`
    /// names are this crate's own and have not been checked against a keyword-aware host.
    pub async fn aes_decrypt(
        &self,
        iv: &str,
        encrypted_text: &str,
        key: &str,
    ) -> Result<Value, ZeroFrameError> {
        self.cmdp(
            Command::new("aesDecrypt")
                .param("iv", iv)
                .param("encrypted_text", encrypted_text)
                .param("key", key),
        )
        .await
    }
}
