use std::sync::Arc;

use futures::TryStreamExt;

use crate::config::ValidatorConfig;
use crate::error::ZipCodeError;
use crate::transport::{ResponseBody, Transport};
use crate::types::ZipCode;

const ZIP_CODE_LEN: usize = 8;

/// Validates zip codes against an allow-list and looks up their locality.
///
/// Holds no per-call state; clones share the same transport.
#[derive(Clone)]
pub struct ZipCodeValidator {
    transport: Arc<dyn Transport>,
    base_uri: String,
    allowed_zip_codes: Vec<String>,
}

impl ZipCodeValidator {
    pub fn new(
        transport: impl Transport + 'static,
        base_uri: impl Into<String>,
        allowed_zip_codes: Vec<String>,
    ) -> Self {
        Self {
            transport: Arc::new(transport),
            base_uri: base_uri.into(),
            allowed_zip_codes,
        }
    }

    pub fn from_config(transport: impl Transport + 'static, config: ValidatorConfig) -> Self {
        Self::new(transport, config.base_uri, config.allowed_zip_codes)
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn allowed_zip_codes(&self) -> &[String] {
        &self.allowed_zip_codes
    }

    /// Check the candidate, fetch its locality and decode the response.
    ///
    /// The first failing step ends the call: format, allow-list, transport,
    /// body read, JSON decode.
    pub async fn verify_zip_code(&self, zip_code: &str) -> Result<ZipCode, ZipCodeError> {
        self.check(zip_code)?;

        let url = self.lookup_url(zip_code);
        tracing::debug!(%url, "Fetching zip code details");
        let body = self
            .transport
            .call(&url)
            .await
            .map_err(ZipCodeError::Transport)?;

        let zip = parse_zip_code(body).await?;
        tracing::debug!(zip_code, city = %zip.city, state = %zip.state, "Zip code verified");
        Ok(zip)
    }

    /// Format and allow-list checks only, no I/O.
    pub fn check(&self, zip_code: &str) -> Result<(), ZipCodeError> {
        // Length is measured in bytes
        if zip_code.len() != ZIP_CODE_LEN {
            tracing::debug!(zip_code, "Rejected zip code: invalid format");
            return Err(ZipCodeError::InvalidFormat);
        }

        if !self.allowed_zip_codes.iter().any(|code| code == zip_code) {
            tracing::debug!(zip_code, "Rejected zip code: not in allow-list");
            return Err(ZipCodeError::NotAllowed);
        }

        Ok(())
    }

    /// `<base-uri>/<zip_code>/json`, unescaped.
    pub fn lookup_url(&self, zip_code: &str) -> String {
        format!("{}/{}/json", self.base_uri, zip_code)
    }
}

async fn parse_zip_code(body: ResponseBody) -> Result<ZipCode, ZipCodeError> {
    let bytes: Vec<u8> = body.try_concat().await.map_err(ZipCodeError::Read)?;
    Ok(serde_json::from_slice(&bytes)?)
}
