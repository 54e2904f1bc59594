use std::env;

use serde::Deserialize;

/// Default lookup service (ViaCEP).
pub const DEFAULT_BASE_URI: &str = "https://viacep.com.br/ws";

/// Construction-time settings for a [`ZipCodeValidator`](crate::ZipCodeValidator)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidatorConfig {
    /// Lookup service base URI, without trailing slash
    #[serde(default = "default_base_uri")]
    pub base_uri: String,
    /// Zip codes the validator is allowed to enrich (exact match)
    #[serde(default)]
    pub allowed_zip_codes: Vec<String>,
}

fn default_base_uri() -> String {
    DEFAULT_BASE_URI.to_string()
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            base_uri: default_base_uri(),
            allowed_zip_codes: Vec::new(),
        }
    }
}

impl ValidatorConfig {
    /// Read `ZIPCODE_API_URI` and `ZIPCODE_ALLOWED` (comma-separated).
    pub fn from_env() -> Self {
        Self {
            base_uri: env::var("ZIPCODE_API_URI").unwrap_or_else(|_| default_base_uri()),
            allowed_zip_codes: env::var("ZIPCODE_ALLOWED")
                .map(|list| parse_allowed(&list))
                .unwrap_or_default(),
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn parse_allowed(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
