//! Verify zip codes against the live lookup service.
//!
//! ```bash
//! ZIPCODE_ALLOWED=01001000,20040002 cargo run --example verify_zipcode -- 01001000 20040002 123
//! ```
//!
//! Set `RUST_LOG=zipcode_validator_rs=debug` to see each step.

use std::env;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zipcode_validator_rs::{HttpTransport, ValidatorConfig, ZipCodeValidator};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "verify_zipcode=info,zipcode_validator_rs=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let zip_codes: Vec<String> = env::args().skip(1).collect();
    if zip_codes.is_empty() {
        anyhow::bail!("Usage: verify_zipcode <zip_code>...");
    }

    let config = ValidatorConfig::from_env();
    tracing::info!(
        "Using {} with {} allowed zip code(s)",
        config.base_uri,
        config.allowed_zip_codes.len()
    );

    let transport = HttpTransport::new().context("Failed to initialize HTTP transport")?;
    let validator = ZipCodeValidator::from_config(transport, config);

    for zip_code in &zip_codes {
        match validator.verify_zip_code(zip_code).await {
            Ok(zip) => println!("{}: {}", zip_code, zip.location()),
            Err(e) => println!("{}: error: {}", zip_code, e),
        }
    }

    Ok(())
}
