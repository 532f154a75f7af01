//! Application configuration loaded from environment variables.
//!
//! Required: `HMAC_SECRET`, `OWNER_ACCOUNT`
//! Optional: `HTTP_PORT`, `FULFILLMENT_CONCURRENCY`, `FULFILLMENT_DELAY_MS`,
//!           `UPLOAD_NFT`, `IMAGE_DIR`, `STORAGE_API_URL`, `STORAGE_API_KEY`,
//!           `PRICE_FEED_URL`, `PRICE_POLL_INTERVAL_SECS`, `VERIFIER_API_URL`

use anyhow::{Context, Result};
use mint_engine::AccountId;

/// Application configuration for the minting backend.
#[derive(Clone)]
pub struct AppConfig {
    /// Secret key for HMAC-SHA256 randomness generation.
    pub hmac_secret: Vec<u8>,
    /// Identity allowed to withdraw the random-mint treasury.
    pub owner_account: AccountId,
    /// HTTP server port.
    pub http_port: u16,
    /// Maximum concurrent fulfillment tasks.
    pub fulfillment_concurrency: usize,
    /// Artificial delay before each fulfillment, in milliseconds. Models the
    /// oracle round-trip gap so requests stay observably pending.
    pub fulfillment_delay_ms: u64,
    /// Upload breed images to the content store at startup instead of using
    /// the baked-in URIs.
    pub upload_nft: bool,
    /// Directory holding the three breed images (tilde-expanded).
    pub image_dir: String,
    /// Content-addressed storage API endpoint.
    pub storage_api_url: String,
    /// Bearer token for the storage API.
    pub storage_api_key: Option<String>,
    /// JSON price endpoint polled for the dynamic variant's feed.
    pub price_feed_url: Option<String>,
    /// Price poll interval in seconds.
    pub price_poll_interval_secs: u64,
    /// Remote instance verifier endpoint; verification is skipped when unset.
    pub verifier_api_url: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let hmac_secret = std::env::var("HMAC_SECRET")
            .context("HMAC_SECRET env var must be set")?
            .into_bytes();

        let owner_str =
            std::env::var("OWNER_ACCOUNT").context("OWNER_ACCOUNT env var must be set")?;
        let owner_account = owner_str
            .parse::<AccountId>()
            .with_context(|| format!("invalid OWNER_ACCOUNT: {owner_str}"))?;

        let http_port = std::env::var("HTTP_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8080);

        let fulfillment_concurrency = std::env::var("FULFILLMENT_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(4);

        let fulfillment_delay_ms = std::env::var("FULFILLMENT_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(500);

        let upload_nft = std::env::var("UPLOAD_NFT")
            .map(|v| v == "true")
            .unwrap_or(false);

        let image_dir = std::env::var("IMAGE_DIR").unwrap_or_else(|_| "./img".into());
        let image_dir = shellexpand::tilde(&image_dir).to_string();

        let storage_api_url =
            std::env::var("STORAGE_API_URL").unwrap_or_else(|_| "https://api.nft.storage".into());
        let storage_api_key = std::env::var("STORAGE_API_KEY").ok();

        let price_feed_url = std::env::var("PRICE_FEED_URL").ok();

        let price_poll_interval_secs = std::env::var("PRICE_POLL_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let verifier_api_url = std::env::var("VERIFIER_API_URL").ok();

        Ok(Self {
            hmac_secret,
            owner_account,
            http_port,
            fulfillment_concurrency,
            fulfillment_delay_ms,
            upload_nft,
            image_dir,
            storage_api_url,
            storage_api_key,
            price_feed_url,
            price_poll_interval_secs,
            verifier_api_url,
        })
    }
}
