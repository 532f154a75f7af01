//! Live price feed for the dynamic SVG variant.
//!
//! A background poller fetches a JSON price endpoint and stores the reading
//! as fixed-point in a shared atomic cell; the engine-facing feed reads the
//! cell fresh on every evaluation.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use mint_engine::{PRICE_DECIMALS, PriceFeed};
use serde::Deserialize;
use tracing::{debug, warn};

/// Shared fixed-point price cell with [`PRICE_DECIMALS`] implied decimals.
#[derive(Clone)]
pub struct SharedPrice {
    cell: Arc<AtomicI64>,
}

impl SharedPrice {
    pub fn new(initial: i64) -> Self {
        Self {
            cell: Arc::new(AtomicI64::new(initial)),
        }
    }

    pub fn store(&self, reading: i64) {
        self.cell.store(reading, Ordering::Relaxed);
    }

    pub fn load(&self) -> i64 {
        self.cell.load(Ordering::Relaxed)
    }
}

impl PriceFeed for SharedPrice {
    fn latest_reading(&self) -> i64 {
        self.load()
    }
}

/// Expected response shape of the price endpoint.
#[derive(Debug, Deserialize)]
struct PriceResponse {
    price: f64,
}

/// Poll `url` forever, storing each reading into `price`.
///
/// Fetch errors leave the previous reading in place; the next tick retries.
pub async fn run_price_poller(url: String, interval: Duration, price: SharedPrice) {
    let client = reqwest::Client::new();

    loop {
        match fetch_price(&client, &url).await {
            Ok(reading) => {
                debug!(reading, "price updated");
                price.store(reading);
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch price, keeping previous reading");
            }
        }
        tokio::time::sleep(interval).await;
    }
}

/// Fetch one reading and convert it to fixed-point.
async fn fetch_price(client: &reqwest::Client, url: &str) -> anyhow::Result<i64> {
    let response: PriceResponse = client.get(url).send().await?.error_for_status()?.json().await?;
    Ok((response.price * 10f64.powi(PRICE_DECIMALS as i32)).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_price_reads_the_latest_store() {
        let price = SharedPrice::new(100);
        let feed = price.clone();
        assert_eq!(feed.latest_reading(), 100);
        price.store(200_000_000_000);
        assert_eq!(feed.latest_reading(), 200_000_000_000);
    }
}
