//! Fulfillment engine — consumes mint request events and delivers oracle
//! callbacks to the minting service.
//!
//! Each fulfillment task:
//! 1. Waits out the configured oracle gap (requests stay observably pending).
//! 2. Computes the deterministic HMAC-SHA256 randomness for the request.
//! 3. Expands it into random words and invokes the engine's callback entry
//!    point under the single-writer lock.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use mint_engine::{MintError, MintRequested};
use tokio::sync::{Semaphore, mpsc};
use tracing::{error, info, warn};

use crate::SharedRandomNft;
use crate::config::AppConfig;
use crate::metrics::Metrics;
use crate::vrf::{compute_randomness, expand_words};

/// Number of random words delivered per fulfillment.
const NUM_WORDS: u32 = 1;

/// Main fulfiller loop.
pub async fn run_fulfiller(
    config: AppConfig,
    mut rx: mpsc::Receiver<MintRequested>,
    nft: SharedRandomNft,
    pending_count: Arc<AtomicU64>,
    metrics: Arc<Metrics>,
) {
    let semaphore = Arc::new(Semaphore::new(config.fulfillment_concurrency));

    while let Some(event) = rx.recv().await {
        pending_count.fetch_add(1, Ordering::Relaxed);

        let permit = match semaphore.clone().acquire_owned().await {
            Ok(p) => p,
            Err(_) => {
                error!("Semaphore closed, stopping fulfiller");
                break;
            }
        };
        let cfg = config.clone();
        let nft = nft.clone();
        let pending = pending_count.clone();
        let met = metrics.clone();

        tokio::spawn(async move {
            let _permit = permit;
            let start = Instant::now();

            info!(
                request_id = event.request_id,
                requester = %event.requester,
                "Fulfilling mint request"
            );

            if cfg.fulfillment_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(cfg.fulfillment_delay_ms)).await;
            }

            let randomness = compute_randomness(&cfg.hmac_secret, event.request_id, &event.requester);
            let words = expand_words(&randomness, NUM_WORDS);

            let result = nft
                .lock()
                .expect("engine mutex poisoned")
                .fulfill_random_words(event.request_id, &words);

            match result {
                Ok(minted) => {
                    let latency_ms = start.elapsed().as_millis() as u64;
                    met.record_fulfillment(latency_ms);
                    info!(
                        request_id = event.request_id,
                        breed = %minted.breed,
                        owner = %minted.owner,
                        latency_ms,
                        "Fulfilled successfully"
                    );
                }
                Err(e) => handle_fulfillment_error(event.request_id, e, &met),
            }

            pending.fetch_sub(1, Ordering::Relaxed);
        });
    }

    info!("Fulfiller channel closed, shutting down");
}

fn handle_fulfillment_error(request_id: u64, error: MintError, metrics: &Metrics) {
    // A consumed or never-issued request id cannot be repaired by retrying.
    if matches!(error, MintError::UnknownRequest { .. }) {
        warn!(request_id, reason = %error, "Skipping request (non-retryable)");
    } else {
        metrics.record_failure();
        error!(request_id, error = %error, "Failed to fulfill");
    }
}
