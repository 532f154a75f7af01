//! HTTP API for the minting backend.
//!
//! Mutating routes drive the engine under its single-writer lock; the random
//! mint route also forwards the emitted event to the fulfiller channel, which
//! is what makes the oracle gap observable to clients.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use actix_web::{HttpResponse, web};
use mint_engine::{AccountId, MintError, TokenId};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::error;

use crate::metrics::Metrics;
use crate::price::SharedPrice;
use crate::{SharedDynamicNft, SharedRandomNft};

/// Shared application state accessible from HTTP handlers.
pub struct AppState {
    pub random: SharedRandomNft,
    pub dynamic: SharedDynamicNft,
    /// Feed of mint request events consumed by the fulfiller.
    pub request_tx: mpsc::Sender<mint_engine::MintRequested>,
    /// Number of fulfillment tasks currently in-flight.
    pub pending_count: Arc<AtomicU64>,
    pub metrics: Arc<Metrics>,
    pub price: SharedPrice,
}

/// Stable name of an engine error kind, for matchable API errors.
fn error_kind(error: &MintError) -> &'static str {
    match error {
        MintError::InsufficientFee { .. } => "InsufficientFee",
        MintError::RangeOutOfBounds { .. } => "RangeOutOfBounds",
        MintError::NonexistentToken { .. } => "NonexistentToken",
        MintError::NotOwner => "NotOwner",
        MintError::UnknownRequest { .. } => "UnknownRequest",
        MintError::EmptyRandomWords { .. } => "EmptyRandomWords",
    }
}

fn error_response(error: &MintError) -> HttpResponse {
    let body = serde_json::json!({
        "error": error_kind(error),
        "message": error.to_string(),
    });
    match error {
        MintError::NonexistentToken { .. } | MintError::UnknownRequest { .. } => {
            HttpResponse::NotFound().json(body)
        }
        MintError::NotOwner => HttpResponse::Forbidden().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Liveness probe — returns 200 if the process is running.
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"status": "ok"}))
}

/// Readiness / status probe — reports in-flight and pending work.
pub async fn status(data: web::Data<AppState>) -> HttpResponse {
    let in_flight = data.pending_count.load(Ordering::Relaxed);
    let pending_requests = data
        .random
        .lock()
        .expect("engine mutex poisoned")
        .pending_requests()
        .len();
    HttpResponse::Ok().json(serde_json::json!({
        "status": "running",
        "pending_fulfillments": in_flight,
        "pending_requests": pending_requests,
    }))
}

/// Aggregated metrics.
pub async fn metrics(data: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(data.metrics.to_json())
}

#[derive(Debug, Deserialize)]
pub struct RandomMintRequest {
    pub requester: AccountId,
    /// Paid fee in native base units.
    pub paid_amount: u64,
}

/// Open a random mint request. The token arrives later, once the fulfiller
/// delivers the oracle callback.
pub async fn request_mint(
    data: web::Data<AppState>,
    body: web::Json<RandomMintRequest>,
) -> HttpResponse {
    let result = data
        .random
        .lock()
        .expect("engine mutex poisoned")
        .request_nft(body.requester, body.paid_amount);

    match result {
        Ok(event) => {
            data.metrics.record_request();
            if data.request_tx.send(event.clone()).await.is_err() {
                // The request stays in the ledger; only delivery is lost.
                error!(request_id = event.request_id, "Fulfiller channel closed");
                return HttpResponse::ServiceUnavailable()
                    .json(serde_json::json!({"error": "FulfillerUnavailable"}));
            }
            HttpResponse::Accepted().json(event)
        }
        Err(e) => error_response(&e),
    }
}

#[derive(Debug, Deserialize)]
pub struct DynamicMintRequest {
    pub owner: AccountId,
    pub value: i64,
}

/// Mint a dynamic SVG token synchronously.
pub async fn mint_dynamic(
    data: web::Data<AppState>,
    body: web::Json<DynamicMintRequest>,
) -> HttpResponse {
    let event = data
        .dynamic
        .lock()
        .expect("engine mutex poisoned")
        .mint_nft(body.owner, body.value);
    data.metrics.record_dynamic_mint();
    HttpResponse::Created().json(event)
}

/// Token URI of a finalized random mint.
pub async fn random_token_uri(
    data: web::Data<AppState>,
    path: web::Path<TokenId>,
) -> HttpResponse {
    let token_id = path.into_inner();
    let nft = data.random.lock().expect("engine mutex poisoned");
    match nft.token_uri(token_id) {
        Ok(uri) => HttpResponse::Ok().json(serde_json::json!({
            "token_id": token_id,
            "token_uri": uri,
        })),
        Err(e) => error_response(&e),
    }
}

/// Token URI of a dynamic mint, rendered against the current price reading.
pub async fn dynamic_token_uri(
    data: web::Data<AppState>,
    path: web::Path<TokenId>,
) -> HttpResponse {
    let token_id = path.into_inner();
    let nft = data.dynamic.lock().expect("engine mutex poisoned");
    match nft.token_uri(token_id) {
        Ok(uri) => HttpResponse::Ok().json(serde_json::json!({
            "token_id": token_id,
            "token_uri": uri,
        })),
        Err(e) => error_response(&e),
    }
}

/// Current fixed-point price reading.
pub async fn price(data: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "price": data.price.load(),
        "decimals": mint_engine::PRICE_DECIMALS,
    }))
}
