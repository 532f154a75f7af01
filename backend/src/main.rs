//! Minting Backend
//!
//! Service embedding the two NFT minting state machines and the oracle that
//! drives the random one. Runs three concurrent subsystems:
//!
//! - **Fulfiller** — consumes mint request events and delivers randomness
//!   callbacks after the configured oracle gap.
//! - **Price poller** — keeps the dynamic variant's feed reading fresh.
//! - **HTTP server** — mint and query routes plus liveness probes.

use std::sync::atomic::AtomicU64;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::{App, HttpServer, web};
use mint_engine::mocks::{INITIAL_PRICE, MockVrfCoordinator};
use mint_engine::{DynamicSvgNft, RandomIpfsNft};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

mod api;
mod config;
mod fulfiller;
mod metrics;
mod price;
mod storage;
mod verify;
mod vrf;

use api::AppState;
use config::AppConfig;
use metrics::Metrics;
use price::SharedPrice;
use storage::StorageClient;

/// Shared handle to the random minting service. The mutex provides the
/// serialized-transaction semantics the engine assumes.
pub type SharedRandomNft = Arc<Mutex<RandomIpfsNft<MockVrfCoordinator>>>;

/// Shared handle to the dynamic minting service.
pub type SharedDynamicNft = Arc<Mutex<DynamicSvgNft<SharedPrice>>>;

/// Breed image file names, in breed order.
const BREED_IMAGES: [&str; 3] = ["pug.png", "shiba-inu.png", "st-bernard.png"];

/// Pre-uploaded breed content, used unless `UPLOAD_NFT=true`.
const DEFAULT_TOKEN_URIS: [&str; 3] = [
    "ipfs://bafyreif4zieo5ypuzynouu2crh4qdwnrnhaoaiy6ea4c2x3yilwyubpsmm/metadata.json",
    "ipfs://bafyreiehq2yg6pkmbwtey2osrfdoelvj5m5fpzonf6bm6jlky6rm7szeem/metadata.json",
    "ipfs://bafyreig6shgydpkas2uim5tp7xoywl4fzkor4alw2gzqgvustcdglez65i/metadata.json",
];

const FROWN_SVG: &str = include_str!("../assets/frown.svg");
const HAPPY_SVG: &str = include_str!("../assets/happy.svg");

/// Resolve the three per-breed token URIs, uploading if configured.
async fn resolve_token_uris(config: &AppConfig) -> [String; 3] {
    if !config.upload_nft {
        return DEFAULT_TOKEN_URIS.map(String::from);
    }

    let client = StorageClient::new(config.storage_api_url.clone(), config.storage_api_key.clone());
    let paths: Vec<_> = BREED_IMAGES
        .iter()
        .map(|name| format!("{}/{name}", config.image_dir))
        .collect();

    match client.store_nfts(&paths).await {
        Ok(uris) => uris.try_into().expect("one locator per uploaded image"),
        Err(e) => {
            warn!(error = %format!("{e:#}"), "Upload failed, using baked-in token URIs");
            DEFAULT_TOKEN_URIS.map(String::from)
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,reqwest=warn")),
        )
        .with_target(true)
        .with_ansi(true)
        .init();

    let config = AppConfig::from_env().expect("invalid configuration");

    info!(owner = %config.owner_account, "Starting minting backend");

    let token_uris = resolve_token_uris(&config).await;

    let shared_price = SharedPrice::new(INITIAL_PRICE);
    if let Some(url) = config.price_feed_url.clone() {
        info!(%url, interval_secs = config.price_poll_interval_secs, "Price poller configured");
        let poll_price = shared_price.clone();
        let interval = Duration::from_secs(config.price_poll_interval_secs);
        tokio::spawn(async move {
            price::run_price_poller(url, interval, poll_price).await;
        });
    } else {
        info!(initial = INITIAL_PRICE, "No price endpoint configured, using fixed reading");
    }

    let random: SharedRandomNft = Arc::new(Mutex::new(RandomIpfsNft::new(
        MockVrfCoordinator::new(),
        config.owner_account,
        token_uris.clone(),
    )));
    let dynamic: SharedDynamicNft = Arc::new(Mutex::new(DynamicSvgNft::new(
        shared_price.clone(),
        FROWN_SVG,
        HAPPY_SVG,
    )));

    if let Some(api_url) = config.verifier_api_url.clone() {
        let args = serde_json::json!({
            "owner": config.owner_account.to_string(),
            "token_uris": token_uris,
        });
        verify::verify_instance(&api_url, "random-ipfs-nft", args).await;
    }

    let pending_count = Arc::new(AtomicU64::new(0));
    let metrics = Arc::new(Metrics::new());
    let (tx, rx) = mpsc::channel(256);

    // Background: consume mint request events and deliver fulfillments.
    let fulfiller_config = config.clone();
    let fulfiller_nft = random.clone();
    let fulfiller_pending = pending_count.clone();
    let fulfiller_metrics = metrics.clone();
    tokio::spawn(async move {
        fulfiller::run_fulfiller(
            fulfiller_config,
            rx,
            fulfiller_nft,
            fulfiller_pending,
            fulfiller_metrics,
        )
        .await;
    });

    let state = web::Data::new(AppState {
        random,
        dynamic,
        request_tx: tx,
        pending_count,
        metrics,
        price: shared_price,
    });

    let addr = ("0.0.0.0", config.http_port);
    info!(port = config.http_port, "Starting HTTP server");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/health", web::get().to(api::health))
            .route("/status", web::get().to(api::status))
            .route("/metrics", web::get().to(api::metrics))
            .route("/price", web::get().to(api::price))
            .route("/mint/random", web::post().to(api::request_mint))
            .route("/mint/dynamic", web::post().to(api::mint_dynamic))
            .route("/token/random/{id}", web::get().to(api::random_token_uri))
            .route("/token/dynamic/{id}", web::get().to(api::dynamic_token_uri))
    })
    .bind(addr)?
    .run()
    .await
}
