use crate::{
    config::Config,
    handlers::*,
    middleware::{rate_limit, RateLimiter},
    services::{
        Analytics, BlockBuilder, BoothRegistry, InMemoryTransactionStore, SimulatedVerifier,
        TransactionIntake, TransactionStore, WalletService,
    },
};
use axum::{
    middleware as axum_middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Everything handlers share. Owned by the server process and dropped with it.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TransactionStore>,
    pub intake: Arc<TransactionIntake>,
    pub blocks: Arc<BlockBuilder>,
    pub analytics: Arc<Analytics>,
    pub booths: Arc<BoothRegistry>,
    pub wallet: Arc<WalletService>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self::with_store(config, Arc::new(InMemoryTransactionStore::new()))
    }

    pub fn with_store(config: &Config, store: Arc<dyn TransactionStore>) -> Self {
        let verifier = Arc::new(SimulatedVerifier::new(config.verification_success_rate));
        let intake = Arc::new(TransactionIntake::new(
            store.clone(),
            verifier,
            config.verification_delay,
        ));

        Self {
            store,
            intake,
            blocks: Arc::new(BlockBuilder::new(
                config.transactions_per_block,
                config.hash_mode,
            )),
            analytics: Arc::new(Analytics::new()),
            booths: Arc::new(BoothRegistry::default()),
            wallet: Arc::new(WalletService::new(
                config.eth_usd_rate,
                config.collection_address.clone(),
            )),
        }
    }
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let limiter = Arc::new(RateLimiter::new(
        config.rate_limit_per_second,
        config.rate_limit_burst,
    ));

    Router::new()
        .route("/health", get(health_check))
        .route("/stats", get(get_stats))
        .route("/ws/dashboard", get(websocket_handler))
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route("/transactions/search", get(search_transactions))
        .route("/blocks", get(get_blocks))
        .route("/analytics", get(get_analytics))
        .route("/booths", get(list_booths))
        .route("/booths/:id/quote", get(quote_fee))
        .route("/wallet/network", get(network_info))
        .with_state(state)
        .layer(axum_middleware::from_fn_with_state(limiter, rate_limit))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
}
