use std::net::SocketAddr;
use std::sync::Arc;

use demotrader::{
    AppState, config, routes,
    services::{
        account_store::AccountStore, alpha_vantage::AlphaVantageClient, db_init,
        ledger::Ledger, mongo_store::MongoAccountStore, price_source::PriceSource, seed,
    },
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();
    let ledger_config = settings.ledger_config();

    let db = db_init::connect_with_retry(&settings)
        .await
        .expect("Failed to connect to MongoDB");

    let store: Arc<dyn AccountStore> = Arc::new(MongoAccountStore::new(&db, ledger_config.starting_balance));
    let prices: Arc<dyn PriceSource> = Arc::new(AlphaVantageClient::new(
        settings.alpha_vantage_api_key.clone(),
        settings.alpha_vantage_base_url.clone(),
    ));

    if settings.alpha_vantage_api_key.trim().is_empty() {
        tracing::warn!("ALPHA_VANTAGE_API_KEY is not set; every quote will fail");
    }

    if settings.seed_demo_accounts {
        match seed::seed_demo_accounts(store.as_ref()).await {
            Ok(n) => tracing::info!("seeded {n} demo accounts"),
            Err(e) => tracing::error!("seeding demo accounts failed: {e}"),
        }
    }

    let state = AppState {
        settings: settings.clone(),
        ledger: Arc::new(Ledger::new(store, prices, ledger_config)),
    };

    let app = routes::app(state);

    let ip = settings
        .host
        .parse::<std::net::IpAddr>()
        .expect("HOST must be an IP address");
    let addr = SocketAddr::from((ip, settings.port));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.expect("Failed to bind");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("shut down cleanly");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
    tracing::info!("shutdown signal received");
}
