use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use storefront::config::{Args, Config};
use storefront::coupons::StaticCoupons;
use storefront::http::{self, AppState};
use storefront::lifecycle::tracing::setup_tracing;
use storefront::lifecycle::StoreSystem;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let args = Args::parse();
    let config = Config::load_or_default(&args.config)?;
    setup_tracing(&config.log_level);
    info!(
        config = %args.config.display(),
        found = args.config.exists(),
        "Configuration loaded"
    );

    let coupons = StaticCoupons::new(config.coupons.clone());
    info!(coupons = coupons.len(), "Coupon registry ready");

    let system = StoreSystem::new(config.channel_buffer, Arc::new(coupons));
    system.seed(&config.seed).await?;

    let state = AppState {
        carts: system.cart_client.clone(),
        orders: system.order_client.clone(),
    };
    http::serve(&config.server_address, state).await?;

    system.shutdown().await?;
    Ok(())
}
