//! Basic example: Broadcast an Eddystone-URL beacon for a while
//!
//! Run with: cargo run --example register_url --features bluez -- https://example.com

use eddystone_rust_ble::{AdvertisementRegistry, RegistryEvent, Result};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("eddystone_rust_ble=debug".parse().unwrap()),
        )
        .init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://example.com".to_string());

    let registry = AdvertisementRegistry::new().await;
    if !registry.is_platform_available() {
        println!("No BLE advertising backend on this system.");
        println!("On Linux, build with --features bluez.");
        return Ok(());
    }

    let mut events = registry.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                RegistryEvent::Registered(ad) => println!("Registered {}", ad.id()),
                RegistryEvent::Unregistered(ad) => println!("Unregistered {}", ad.id()),
            }
        }
    });

    let options = serde_json::json!({
        "frameType": "url",
        "url": url,
        "txPower": -20,
    });
    let advertisement = registry.register_advertisement_value(&options).await?;
    println!("Broadcasting {} for 30 seconds...", url);

    tokio::time::sleep(Duration::from_secs(30)).await;

    registry.unregister_advertisement(&advertisement).await?;
    println!("Done.");

    Ok(())
}
