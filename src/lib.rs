//! # eddystone-rust-ble
//!
//! A Rust library for registering Eddystone Bluetooth Low Energy beacon
//! advertisements and keeping track of the ones that are live.
//!
//! This library supports **Eddystone-URL** frames only. Eddystone-UID,
//! -TLM and -EID options are recognized and rejected.
//!
//! ## Features
//!
//! - **Options Validation**: Check loosely shaped options against the frame type they declare
//! - **Registration**: Start broadcasts through a pluggable platform backend
//! - **Tracking**: Keep every started advertisement so it can be stopped later
//! - **Frame Encoding**: Build compressed Eddystone-URL service data
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use eddystone_rust_ble::{AdvertisementRegistry, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let registry = AdvertisementRegistry::new().await;
//!
//!     let options = serde_json::json!({
//!         "frameType": "url",
//!         "url": "https://example.com",
//!         "txPower": -20,
//!     });
//!     let advertisement = registry.register_advertisement_value(&options).await?;
//!     println!("Advertising {}", advertisement.id());
//!
//!     registry.unregister_advertisement(&advertisement).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Platform Notes
//!
//! ### Linux
//! Enable the `bluez` feature to advertise through BlueZ. Requires a running
//! `bluetoothd` and permission to register LE advertisements.
//!
//! ### Other platforms
//! No backend is bundled. Implement [`PlatformAdapter`] and pass it to
//! [`AdvertisementRegistry::with_platform`].
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for data types
//! - `bluez`: Linux advertising backend

// Public modules
pub mod ble;
pub mod data;
pub mod error;
pub mod protocol;
pub mod registry;

// Re-exports for convenience
pub use ble::advertisement::{Advertisement, AdvertisementId};
pub use ble::platform::{PlatformAdapter, PlatformError, PlatformResult};
pub use data::{validate, AdvertisementOptions, FrameType, UrlOptions};
pub use error::{Error, Result};
pub use registry::{AdvertisementRegistry, RegistryEvent};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        // Verify that key types are exported
        let _ = std::any::TypeId::of::<AdvertisementRegistry>();
        let _ = std::any::TypeId::of::<Advertisement>();
        let _ = std::any::TypeId::of::<AdvertisementOptions>();
        let _ = std::any::TypeId::of::<Error>();
        let _ = std::any::TypeId::of::<RegistryEvent>();
    }

    #[test]
    fn test_registry_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AdvertisementRegistry>();
    }
}
