//! Platform advertising backends.
//!
//! The registry never talks to a radio itself. It hands validated options
//! to a [`PlatformAdapter`], which owns the actual broadcast.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::ble::advertisement::Advertisement;
use crate::data::AdvertisementOptions;

/// Error reported by a platform backend.
///
/// Kept opaque so callers can downcast to the backend's own error type.
pub type PlatformError = Box<dyn std::error::Error + Send + Sync>;

/// Result type returned by platform backends.
pub type PlatformResult<T> = std::result::Result<T, PlatformError>;

/// A backend able to broadcast Eddystone advertisements.
///
/// Implementations are shared between concurrent registrations and must
/// accept overlapping calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlatformAdapter: Send + Sync {
    /// Start broadcasting an advertisement.
    ///
    /// The options have already been validated; implementations need not
    /// check them again.
    async fn start_advertising(
        &self,
        options: &AdvertisementOptions,
    ) -> PlatformResult<Advertisement>;

    /// Stop a broadcast previously started by this backend.
    async fn stop_advertising(&self, advertisement: &Advertisement) -> PlatformResult<()>;
}

/// Resolve the advertising backend for the current environment.
///
/// Returns `None` if this system cannot advertise.
pub async fn resolve() -> Option<Arc<dyn PlatformAdapter>> {
    #[cfg(all(target_os = "linux", feature = "bluez"))]
    {
        use crate::ble::bluez::{BluezConfig, BluezPlatform};

        match BluezPlatform::new(BluezConfig::default()).await {
            Ok(platform) => {
                let platform: Arc<dyn PlatformAdapter> = Arc::new(platform);
                return Some(platform);
            }
            Err(e) => debug!("BlueZ advertising unavailable: {}", e),
        }
    }

    debug!("No BLE advertising platform available");
    None
}
