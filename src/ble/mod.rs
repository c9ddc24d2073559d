//! BLE advertising module.
//!
//! This module provides the advertisement handle, the platform backend
//! contract and the backends shipped with this crate.

pub mod advertisement;
#[cfg(all(target_os = "linux", feature = "bluez"))]
pub mod bluez;
pub mod platform;
pub mod uuids;

pub use advertisement::{Advertisement, AdvertisementId};
#[cfg(all(target_os = "linux", feature = "bluez"))]
pub use bluez::{BluezConfig, BluezPlatform};
pub use platform::{PlatformAdapter, PlatformError, PlatformResult};
pub use uuids::*;
