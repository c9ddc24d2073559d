//! Registry of live Eddystone advertisements.
//!
//! The registry validates advertisement options, asks the platform backend
//! to start broadcasting and keeps every started advertisement so it can
//! be stopped later. Tracked advertisements are not stopped when the
//! registry is dropped; call [`AdvertisementRegistry::unregister_all`]
//! first if the broadcasts should not outlive it.

use futures::future::join_all;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::ble::advertisement::{Advertisement, AdvertisementId};
use crate::ble::platform::{self, PlatformAdapter};
use crate::data::options::{validate, AdvertisementOptions};
use crate::error::{Error, Result};

/// Capacity of the registry event channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Change to the set of tracked advertisements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// An advertisement started and is now tracked.
    Registered(Advertisement),
    /// An advertisement stopped and is no longer tracked.
    Unregistered(Advertisement),
}

/// Registers Eddystone advertisements and tracks the live ones.
pub struct AdvertisementRegistry {
    /// Advertising backend, `None` if this system cannot advertise.
    platform: Option<Arc<dyn PlatformAdapter>>,
    /// Tracked advertisements in registration order.
    advertisements: RwLock<Vec<Advertisement>>,
    /// Tracked advertisements with a stop in flight.
    stopping: Mutex<HashSet<AdvertisementId>>,
    /// Registry event channel.
    event_tx: broadcast::Sender<RegistryEvent>,
}

impl AdvertisementRegistry {
    /// Create a registry using the advertising backend of this system.
    ///
    /// Succeeds even when no backend is available; every registration then
    /// fails with [`Error::PlatformUnavailable`].
    pub async fn new() -> Self {
        Self::with_platform(platform::resolve().await)
    }

    /// Create a registry on top of the given backend.
    pub fn with_platform(platform: Option<Arc<dyn PlatformAdapter>>) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            platform,
            advertisements: RwLock::new(Vec::new()),
            stopping: Mutex::new(HashSet::new()),
            event_tx,
        }
    }

    /// Check if an advertising backend is available.
    pub fn is_platform_available(&self) -> bool {
        self.platform.is_some()
    }

    /// Register an advertisement described by an attribute bag.
    ///
    /// The options are validated with [`validate`] before the backend is
    /// involved. The availability check comes first, so a missing backend
    /// is reported even for malformed options.
    ///
    /// # Errors
    ///
    /// - [`Error::PlatformUnavailable`] if this system cannot advertise
    /// - [`Error::Schema`], [`Error::UnsupportedFrameType`] or
    ///   [`Error::InvalidParameter`] for malformed options
    /// - [`Error::Platform`] carrying the backend's own error
    pub async fn register_advertisement_value(&self, options: &Value) -> Result<Advertisement> {
        let platform = self.platform()?;
        let options = validate(options)?;
        self.start(platform, options).await
    }

    /// Register an advertisement described by typed options.
    ///
    /// # Errors
    ///
    /// - [`Error::PlatformUnavailable`] if this system cannot advertise
    /// - [`Error::Platform`] carrying the backend's own error
    pub async fn register_advertisement(
        &self,
        options: AdvertisementOptions,
    ) -> Result<Advertisement> {
        let platform = self.platform()?;
        self.start(platform, options).await
    }

    /// Stop a tracked advertisement and forget it.
    ///
    /// The advertisement stays tracked if the backend fails to stop it.
    /// While a stop is in flight, further attempts to unregister the same
    /// advertisement fail with [`Error::AdvertisementNotFound`].
    pub async fn unregister_advertisement(&self, advertisement: &Advertisement) -> Result<()> {
        let platform = self.platform()?;

        if !self.claim(advertisement) {
            return Err(Error::AdvertisementNotFound {
                id: advertisement.id(),
            });
        }

        let result = platform.stop_advertising(advertisement).await;
        self.finish_stop(advertisement, result.is_ok());

        result.map_err(Error::Platform)
    }

    /// Stop every tracked advertisement.
    ///
    /// All stops are attempted. Advertisements that stopped are forgotten;
    /// the first backend error, if any, is returned.
    pub async fn unregister_all(&self) -> Result<()> {
        let platform = self.platform()?;
        let tracked: Vec<_> = self
            .advertisements()
            .into_iter()
            .filter(|advertisement| self.claim(advertisement))
            .collect();

        if tracked.is_empty() {
            return Ok(());
        }

        info!("Stopping {} advertisements", tracked.len());

        let results = join_all(tracked.iter().map(|advertisement| async move {
            (advertisement, platform.stop_advertising(advertisement).await)
        }))
        .await;

        let mut first_error = None;
        for (advertisement, result) in results {
            self.finish_stop(advertisement, result.is_ok());
            match result {
                Ok(()) => {}
                Err(e) => {
                    debug!("Failed to stop advertisement {}: {}", advertisement.id(), e);
                    if first_error.is_none() {
                        first_error = Some(Error::Platform(e));
                    }
                }
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    /// Get the tracked advertisements in registration order.
    pub fn advertisements(&self) -> Vec<Advertisement> {
        self.advertisements.read().clone()
    }

    /// Get a tracked advertisement by id.
    pub fn get_advertisement(&self, id: AdvertisementId) -> Option<Advertisement> {
        self.advertisements
            .read()
            .iter()
            .find(|a| a.id() == id)
            .cloned()
    }

    /// Get the number of tracked advertisements.
    pub fn advertisement_count(&self) -> usize {
        self.advertisements.read().len()
    }

    /// Subscribe to registry events.
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.event_tx.subscribe()
    }

    fn platform(&self) -> Result<&Arc<dyn PlatformAdapter>> {
        self.platform.as_ref().ok_or(Error::PlatformUnavailable)
    }

    /// Start the broadcast and track the resulting handle.
    async fn start(
        &self,
        platform: &Arc<dyn PlatformAdapter>,
        options: AdvertisementOptions,
    ) -> Result<Advertisement> {
        let advertisement = platform
            .start_advertising(&options)
            .await
            .map_err(Error::Platform)?;

        self.advertisements.write().push(advertisement.clone());

        info!(
            "Registered {} advertisement {}",
            advertisement.frame_type(),
            advertisement.id()
        );

        let _ = self
            .event_tx
            .send(RegistryEvent::Registered(advertisement.clone()));

        Ok(advertisement)
    }

    /// Reserve a tracked advertisement for stopping.
    ///
    /// Returns `false` if it is not tracked or another stop holds it.
    fn claim(&self, advertisement: &Advertisement) -> bool {
        let advertisements = self.advertisements.read();
        advertisements.contains(advertisement) && self.stopping.lock().insert(advertisement.id())
    }

    /// Release a claim, forgetting the advertisement if it stopped.
    fn finish_stop(&self, advertisement: &Advertisement, stopped: bool) {
        if stopped {
            self.untrack(advertisement);
        }
        self.stopping.lock().remove(&advertisement.id());
    }

    /// Remove an advertisement from tracking.
    fn untrack(&self, advertisement: &Advertisement) {
        let removed = {
            let mut advertisements = self.advertisements.write();
            advertisements
                .iter()
                .position(|a| a == advertisement)
                .map(|index| advertisements.remove(index))
        };

        if let Some(advertisement) = removed {
            info!("Unregistered advertisement {}", advertisement.id());
            let _ = self
                .event_tx
                .send(RegistryEvent::Unregistered(advertisement));
        }
    }
}
