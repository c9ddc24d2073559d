//! Linux advertising backend using BlueZ.
//!
//! Broadcasts Eddystone frames as service data of the `0xFEAA` service
//! through the BlueZ LE advertising manager.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::ble::advertisement::{Advertisement, AdvertisementId};
use crate::ble::platform::{PlatformAdapter, PlatformResult};
use crate::ble::uuids::EDDYSTONE_SERVICE_UUID;
use crate::data::AdvertisementOptions;
use crate::error::{Error, Result};
use crate::protocol::encode_url_frame;

/// Selects and prepares the BlueZ adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BluezConfig {
    /// Adapter name such as `hci0`. The default adapter is used when `None`.
    pub adapter_name: Option<String>,
    /// Power the adapter on if it is off.
    pub power_on: bool,
}

impl Default for BluezConfig {
    fn default() -> Self {
        Self {
            adapter_name: None,
            power_on: true,
        }
    }
}

/// BlueZ advertising backend.
pub struct BluezPlatform {
    /// Keeps the D-Bus connection alive.
    _session: bluer::Session,
    adapter: bluer::Adapter,
    /// Live BlueZ registrations. Dropping a handle stops its broadcast.
    handles: Mutex<HashMap<AdvertisementId, bluer::adv::AdvertisementHandle>>,
}

impl BluezPlatform {
    /// Connect to BlueZ and open the configured adapter.
    ///
    /// # Errors
    ///
    /// Returns an error if BlueZ is not running or the adapter is missing.
    pub async fn new(config: BluezConfig) -> Result<Self> {
        let session = bluer::Session::new().await.map_err(platform_error)?;

        let adapter = match &config.adapter_name {
            Some(name) => session.adapter(name).map_err(platform_error)?,
            None => session.default_adapter().await.map_err(platform_error)?,
        };

        if config.power_on && !adapter.is_powered().await.map_err(platform_error)? {
            debug!("Powering on adapter {}", adapter.name());
            adapter.set_powered(true).await.map_err(platform_error)?;
        }

        info!("Using BlueZ adapter {} for advertising", adapter.name());

        Ok(Self {
            _session: session,
            adapter,
            handles: Mutex::new(HashMap::new()),
        })
    }

    /// Get the adapter name.
    pub fn adapter_name(&self) -> &str {
        self.adapter.name()
    }

    /// Number of broadcasts currently registered with BlueZ.
    pub fn active_count(&self) -> usize {
        self.handles.lock().len()
    }
}

#[async_trait]
impl PlatformAdapter for BluezPlatform {
    async fn start_advertising(
        &self,
        options: &AdvertisementOptions,
    ) -> PlatformResult<Advertisement> {
        let service_data = match options {
            AdvertisementOptions::Url(url_options) => encode_url_frame(url_options)?,
        };

        let bluez_advertisement = bluer::adv::Advertisement {
            advertisement_type: bluer::adv::Type::Broadcast,
            service_uuids: [EDDYSTONE_SERVICE_UUID].into_iter().collect(),
            service_data: [(EDDYSTONE_SERVICE_UUID, service_data.to_vec())]
                .into_iter()
                .collect(),
            ..Default::default()
        };

        let handle = self.adapter.advertise(bluez_advertisement).await?;

        let advertisement = Advertisement::new(options.clone());
        self.handles.lock().insert(advertisement.id(), handle);

        debug!(
            "BlueZ advertisement {} started on {}",
            advertisement.id(),
            self.adapter.name()
        );

        Ok(advertisement)
    }

    async fn stop_advertising(&self, advertisement: &Advertisement) -> PlatformResult<()> {
        let handle = self.handles.lock().remove(&advertisement.id());

        match handle {
            Some(handle) => {
                drop(handle);
                debug!("BlueZ advertisement {} stopped", advertisement.id());
                Ok(())
            }
            None => Err(Error::AdvertisementNotFound {
                id: advertisement.id(),
            }
            .into()),
        }
    }
}

fn platform_error(e: bluer::Error) -> Error {
    Error::Platform(Box::new(e))
}
