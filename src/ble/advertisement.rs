//! Advertisement handles.
//!
//! A handle is created by the platform backend when a broadcast starts and
//! identifies that broadcast until it is stopped.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::data::{AdvertisementOptions, FrameType};

/// Unique identifier of a started advertisement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdvertisementId(Uuid);

impl AdvertisementId {
    /// Create a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AdvertisementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AdvertisementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to one live advertisement.
///
/// Two handles are equal when they refer to the same broadcast.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Advertisement {
    id: AdvertisementId,
    options: AdvertisementOptions,
    started_at: DateTime<Utc>,
}

impl Advertisement {
    /// Create a handle for a broadcast that has just started.
    ///
    /// Platform backends call this once the radio accepted the advertisement.
    pub fn new(options: AdvertisementOptions) -> Self {
        Self {
            id: AdvertisementId::new(),
            options,
            started_at: Utc::now(),
        }
    }

    /// Get the advertisement identifier.
    pub fn id(&self) -> AdvertisementId {
        self.id
    }

    /// Get the options the advertisement was started with.
    pub fn options(&self) -> &AdvertisementOptions {
        &self.options
    }

    /// Get the advertised frame type.
    pub fn frame_type(&self) -> FrameType {
        self.options.frame_type()
    }

    /// Get the time the broadcast started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

impl PartialEq for Advertisement {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Advertisement {}

impl std::hash::Hash for Advertisement {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
