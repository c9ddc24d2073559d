//! Error types for the eddystone-rust-ble crate.

use thiserror::Error;

use crate::ble::advertisement::AdvertisementId;
use crate::ble::platform::PlatformError;

/// The main error type for this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// No BLE advertising backend is available on this system.
    #[error("Platform not supported")]
    PlatformUnavailable,

    /// A member required by the declared frame type is absent.
    #[error("missing {member}")]
    Schema {
        /// The name of the missing member (`frameType`, `url` or `txPower`).
        member: &'static str,
    },

    /// The declared frame type is not one this crate can advertise.
    #[error("Unsupported frame type: {frame_type}")]
    UnsupportedFrameType {
        /// The offending `frameType` value, exactly as supplied.
        frame_type: serde_json::Value,
    },

    /// A member is present but holds a value of the wrong shape.
    #[error("Invalid parameter: {name} = {value}")]
    InvalidParameter {
        /// The name of the parameter.
        name: String,
        /// The invalid value that was provided.
        value: String,
    },

    /// The advertisement is not tracked by the registry.
    #[error("Advertisement not found: {id}")]
    AdvertisementNotFound {
        /// The id that was searched for.
        id: AdvertisementId,
    },

    /// The URL cannot be packed into an Eddystone-URL frame.
    #[error("Cannot encode URL {url:?}: {reason}")]
    UrlEncoding {
        /// The URL that failed to encode.
        url: String,
        /// Why encoding failed.
        reason: String,
    },

    /// Error reported by the platform backend, passed through untouched.
    #[error(transparent)]
    Platform(PlatformError),
}

impl Error {
    /// Check if this error was produced by the platform backend.
    pub fn is_platform(&self) -> bool {
        matches!(self, Self::Platform(_))
    }
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
