//! Data types for describing Eddystone advertisements.
//!
//! Contains the frame type enumeration and the advertisement options
//! together with their validation.

pub mod frame_type;
pub mod options;

pub use frame_type::FrameType;
pub use options::{validate, AdvertisementOptions, UrlOptions};
