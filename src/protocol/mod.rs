//! Protocol module for constructing Eddystone frames.
//!
//! Platform backends use this to build the service data they broadcast.

pub mod url_frame;

pub use url_frame::{encode_url, encode_url_frame, MAX_ENCODED_URL_LEN};
