//! BLE Service UUIDs.
//!
//! Contains the UUID constants used for Eddystone advertisements.

use uuid::Uuid;

/// 16-bit Eddystone service UUID assigned by the Bluetooth SIG.
pub const EDDYSTONE_SERVICE_UUID_16: u16 = 0xFEAA;

/// Eddystone service UUID expanded onto the Bluetooth base UUID.
pub const EDDYSTONE_SERVICE_UUID: Uuid = Uuid::from_u128(0x0000_feaa_0000_1000_8000_00805f9b34fb);

/// Check if a service UUID is the Eddystone service.
pub fn is_eddystone_service(uuid: &Uuid) -> bool {
    *uuid == EDDYSTONE_SERVICE_UUID
}
