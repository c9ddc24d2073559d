//! Eddystone frame types.

/// Eddystone frame type identifier.
///
/// Values defined in the Eddystone protocol specification:
/// <https://github.com/google/eddystone/blob/master/protocol-specification.md>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum FrameType {
    /// Eddystone-UID (namespace + instance id).
    Uid = 0x00,
    /// Eddystone-URL (compressed URL).
    Url = 0x10,
    /// Eddystone-TLM (telemetry).
    Tlm = 0x20,
    /// Eddystone-EID (ephemeral identifier).
    Eid = 0x30,
}

impl FrameType {
    /// Create from the raw frame byte.
    pub fn from_raw(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::Uid),
            0x10 => Some(Self::Url),
            0x20 => Some(Self::Tlm),
            0x30 => Some(Self::Eid),
            _ => None,
        }
    }

    /// Convert to the raw frame byte.
    pub fn to_raw(&self) -> u8 {
        *self as u8
    }

    /// Look up a frame type by its lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "uid" => Some(Self::Uid),
            "url" => Some(Self::Url),
            "tlm" => Some(Self::Tlm),
            "eid" => Some(Self::Eid),
            _ => None,
        }
    }

    /// Get the frame type name as used in advertisement options.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Uid => "uid",
            Self::Url => "url",
            Self::Tlm => "tlm",
            Self::Eid => "eid",
        }
    }

    /// Check if advertisements of this frame type can be registered.
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Url)
    }
}

impl std::fmt::Display for FrameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_type_raw_values() {
        assert_eq!(FrameType::Uid.to_raw(), 0x00);
        assert_eq!(FrameType::Url.to_raw(), 0x10);
        assert_eq!(FrameType::Tlm.to_raw(), 0x20);
        assert_eq!(FrameType::Eid.to_raw(), 0x30);
        assert_eq!(FrameType::from_raw(0x10), Some(FrameType::Url));
        assert_eq!(FrameType::from_raw(0x40), None);
    }

    #[test]
    fn test_frame_type_names() {
        for frame_type in [FrameType::Uid, FrameType::Url, FrameType::Tlm, FrameType::Eid] {
            assert_eq!(FrameType::from_name(frame_type.name()), Some(frame_type));
        }
        assert_eq!(FrameType::from_name("URL"), None);
        assert_eq!(FrameType::Url.to_string(), "url");
    }

    #[test]
    fn test_only_url_is_supported() {
        assert!(FrameType::Url.is_supported());
        assert!(!FrameType::Uid.is_supported());
        assert!(!FrameType::Tlm.is_supported());
        assert!(!FrameType::Eid.is_supported());
    }
}
