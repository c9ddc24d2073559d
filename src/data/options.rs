//! Advertisement options and their validation.
//!
//! Callers describe an advertisement either with the typed
//! [`AdvertisementOptions`] or with a loosely shaped attribute bag
//! (a JSON object such as `{"frameType": "url", "url": "...", "txPower": -20}`).
//! [`validate`] turns the attribute bag into typed options, checking that
//! every member required by the declared frame type is present.

use serde_json::{json, Map, Value};

use crate::data::frame_type::FrameType;
use crate::error::{Error, Result};

/// Attribute naming the frame type.
pub const FRAME_TYPE_MEMBER: &str = "frameType";
/// Attribute holding the URL of an Eddystone-URL advertisement.
pub const URL_MEMBER: &str = "url";
/// Attribute holding the calibrated Tx power.
pub const TX_POWER_MEMBER: &str = "txPower";

/// Options of an Eddystone-URL advertisement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct UrlOptions {
    /// The URL to broadcast.
    ///
    /// Not checked here; the platform backend compresses it into the frame.
    pub url: String,

    /// Received signal strength at 0 meters, in dBm.
    pub tx_power: i8,
}

/// Validated options for a single advertisement, keyed by frame type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "frameType", rename_all = "lowercase")
)]
pub enum AdvertisementOptions {
    /// Eddystone-URL frame.
    Url(UrlOptions),
}

impl AdvertisementOptions {
    /// Create options for an Eddystone-URL advertisement.
    pub fn url(url: impl Into<String>, tx_power: i8) -> Self {
        Self::Url(UrlOptions {
            url: url.into(),
            tx_power,
        })
    }

    /// Get the frame type these options describe.
    pub fn frame_type(&self) -> FrameType {
        match self {
            Self::Url(_) => FrameType::Url,
        }
    }

    /// Get the advertised Tx power.
    pub fn tx_power(&self) -> i8 {
        match self {
            Self::Url(options) => options.tx_power,
        }
    }

    /// Render these options back into the attribute-bag form.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Url(options) => json!({
                FRAME_TYPE_MEMBER: FrameType::Url.name(),
                URL_MEMBER: options.url,
                TX_POWER_MEMBER: options.tx_power,
            }),
        }
    }
}

impl TryFrom<Value> for AdvertisementOptions {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        validate(&value)
    }
}

impl TryFrom<&Value> for AdvertisementOptions {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        validate(value)
    }
}

impl std::str::FromStr for AdvertisementOptions {
    type Err = Error;

    /// Parse options from JSON text and validate them.
    fn from_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s).map_err(|e| Error::InvalidParameter {
            name: "options".to_string(),
            value: e.to_string(),
        })?;
        validate(&value)
    }
}

/// Check that an attribute bag is well-formed for the frame type it declares.
///
/// Checks run in a fixed order and stop at the first failure:
///
/// 1. `frameType` must be present, otherwise [`Error::Schema`].
/// 2. `frameType` must name a supported [`FrameType`], otherwise
///    [`Error::UnsupportedFrameType`] carrying the value as given. Names are
///    the lowercase strings of [`FrameType::name`]; only `"url"` is
///    supported, and spellings such as `"URL"` are rejected. Known but
///    unimplemented kinds (`"uid"`, `"tlm"`, `"eid"`) are rejected the same way.
/// 3. `url` must be present, then `txPower`, otherwise [`Error::Schema`].
///
/// A member that is present but has the wrong shape (a non-string `url`,
/// a `txPower` outside `i8`) fails with [`Error::InvalidParameter`].
///
/// # Example
///
/// ```
/// use eddystone_rust_ble::data::options::validate;
/// use eddystone_rust_ble::AdvertisementOptions;
///
/// let value = serde_json::json!({"frameType": "url", "url": "https://example.com", "txPower": -20});
/// let options = validate(&value).unwrap();
/// assert_eq!(options, AdvertisementOptions::url("https://example.com", -20));
/// ```
pub fn validate(options: &Value) -> Result<AdvertisementOptions> {
    let members = options.as_object().ok_or(Error::Schema {
        member: FRAME_TYPE_MEMBER,
    })?;

    let frame_type = require(members, FRAME_TYPE_MEMBER)?;

    let unsupported = || Error::UnsupportedFrameType {
        frame_type: frame_type.clone(),
    };

    let kind = frame_type
        .as_str()
        .and_then(FrameType::from_name)
        .filter(FrameType::is_supported)
        .ok_or_else(unsupported)?;

    match kind {
        FrameType::Url => validate_url(members).map(AdvertisementOptions::Url),
        FrameType::Uid | FrameType::Tlm | FrameType::Eid => Err(unsupported()),
    }
}

/// Check the members required by an Eddystone-URL frame.
fn validate_url(members: &Map<String, Value>) -> Result<UrlOptions> {
    let url = require(members, URL_MEMBER)?;
    let tx_power = require(members, TX_POWER_MEMBER)?;

    let url = url
        .as_str()
        .ok_or_else(|| invalid_parameter(URL_MEMBER, url))?
        .to_string();

    let tx_power = tx_power
        .as_i64()
        .and_then(|v| i8::try_from(v).ok())
        .ok_or_else(|| invalid_parameter(TX_POWER_MEMBER, tx_power))?;

    Ok(UrlOptions { url, tx_power })
}

fn require<'a>(members: &'a Map<String, Value>, member: &'static str) -> Result<&'a Value> {
    members.get(member).ok_or(Error::Schema { member })
}

fn invalid_parameter(name: &str, value: &Value) -> Error {
    Error::InvalidParameter {
        name: name.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn assert_missing(result: Result<AdvertisementOptions>, expected: &str) {
        match result {
            Err(Error::Schema { member }) => assert_eq!(member, expected),
            other => panic!("expected missing {}, got {:?}", expected, other),
        }
    }

    #[test]
    fn test_well_formed_url_options() {
        let value = json!({"frameType": "url", "url": "https://example.com", "txPower": -20});
        let options = validate(&value).unwrap();

        assert_eq!(options, AdvertisementOptions::url("https://example.com", -20));
        assert_eq!(options.frame_type(), FrameType::Url);
        assert_eq!(options.tx_power(), -20);
    }

    #[test]
    fn test_missing_frame_type() {
        assert_missing(validate(&json!({})), FRAME_TYPE_MEMBER);
        assert_missing(
            validate(&json!({"url": "https://example.com", "txPower": -20})),
            FRAME_TYPE_MEMBER,
        );
    }

    #[test]
    fn test_non_object_is_missing_frame_type() {
        assert_missing(validate(&json!("url")), FRAME_TYPE_MEMBER);
        assert_missing(validate(&Value::Null), FRAME_TYPE_MEMBER);
    }

    #[test]
    fn test_missing_url() {
        let value = json!({"frameType": "url", "txPower": -20});
        assert_missing(validate(&value), URL_MEMBER);
    }

    #[test]
    fn test_missing_tx_power() {
        let value = json!({"frameType": "url", "url": "https://example.com"});
        assert_missing(validate(&value), TX_POWER_MEMBER);
    }

    #[test]
    fn test_missing_url_reported_before_tx_power() {
        let value = json!({"frameType": "url"});
        assert_missing(validate(&value), URL_MEMBER);
    }

    #[test]
    fn test_unimplemented_frame_types_rejected() {
        for name in ["uid", "tlm", "eid"] {
            let value = json!({"frameType": name, "url": "https://example.com", "txPower": -20});
            match validate(&value) {
                Err(Error::UnsupportedFrameType { frame_type }) => {
                    assert_eq!(frame_type, json!(name))
                }
                other => panic!("expected unsupported frame type, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_unsupported_frame_type_carries_value() {
        for frame_type in [json!(42), Value::Null, json!("URL"), json!({"kind": "url"})] {
            let value = json!({"frameType": frame_type.clone()});
            match validate(&value) {
                Err(Error::UnsupportedFrameType { frame_type: got }) => {
                    assert_eq!(got, frame_type)
                }
                other => panic!("expected unsupported frame type, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_acceptance_follows_is_supported() {
        for kind in [FrameType::Uid, FrameType::Url, FrameType::Tlm, FrameType::Eid] {
            let value = json!({"frameType": kind.name(), "url": "https://example.com", "txPower": -20});
            assert_eq!(validate(&value).is_ok(), kind.is_supported(), "{}", kind);
        }
    }

    #[test]
    fn test_frame_type_name_is_lowercase_only() {
        for name in ["URL", "Url", " url"] {
            let value = json!({"frameType": name, "url": "https://example.com", "txPower": -20});
            match validate(&value) {
                Err(Error::UnsupportedFrameType { frame_type }) => {
                    assert_eq!(frame_type, json!(name))
                }
                other => panic!("expected unsupported frame type, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_unsupported_frame_type_checked_before_members() {
        let value = json!({"frameType": "uid"});
        assert!(matches!(
            validate(&value),
            Err(Error::UnsupportedFrameType { .. })
        ));
    }

    #[test]
    fn test_invalid_member_shapes() {
        let value = json!({"frameType": "url", "url": 7, "txPower": -20});
        assert!(matches!(
            validate(&value),
            Err(Error::InvalidParameter { ref name, .. }) if name == URL_MEMBER
        ));

        let value = json!({"frameType": "url", "url": "https://example.com", "txPower": 300});
        assert!(matches!(
            validate(&value),
            Err(Error::InvalidParameter { ref name, .. }) if name == TX_POWER_MEMBER
        ));

        let value = json!({"frameType": "url", "url": "https://example.com", "txPower": "-20"});
        assert!(matches!(
            validate(&value),
            Err(Error::InvalidParameter { ref name, .. }) if name == TX_POWER_MEMBER
        ));
    }

    #[test]
    fn test_url_contents_not_checked() {
        let value = json!({"frameType": "url", "url": "", "txPower": 0});
        assert_eq!(validate(&value).unwrap(), AdvertisementOptions::url("", 0));
    }

    #[test]
    fn test_to_value_validates_back() {
        let options = AdvertisementOptions::url("https://goo.gl/S6zT6P", -12);
        assert_eq!(validate(&options.to_value()).unwrap(), options);
    }

    #[test]
    fn test_from_str() {
        let options: AdvertisementOptions =
            r#"{"frameType": "url", "url": "https://example.com", "txPower": -20}"#
                .parse()
                .unwrap();
        assert_eq!(options, AdvertisementOptions::url("https://example.com", -20));

        let err = "not json".parse::<AdvertisementOptions>().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }

    #[test]
    fn test_try_from_value() {
        let value = json!({"frameType": "url", "txPower": 4});
        assert_missing(AdvertisementOptions::try_from(value), URL_MEMBER);
    }

    proptest! {
        #[test]
        fn prop_missing_frame_type_always_schema_error(
            url in proptest::option::of(".*"),
            tx_power in proptest::option::of(any::<i8>()),
        ) {
            let mut members = Map::new();
            if let Some(url) = url {
                members.insert(URL_MEMBER.to_string(), json!(url));
            }
            if let Some(tx_power) = tx_power {
                members.insert(TX_POWER_MEMBER.to_string(), json!(tx_power));
            }
            let result = validate(&Value::Object(members));
            prop_assert!(
                matches!(result, Err(Error::Schema { member: FRAME_TYPE_MEMBER })),
                "unexpected result {:?}",
                result
            );
        }

        #[test]
        fn prop_other_frame_types_unsupported(name in "[a-zA-Z0-9]{0,8}") {
            prop_assume!(name != "url");
            let value = json!({"frameType": name.clone(), "url": "https://example.com", "txPower": -20});
            match validate(&value) {
                Err(Error::UnsupportedFrameType { frame_type }) => prop_assert_eq!(frame_type, json!(name)),
                other => prop_assert!(false, "unexpected result {:?}", other),
            }
        }

        #[test]
        fn prop_numeric_frame_types_unsupported(raw in any::<i64>()) {
            let value = json!({"frameType": raw});
            prop_assert!(
                matches!(validate(&value), Err(Error::UnsupportedFrameType { .. })),
                "unexpected result"
            );
        }

        #[test]
        fn prop_well_formed_url_options_accepted(url in ".*", tx_power in any::<i8>()) {
            let value = json!({"frameType": "url", "url": url.clone(), "txPower": tx_power});
            prop_assert_eq!(validate(&value).unwrap(), AdvertisementOptions::url(url, tx_power));
        }
    }
}
