use crate::error::ProxyError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use validator::{Validate, ValidationErrors};

/// Inbound body of the portrait endpoint: `{ "imageBase64": ..., "style": ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortraitRequest {
    pub image_base64: String,
    pub style: String,
}

/// Raw portrait fields as they arrive, before the required-field checks.
#[derive(Debug, Default, Deserialize, Validate)]
struct PortraitFields {
    #[serde(rename = "imageBase64", default, deserialize_with = "string_only")]
    #[validate(
        required(message = "Missing imageBase64"),
        length(min = 1, message = "Missing imageBase64")
    )]
    image_base64: Option<String>,

    #[serde(default, deserialize_with = "string_only")]
    #[validate(
        required(message = "Missing style"),
        length(min = 1, message = "Missing style")
    )]
    style: Option<String>,
}

/// Non-string values are treated as absent.
fn string_only<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => Some(value),
        _ => None,
    })
}

impl PortraitRequest {
    /// Pull the two required fields out of a parsed body.
    ///
    /// A field counts as missing when it is absent, `null`, not a string, or empty.
    /// `imageBase64` is checked before `style`.
    pub fn from_json(body: &Value) -> Result<Self, ProxyError> {
        let fields = if body.is_object() {
            PortraitFields::deserialize(body).unwrap_or_default()
        } else {
            PortraitFields::default()
        };

        fields.validate().map_err(|errors| first_missing(&errors))?;

        match (fields.image_base64, fields.style) {
            (Some(image_base64), Some(style)) => Ok(Self {
                image_base64,
                style,
            }),
            (None, _) => Err(ProxyError::MissingField("imageBase64")),
            (Some(_), None) => Err(ProxyError::MissingField("style")),
        }
    }
}

/// Map validation failures to the first missing field, in reporting order.
fn first_missing(errors: &ValidationErrors) -> ProxyError {
    let invalid = errors.field_errors();
    if invalid.contains_key("imageBase64") || invalid.contains_key("image_base64") {
        ProxyError::MissingField("imageBase64")
    } else {
        ProxyError::MissingField("style")
    }
}
