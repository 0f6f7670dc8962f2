//! The persisted session record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An authenticated identity issued by the AT Protocol service.
///
/// The manager treats this as an opaque value: it is stored, forwarded to
/// the client and serialized, never inspected. Fields the schema does not
/// name are kept in `extra` so a stored record round-trips unchanged.
///
/// The optional schema fields are written only when set. A record that
/// spells one of them as an explicit `null` loses that key on the next
/// write; the decoded value is the same either way. Unknown keys, `null`
/// or not, are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_jwt: String,
    pub refresh_jwt: String,
    pub handle: String,
    pub did: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_confirmed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_auth_factor: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Session {
    /// Build a session from the four required fields.
    pub fn new(
        access_jwt: impl Into<String>,
        refresh_jwt: impl Into<String>,
        handle: impl Into<String>,
        did: impl Into<String>,
    ) -> Self {
        Self {
            access_jwt: access_jwt.into(),
            refresh_jwt: refresh_jwt.into(),
            handle: handle.into(),
            did: did.into(),
            email: None,
            email_confirmed: None,
            email_auth_factor: None,
            active: None,
            status: None,
            extra: Map::new(),
        }
    }

    /// Encode as the JSON text written to the persistence medium.
    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string(self).map_err(crate::SessionError::Serialization)
    }

    /// Decode a value read from the persistence medium.
    pub fn from_json(raw: &str) -> crate::Result<Self> {
        serde_json::from_str(raw).map_err(crate::SessionError::Deserialization)
    }
}
