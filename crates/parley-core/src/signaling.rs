use serde::{Deserialize, Serialize};

use crate::room::RoomError;

/// Result codes of the signaling wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseCode {
    Success,
    Full,
    UnknownRoom,
    UnknownClient,
    Error,
}

impl From<RoomError> for ResponseCode {
    fn from(err: RoomError) -> Self {
        match err {
            RoomError::Full => Self::Full,
            RoomError::UnknownRoom => Self::UnknownRoom,
            RoomError::UnknownClient => Self::UnknownClient,
        }
    }
}

/// `params` object of a successful join response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinParams {
    pub client_id: String,
    /// Deployed clients expect a string-encoded boolean here, not a JSON
    /// boolean.
    #[serde(with = "string_bool")]
    pub is_initiator: bool,
    pub room_id: String,
    /// Payloads buffered for this slot before the occupant joined, in
    /// arrival order.
    pub messages: Vec<String>,
    pub error_messages: Vec<String>,
}

/// Envelope wrapping every signaling response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalingResponse {
    pub result: ResponseCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<JoinParams>,
}

impl SignalingResponse {
    /// Bare `SUCCESS` acknowledgement.
    pub fn success() -> Self {
        Self {
            result: ResponseCode::Success,
            params: None,
        }
    }

    /// Rejection or error result without params.
    pub fn code(result: ResponseCode) -> Self {
        Self {
            result,
            params: None,
        }
    }

    /// Successful join carrying the new occupant's parameters.
    pub fn joined(params: JoinParams) -> Self {
        Self {
            result: ResponseCode::Success,
            params: Some(params),
        }
    }
}

/// Serialize a bool as the JSON string `"true"`/`"false"`.
mod string_bool {
    use serde::de::{self, Unexpected};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(de::Error::invalid_value(
                Unexpected::Str(other),
                &"\"true\" or \"false\"",
            )),
        }
    }
}
