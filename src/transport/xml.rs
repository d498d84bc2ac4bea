// file: src/transport/xml.rs
// version: 1.0.0
// guid: 2aa57440-10a9-45d7-aab8-07a4638eb463

//! XML decoding for EC2 Query API responses

use super::{ServiceError, TransportError, TransportResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Decode a successful response document.
pub fn decode<T: DeserializeOwned>(action: &str, body: &str) -> TransportResult<T> {
    quick_xml::de::from_str(body).map_err(|e| TransportError::decode(action, e.to_string()))
}

/// Decode an EC2 error document, falling back to the raw body.
///
/// ```xml
/// <Response>
///   <Errors><Error><Code>AuthFailure</Code><Message>...</Message></Error></Errors>
///   <RequestID>ea966190-f9aa-478e-9ede-example</RequestID>
/// </Response>
/// ```
pub fn parse_error(status: u16, body: &str) -> ServiceError {
    #[derive(Deserialize)]
    struct ErrorResponse {
        #[serde(rename = "Errors", default)]
        errors: Option<ErrorList>,
        #[serde(rename = "RequestID", alias = "RequestId", default)]
        request_id: Option<String>,
    }

    #[derive(Deserialize)]
    struct ErrorList {
        #[serde(rename = "Error", default)]
        error: Vec<ErrorDetail>,
    }

    #[derive(Deserialize)]
    struct ErrorDetail {
        #[serde(rename = "Code")]
        code: String,
        #[serde(rename = "Message", default)]
        message: Option<String>,
    }

    let parsed = quick_xml::de::from_str::<ErrorResponse>(body).ok();
    let detail = parsed
        .as_ref()
        .and_then(|r| r.errors.as_ref())
        .and_then(|e| e.error.first());

    match detail {
        Some(detail) => {
            let mut err = ServiceError::new(
                detail.code.clone(),
                detail
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("HTTP {}", status)),
                status,
            );
            if let Some(id) = parsed.as_ref().and_then(|r| r.request_id.clone()) {
                err = err.with_request_id(id);
            }
            err
        }
        None => {
            let snippet: String = body.trim().chars().take(200).collect();
            ServiceError::new("UnknownError", format!("HTTP {}: {}", status, snippet), status)
        }
    }
}

/// An EC2 `<xxxSet><item/>...</xxxSet>` list.
///
/// Decodes from the item wrapper and serialises as a plain sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemList<T>(pub Vec<T>);

impl<T> Default for ItemList<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> ItemList<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> From<Vec<T>> for ItemList<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ItemList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Items<U> {
            #[serde(default = "Vec::new")]
            item: Vec<U>,
        }

        Items::deserialize(deserializer).map(|items| ItemList(items.item))
    }
}

impl<T: Serialize> Serialize for ItemList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
