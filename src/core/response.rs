use crate::domain::model::{RestMethodMetadata, ReturnType};
use crate::domain::ports::HttpReply;
use crate::utils::error::{ClientError, Result};
use serde::de::DeserializeOwned;

/// Result of a call, shaped by the method's declared return type.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Empty,
    Text(String),
    Json(serde_json::Value),
}

impl Decoded {
    pub fn is_empty(&self) -> bool {
        matches!(self, Decoded::Empty)
    }

    /// Converts into the caller's type; `Empty` and a JSON `null` become `None`.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<Option<T>> {
        match self {
            Decoded::Empty | Decoded::Json(serde_json::Value::Null) => Ok(None),
            Decoded::Text(text) => Ok(Some(serde_json::from_value(serde_json::Value::String(
                text,
            ))?)),
            Decoded::Json(json) => Ok(Some(serde_json::from_value(json)?)),
        }
    }
}

fn body_text(body: Vec<u8>) -> Result<String> {
    // only the kind goes into the message, never the payload
    String::from_utf8(body).map_err(|_| ClientError::UnsupportedBody {
        kind: "binary".to_string(),
    })
}

pub fn decode(url: &str, method: &RestMethodMetadata, reply: HttpReply) -> Result<Decoded> {
    if !reply.is_success() {
        return Err(ClientError::Status {
            status: reply.status,
            url: url.to_string(),
            body: String::from_utf8(reply.body).ok().filter(|b| !b.is_empty()),
        });
    }

    if reply.body.is_empty() || method.returns == ReturnType::Void {
        return Ok(Decoded::Empty);
    }

    let body = body_text(reply.body)?;
    match method.returns {
        ReturnType::Void => Ok(Decoded::Empty),
        ReturnType::Text => Ok(Decoded::Text(body)),
        ReturnType::Json => {
            let json = serde_json::from_str(&body)?;
            Ok(Decoded::Json(json))
        }
    }
}
