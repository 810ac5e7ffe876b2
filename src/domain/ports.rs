use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Body of an outgoing request, already converted from the argument.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Text(String),
    File(PathBuf),
}

/// Transport-neutral description of one HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: reqwest::Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    pub content_type: Option<&'static str>,
}

/// Status and raw body bytes of a response. Interpreting the bytes is left
/// to the decoder, which knows the method's return type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: RequestSpec) -> Result<HttpReply>;
}

pub trait BlockingTransport: Send + Sync {
    fn send(&self, request: RequestSpec) -> Result<HttpReply>;
}
