use crate::config::service::{AuthConfig, ServiceConfig};
use crate::domain::ports::{BlockingTransport, HttpReply, HttpTransport, RequestBody, RequestSpec};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Body, Client};
use tokio_util::io::ReaderStream;

const DEFAULT_USER_AGENT: &str = concat!("rest-stub/", env!("CARGO_PKG_VERSION"));

/// The inferred content type replaces any static `Content-Type` from the config.
fn content_type_header(content_type: &'static str) -> HeaderMap {
    HeaderMap::from_iter([(CONTENT_TYPE, HeaderValue::from_static(content_type))])
}

/// Async HTTP transport for service stubs, backed by `reqwest::Client`.
///
/// Every request gets the configured static headers and authentication on
/// top of what the stub put into the [`RequestSpec`].
#[derive(Debug, Clone)]
pub struct ServiceHttpClient {
    client: Client,
    config: ServiceConfig,
}

impl ServiceHttpClient {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
            .build()?;
        Ok(Self { client, config })
    }

    /// Reuses an existing client; timeout and user agent of `config` are not applied.
    pub fn with_client(client: Client, config: ServiceConfig) -> Self {
        Self { client, config }
    }

    pub fn base_url(&self) -> &str {
        &self.config.url
    }

    pub fn http_client(&self) -> &Client {
        &self.client
    }

    async fn request_builder(&self, request: RequestSpec) -> Result<reqwest::RequestBuilder> {
        let mut builder = self.client.request(request.method, &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        for (name, value) in &self.config.headers {
            builder = builder.header(name, value);
        }
        builder = match &self.config.auth {
            Some(AuthConfig::Basic { user, password }) => builder.basic_auth(user, password.as_ref()),
            Some(AuthConfig::Bearer { token }) => builder.bearer_auth(token),
            None => builder,
        };
        if let Some(content_type) = request.content_type {
            builder = builder.headers(content_type_header(content_type));
        }

        builder = match request.body {
            Some(RequestBody::Text(text)) => builder.body(text),
            Some(RequestBody::File(path)) => {
                let file = tokio::fs::File::open(&path).await?;
                builder.body(Body::wrap_stream(ReaderStream::new(file)))
            }
            None => builder,
        };
        Ok(builder)
    }
}

#[async_trait]
impl HttpTransport for ServiceHttpClient {
    async fn send(&self, request: RequestSpec) -> Result<HttpReply> {
        let builder = self.request_builder(request).await?;
        let response = builder.send().await?;
        let status = response.status().as_u16();
        tracing::debug!("HTTP response status: {}", status);
        let body = response.bytes().await?;
        Ok(HttpReply::new(status, body.to_vec()))
    }
}

/// Blocking counterpart of [`ServiceHttpClient`]. Must not be created or
/// used from inside an async runtime.
#[derive(Debug, Clone)]
pub struct BlockingServiceHttpClient {
    client: reqwest::blocking::Client,
    config: ServiceConfig,
}

impl BlockingServiceHttpClient {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.url
    }

    fn request_builder(&self, request: RequestSpec) -> Result<reqwest::blocking::RequestBuilder> {
        let mut builder = self.client.request(request.method, &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        for (name, value) in &self.config.headers {
            builder = builder.header(name, value);
        }
        builder = match &self.config.auth {
            Some(AuthConfig::Basic { user, password }) => builder.basic_auth(user, password.as_ref()),
            Some(AuthConfig::Bearer { token }) => builder.bearer_auth(token),
            None => builder,
        };
        if let Some(content_type) = request.content_type {
            builder = builder.headers(content_type_header(content_type));
        }
        builder = match request.body {
            Some(RequestBody::Text(text)) => builder.body(text),
            Some(RequestBody::File(path)) => builder.body(std::fs::File::open(&path)?),
            None => builder,
        };
        Ok(builder)
    }
}

impl BlockingTransport for BlockingServiceHttpClient {
    fn send(&self, request: RequestSpec) -> Result<HttpReply> {
        let response = self.request_builder(request)?.send()?;
        let status = response.status().as_u16();
        tracing::debug!("HTTP response status: {}", status);
        let body = response.bytes()?;
        Ok(HttpReply::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn spec(url: String) -> RequestSpec {
        RequestSpec {
            method: reqwest::Method::POST,
            url,
            headers: vec![("X-Trace".to_string(), "t-1".to_string())],
            body: Some(RequestBody::Text("{\"a\":1}".to_string())),
            content_type: Some("application/json"),
        }
    }

    fn content_types(headers: &HeaderMap) -> Vec<&str> {
        headers
            .get_all(CONTENT_TYPE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    #[tokio::test]
    async fn test_inferred_content_type_replaces_static_one() {
        let config = ServiceConfig::new("http://localhost").with_header("Content-Type", "text/plain");
        let client = ServiceHttpClient::new(config).unwrap();
        let request = client
            .request_builder(spec("http://localhost/echo".to_string()))
            .await
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(content_types(request.headers()), vec!["application/json"]);
    }

    #[test]
    fn test_blocking_inferred_content_type_replaces_static_one() {
        let config = ServiceConfig::new("http://localhost").with_header("content-type", "text/plain");
        let client = BlockingServiceHttpClient::new(config).unwrap();
        let request = client
            .request_builder(spec("http://localhost/echo".to_string()))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(content_types(request.headers()), vec!["application/json"]);
    }

    #[tokio::test]
    async fn test_async_send_streams_file_body() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"\x00\x01 raw bytes").unwrap();

        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/blob")
                .header("Content-Type", "application/octet-stream")
                .body("\x00\x01 raw bytes");
            then.status(200).body(vec![0xff, 0xfe]);
        });

        let client = ServiceHttpClient::new(ServiceConfig::new(server.base_url())).unwrap();
        let reply = client
            .send(RequestSpec {
                method: reqwest::Method::PUT,
                url: server.url("/blob"),
                headers: Vec::new(),
                body: Some(RequestBody::File(file.path().to_path_buf())),
                content_type: Some("application/octet-stream"),
            })
            .await
            .unwrap();

        mock.assert();
        assert_eq!(reply.body, vec![0xff, 0xfe]);
    }

    #[tokio::test]
    async fn test_async_send_applies_headers_and_auth() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/echo")
                .header("X-Trace", "t-1")
                .header("X-Client", "tests")
                .header("Authorization", "Bearer secret")
                .header("Content-Type", "application/json")
                .body("{\"a\":1}");
            then.status(201).body("created");
        });

        let config = ServiceConfig::new(server.base_url())
            .with_header("X-Client", "tests")
            .with_auth(AuthConfig::Bearer {
                token: "secret".to_string(),
            });
        let client = ServiceHttpClient::new(config).unwrap();
        let reply = client.send(spec(server.url("/echo"))).await.unwrap();

        mock.assert();
        assert_eq!(reply.status, 201);
        assert_eq!(reply.body, b"created".to_vec());
    }

    #[test]
    fn test_blocking_send_with_basic_auth() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/echo")
                .header("Authorization", "Basic dXNlcjpwdw==");
            then.status(204);
        });

        let config = ServiceConfig::new(server.base_url()).with_auth(AuthConfig::Basic {
            user: "user".to_string(),
            password: Some("pw".to_string()),
        });
        let client = BlockingServiceHttpClient::new(config).unwrap();
        let reply = client.send(spec(server.url("/echo"))).unwrap();

        mock.assert();
        assert_eq!(reply.status, 204);
        assert!(reply.body.is_empty());
    }
}
