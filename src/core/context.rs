use crate::config::service::ServiceConfig;
use std::fmt;
use std::marker::PhantomData;

/// Everything a client stub knows about the service it talks to: the API
/// it stands in for and how to reach it.
pub struct ServiceContext<S: ?Sized> {
    api: String,
    config: ServiceConfig,
    _api: PhantomData<fn() -> Box<S>>,
}

impl<S: ?Sized> ServiceContext<S> {
    pub fn new(api: impl Into<String>, config: ServiceConfig) -> Self {
        Self {
            api: api.into(),
            config,
            _api: PhantomData,
        }
    }

    /// Uses the Rust type name of `S` as API name.
    pub fn for_type(config: ServiceConfig) -> Self {
        let full = std::any::type_name::<S>();
        let short = full.rsplit("::").next().unwrap_or(full);
        Self::new(short, config)
    }

    pub fn api(&self) -> &str {
        &self.api
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.url
    }
}

impl<S: ?Sized> Clone for ServiceContext<S> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            config: self.config.clone(),
            _api: PhantomData,
        }
    }
}

impl<S: ?Sized> fmt::Debug for ServiceContext<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContext")
            .field("api", &self.api)
            .field("url", &self.config.url)
            .finish()
    }
}
