use crate::adapters::http::BlockingServiceHttpClient;
use crate::core::context::ServiceContext;
use crate::core::request::build_request;
use crate::core::response::{decode, Decoded};
use crate::domain::invocation::Invocation;
use crate::domain::model::RestServiceMetadata;
use crate::domain::ports::BlockingTransport;
use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;

/// Blocking variant of [`crate::core::stub::ServiceClientStub`]; each call
/// waits for the HTTP response on the calling thread.
pub struct SyncServiceClientStub<S: ?Sized> {
    context: ServiceContext<S>,
    client: Arc<dyn BlockingTransport>,
    metadata: Arc<RestServiceMetadata>,
}

impl<S: ?Sized> SyncServiceClientStub<S> {
    pub fn of(
        context: ServiceContext<S>,
        client: Arc<dyn BlockingTransport>,
        metadata: RestServiceMetadata,
    ) -> Self {
        Self {
            context,
            client,
            metadata: Arc::new(metadata),
        }
    }

    pub fn connect(context: ServiceContext<S>, metadata: RestServiceMetadata) -> Result<Self> {
        let client = BlockingServiceHttpClient::new(context.config().clone())?;
        Ok(Self::of(context, Arc::new(client), metadata))
    }

    pub fn context(&self) -> &ServiceContext<S> {
        &self.context
    }

    pub fn api(&self) -> &str {
        self.context.api()
    }

    pub fn invoke(&self, invocation: Invocation) -> Result<Decoded> {
        let method = self.metadata.method(invocation.method())?;
        let request = build_request(&self.context, method, &invocation)?;
        let url = request.url.clone();
        tracing::debug!("{}.{} -> {} {}", self.context.api(), method.name, request.method, url);

        let reply = self.client.send(request)?;
        decode(&url, method, reply)
    }

    pub fn call<T: DeserializeOwned>(&self, invocation: Invocation) -> Result<Option<T>> {
        self.invoke(invocation)?.into_typed()
    }

    pub fn call_void(&self, invocation: Invocation) -> Result<()> {
        self.invoke(invocation).map(|_| ())
    }
}

impl<S: ?Sized> Clone for SyncServiceClientStub<S> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
            client: Arc::clone(&self.client),
            metadata: Arc::clone(&self.metadata),
        }
    }
}

impl<S: ?Sized> fmt::Display for SyncServiceClientStub<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceClient for {}", self.context.api())
    }
}

impl<S: ?Sized> PartialEq for SyncServiceClientStub<S> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}
