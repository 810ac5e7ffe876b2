use crate::adapters::http::ServiceHttpClient;
use crate::core::context::ServiceContext;
use crate::core::request::build_request;
use crate::core::response::{decode, Decoded};
use crate::domain::invocation::Invocation;
use crate::domain::model::RestServiceMetadata;
use crate::domain::ports::HttpTransport;
use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;

/// Client-side stand-in for the service API `S`.
///
/// Implement your API trait on a thin wrapper that forwards each method as an
/// [`Invocation`] to [`ServiceClientStub::call`]:
///
/// ```ignore
/// impl PetApi for PetClient {
///     async fn get_pet(&self, id: u64) -> Result<Option<Pet>> {
///         self.stub.call(Invocation::new("get_pet").arg(id)).await
///     }
/// }
/// ```
pub struct ServiceClientStub<S: ?Sized> {
    context: ServiceContext<S>,
    client: Arc<dyn HttpTransport>,
    metadata: Arc<RestServiceMetadata>,
}

impl<S: ?Sized> ServiceClientStub<S> {
    pub fn of(
        context: ServiceContext<S>,
        client: Arc<dyn HttpTransport>,
        metadata: RestServiceMetadata,
    ) -> Self {
        Self {
            context,
            client,
            metadata: Arc::new(metadata),
        }
    }

    /// Creates the stub together with a [`ServiceHttpClient`] built from the context's config.
    pub fn connect(context: ServiceContext<S>, metadata: RestServiceMetadata) -> Result<Self> {
        let client = ServiceHttpClient::new(context.config().clone())?;
        Ok(Self::of(context, Arc::new(client), metadata))
    }

    pub fn context(&self) -> &ServiceContext<S> {
        &self.context
    }

    pub fn metadata(&self) -> &RestServiceMetadata {
        &self.metadata
    }

    pub fn api(&self) -> &str {
        self.context.api()
    }

    /// Sends the HTTP request for `invocation` and decodes the response
    /// according to the method's return type.
    pub async fn invoke(&self, invocation: Invocation) -> Result<Decoded> {
        let method = self.metadata.method(invocation.method())?;
        let request = build_request(&self.context, method, &invocation)?;
        let url = request.url.clone();

        tracing::debug!(
            "{}.{} -> {} {}",
            self.context.api(),
            method.name,
            request.method,
            url
        );

        let reply = self.client.send(request).await?;
        decode(&url, method, reply)
    }

    pub async fn call<T: DeserializeOwned>(&self, invocation: Invocation) -> Result<Option<T>> {
        self.invoke(invocation).await?.into_typed()
    }

    pub async fn call_void(&self, invocation: Invocation) -> Result<()> {
        self.invoke(invocation).await.map(|_| ())
    }
}

impl<S: ?Sized> Clone for ServiceClientStub<S> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
            client: Arc::clone(&self.client),
            metadata: Arc::clone(&self.metadata),
        }
    }
}

impl<S: ?Sized> fmt::Display for ServiceClientStub<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceClient for {}", self.context.api())
    }
}

impl<S: ?Sized> fmt::Debug for ServiceClientStub<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceClientStub")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

/// Two stubs are equal only if they are the same stub.
impl<S: ?Sized> PartialEq for ServiceClientStub<S> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}
