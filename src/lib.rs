pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{BlockingServiceHttpClient, ServiceHttpClient};
pub use config::{AuthConfig, ServiceConfig, ServiceDefinition};
pub use crate::core::{
    context::ServiceContext, response::Decoded, stub::ServiceClientStub,
    sync_stub::SyncServiceClientStub, ArgValue, Invocation,
};
pub use utils::error::{ClientError, Result};
