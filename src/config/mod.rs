#[cfg(feature = "cli")]
pub mod cli;
pub mod definition;
pub mod service;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use definition::ServiceDefinition;
pub use service::{AuthConfig, ServiceConfig};
