// Adapters layer: concrete transports behind the domain ports.

pub mod http;

pub use http::{BlockingServiceHttpClient, ServiceHttpClient};
