// Domain layer: service metadata, invocation records and the transport ports.

pub mod invocation;
pub mod model;
pub mod ports;
