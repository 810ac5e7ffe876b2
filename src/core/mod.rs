pub mod context;
pub mod path;
pub mod request;
pub mod response;
pub mod stub;
pub mod sync_stub;

pub use crate::domain::invocation::{ArgValue, Invocation};
pub use crate::domain::model::{
    HttpMethod, ParamBinding, RestMethodMetadata, RestParameter, RestParameters,
    RestServiceMetadata, ReturnType,
};
pub use crate::domain::ports::{BlockingTransport, HttpReply, HttpTransport, RequestBody, RequestSpec};
pub use crate::utils::error::Result;
