//! Source object creation on Kubernetes

pub mod create;
pub mod validation;

pub use create::{create_resource, resolve_api_resource, validate_instance};
pub use validation::{parse_duration, validate_http_poller_source};
