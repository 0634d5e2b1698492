//! Adapters between the core and the outside world: files, scripts, cluster

pub mod kube_client;
pub mod script;
pub mod templates;
