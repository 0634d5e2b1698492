//! asyncapi-tmctl
//!
//! Generates TriggerMesh `tmctl` scripts from AsyncAPI documents and creates
//! TriggerMesh source objects on Kubernetes from static templates.

pub mod adapters;
pub mod asyncapi;
pub mod config;
pub mod crd;
pub mod error;
pub mod sources;
pub mod telemetry;
pub mod translator;

pub use error::{Error, Result};
