//! Custom Resource Definitions for TriggerMesh sources

mod http_poller_source;

pub use http_poller_source::*;

use kube::CustomResourceExt;

use crate::{Error, Result};

/// Generate CRD YAML manifests for all custom resources
pub fn generate_crds() -> Result<Vec<String>> {
    let crd = serde_yaml::to_string(&HTTPPollerSource::crd())
        .map_err(|e| Error::TemplateError(format!("Failed to serialize CRD: {}", e)))?;
    Ok(vec![crd])
}
