//! Kubernetes client construction

use kube::{Client, Config};
use tracing::debug;

use crate::{Error, Result};

/// Build a client from the pod's service account or from the local kubeconfig
pub async fn build_client(in_cluster: bool) -> Result<Client> {
    let config = if in_cluster {
        debug!("Using in-cluster Kubernetes configuration");
        Config::incluster()
            .map_err(|e| Error::KubeError(format!("Failed to load in-cluster config: {}", e)))?
    } else {
        debug!("Inferring Kubernetes configuration from the environment");
        Config::infer()
            .await
            .map_err(|e| Error::KubeError(format!("Failed to load kubeconfig: {}", e)))?
    };

    Client::try_from(config)
        .map_err(|e| Error::KubeError(format!("Failed to create client: {}", e)))
}
