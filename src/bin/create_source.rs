//! Source creator
//!
//! Loads a CustomResourceDefinition template and a source instance template,
//! then creates the instance in the configured namespace.
//!
//! Usage: NAMESPACE=sources cargo run --bin create-source

use tracing::info;

use asyncapi_tmctl::{
    adapters::{kube_client, templates},
    config::Config,
    sources, telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    telemetry::init_tracing(&config.logging);

    let kube = &config.kube;
    let definition = templates::load_definition(&kube.definition_template)?;
    let instance = templates::load_instance(&kube.instance_template)?;

    let client = kube_client::build_client(kube.in_cluster).await?;
    info!("Connected to Kubernetes API server");

    let created = sources::create_resource(&client, &definition, &instance, &kube.namespace).await?;
    println!("{}", serde_json::to_string_pretty(&created)?);

    info!("exiting");
    Ok(())
}
