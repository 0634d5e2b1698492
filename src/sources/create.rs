//! Creating a source object from a definition and an instance template

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::api::{ApiResource, DynamicObject, PostParams};
use kube::core::GroupVersionKind;
use kube::{Api, Client, Resource, ResourceExt};
use tracing::info;

use crate::crd::HTTPPollerSource;
use crate::sources::validation::validate_http_poller_source;
use crate::{Error, Result};

/// Resolve the API endpoint for `instance` from its definition
///
/// The instance must belong to the definition's group and kind, use a served
/// version, and the definition must be namespaced.
pub fn resolve_api_resource(
    definition: &CustomResourceDefinition,
    instance: &DynamicObject,
) -> Result<ApiResource> {
    let spec = &definition.spec;

    let types = instance.types.as_ref().ok_or_else(|| {
        Error::TemplateError("instance template must set apiVersion and kind".to_string())
    })?;

    let (group, version) = types.api_version.split_once('/').ok_or_else(|| {
        Error::TemplateError(format!(
            "instance apiVersion '{}' must have the form <group>/<version>",
            types.api_version
        ))
    })?;

    if group != spec.group {
        return Err(Error::TemplateError(format!(
            "instance group '{}' does not match definition group '{}'",
            group, spec.group
        )));
    }

    if types.kind != spec.names.kind {
        return Err(Error::TemplateError(format!(
            "instance kind '{}' does not match definition kind '{}'",
            types.kind, spec.names.kind
        )));
    }

    if !spec.versions.iter().any(|v| v.name == version && v.served) {
        return Err(Error::TemplateError(format!(
            "version '{}' is not served by {}",
            version,
            definition.name_any()
        )));
    }

    if spec.scope != "Namespaced" {
        return Err(Error::TemplateError(format!(
            "{} has scope '{}', only namespaced sources can be created",
            definition.name_any(),
            spec.scope
        )));
    }

    let gvk = GroupVersionKind::gvk(group, version, &types.kind);
    Ok(ApiResource::from_gvk_with_plural(&gvk, &spec.names.plural))
}

/// Validate the instance against its typed schema when one is known
pub fn validate_instance(api_resource: &ApiResource, instance: &DynamicObject) -> Result<()> {
    if api_resource.group == HTTPPollerSource::group(&())
        && api_resource.kind == HTTPPollerSource::kind(&())
    {
        let value = serde_json::to_value(instance)
            .map_err(|e| Error::TemplateError(format!("Failed to encode instance: {}", e)))?;
        let source: HTTPPollerSource = serde_json::from_value(value).map_err(|e| {
            Error::ValidationError(format!("Invalid {}: {}", api_resource.kind, e))
        })?;
        validate_http_poller_source(&source)?;
    }

    Ok(())
}

/// Create `instance` in `namespace`
///
/// Issues a single create call; nothing is retried. Everything before the
/// call is covered by `resolve_api_resource` and `validate_instance` tests,
/// the call itself only runs against a live cluster.
pub async fn create_resource(
    client: &Client,
    definition: &CustomResourceDefinition,
    instance: &DynamicObject,
    namespace: &str,
) -> Result<DynamicObject> {
    let api_resource = resolve_api_resource(definition, instance)?;
    validate_instance(&api_resource, instance)?;

    let name = instance.name_any();
    let api: Api<DynamicObject> = Api::namespaced_with(client.clone(), namespace, &api_resource);

    let created = api
        .create(&PostParams::default(), instance)
        .await
        .map_err(|e| {
            Error::KubeError(format!(
                "Failed to create {} {}/{}: {}",
                api_resource.kind, namespace, name, e
            ))
        })?;

    info!(
        "Created {} {}/{}",
        api_resource.kind,
        namespace,
        created.name_any()
    );

    Ok(created)
}
