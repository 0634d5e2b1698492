//! Integration tests for source template resolution and validation
//!
//! These tests exercise everything the source creator does before it talks
//! to the cluster: template loading, API resource resolution, and typed
//! validation of HTTPPollerSource instances.

use std::path::PathBuf;

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::DynamicObject;
use serde_json::{json, Value};

use asyncapi_tmctl::adapters::templates::{load_definition, load_instance};
use asyncapi_tmctl::crd::{
    generate_crds, Destination, HTTPPollerSource, HttpPollerSourceSpec, KReference,
    ValueFromField,
};
use asyncapi_tmctl::sources::{resolve_api_resource, validate_http_poller_source, validate_instance};
use asyncapi_tmctl::Error;

// ============================================================================
// Test Helpers
// ============================================================================

fn component(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("components")
        .join(name)
}

fn definition_json() -> Value {
    let text = std::fs::read_to_string(component("httppollersource-crd.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn instance_json() -> Value {
    let text = std::fs::read_to_string(component("httppollersource-cr.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn definition(value: Value) -> CustomResourceDefinition {
    serde_json::from_value(value).unwrap()
}

fn instance(value: Value) -> DynamicObject {
    serde_json::from_value(value).unwrap()
}

fn valid_spec() -> HttpPollerSourceSpec {
    HttpPollerSourceSpec {
        event_type: "io.triggermesh.httppoller.event".to_string(),
        event_source: None,
        endpoint: "https://example.com/status".to_string(),
        method: "GET".to_string(),
        skip_verify: None,
        ca_certificate: None,
        basic_auth_username: None,
        basic_auth_password: None,
        headers: Default::default(),
        interval: "10s".to_string(),
        sink: Destination {
            ref_: Some(KReference {
                api_version: "eventing.knative.dev/v1".to_string(),
                kind: "Broker".to_string(),
                name: "default".to_string(),
                namespace: None,
            }),
            uri: None,
        },
    }
}

fn create_source(spec: HttpPollerSourceSpec) -> HTTPPollerSource {
    HTTPPollerSource {
        metadata: ObjectMeta {
            name: Some("test-source".to_string()),
            namespace: Some("default".to_string()),
            ..Default::default()
        },
        spec,
        status: None,
    }
}

fn assert_template_error(result: Result<impl std::fmt::Debug, Error>, needle: &str) {
    match result {
        Err(Error::TemplateError(msg)) => assert!(
            msg.contains(needle),
            "expected '{}' in template error '{}'",
            needle,
            msg
        ),
        other => panic!("expected TemplateError, got {:?}", other),
    }
}

// ============================================================================
// Bundled Template Tests
// ============================================================================

#[test]
fn bundled_templates_load_and_resolve() {
    let crd = load_definition(&component("httppollersource-crd.json")).unwrap();
    let cr = load_instance(&component("httppollersource-cr.json")).unwrap();

    let api_resource = resolve_api_resource(&crd, &cr).unwrap();

    assert_eq!(api_resource.group, "sources.triggermesh.io");
    assert_eq!(api_resource.version, "v1alpha1");
    assert_eq!(api_resource.api_version, "sources.triggermesh.io/v1alpha1");
    assert_eq!(api_resource.kind, "HTTPPollerSource");
    assert_eq!(api_resource.plural, "httppollersources");
}

#[test]
fn bundled_instance_passes_validation() {
    let crd = load_definition(&component("httppollersource-crd.json")).unwrap();
    let cr = load_instance(&component("httppollersource-cr.json")).unwrap();

    let api_resource = resolve_api_resource(&crd, &cr).unwrap();

    assert!(validate_instance(&api_resource, &cr).is_ok());
}

#[test]
fn yaml_templates_are_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("source.yaml");
    std::fs::write(&path, serde_yaml::to_string(&instance_json()).unwrap()).unwrap();

    let cr = load_instance(&path).unwrap();

    assert_eq!(cr.metadata.name.as_deref(), Some("ws-with-node"));
}

#[test]
fn missing_template_is_template_error() {
    assert_template_error(
        load_definition(&component("does-not-exist.json")),
        "does-not-exist.json",
    );
}

#[test]
fn unparsable_template_is_template_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert_template_error(load_instance(&path), "broken.json");
}

// ============================================================================
// API Resource Resolution Tests
// ============================================================================

#[test]
fn group_mismatch_is_rejected() {
    let mut cr = instance_json();
    cr["apiVersion"] = json!("sources.example.com/v1alpha1");

    assert_template_error(
        resolve_api_resource(&definition(definition_json()), &instance(cr)),
        "group",
    );
}

#[test]
fn kind_mismatch_is_rejected() {
    let mut cr = instance_json();
    cr["kind"] = json!("WebhookSource");

    assert_template_error(
        resolve_api_resource(&definition(definition_json()), &instance(cr)),
        "kind",
    );
}

#[test]
fn unknown_version_is_rejected() {
    let mut cr = instance_json();
    cr["apiVersion"] = json!("sources.triggermesh.io/v1");

    assert_template_error(
        resolve_api_resource(&definition(definition_json()), &instance(cr)),
        "not served",
    );
}

#[test]
fn unserved_version_is_rejected() {
    let mut crd = definition_json();
    crd["spec"]["versions"][0]["served"] = json!(false);

    assert_template_error(
        resolve_api_resource(&definition(crd), &instance(instance_json())),
        "not served",
    );
}

#[test]
fn cluster_scoped_definition_is_rejected() {
    let mut crd = definition_json();
    crd["spec"]["scope"] = json!("Cluster");

    assert_template_error(
        resolve_api_resource(&definition(crd), &instance(instance_json())),
        "namespaced",
    );
}

#[test]
fn core_api_version_is_rejected() {
    let mut cr = instance_json();
    cr["apiVersion"] = json!("v1");

    assert!(matches!(
        resolve_api_resource(&definition(definition_json()), &instance(cr)),
        Err(Error::TemplateError(_))
    ));
}

#[test]
fn instance_without_type_information_is_rejected() {
    let cr = json!({
        "metadata": { "name": "untyped" },
        "spec": {}
    });

    assert!(matches!(
        resolve_api_resource(&definition(definition_json()), &instance(cr)),
        Err(Error::TemplateError(_))
    ));
}

// ============================================================================
// Instance Validation Tests
// ============================================================================

fn validate_with(spec_patch: impl FnOnce(&mut Value)) -> Result<(), Error> {
    let crd = definition(definition_json());
    let mut cr = instance_json();
    spec_patch(&mut cr["spec"]);
    let cr = instance(cr);
    let api_resource = resolve_api_resource(&crd, &cr)?;
    validate_instance(&api_resource, &cr)
}

#[test]
fn invalid_endpoint_is_rejected() {
    let result = validate_with(|spec| spec["endpoint"] = json!("worldtimeapi.org/api"));

    assert!(matches!(result, Err(Error::ValidationError(ref m)) if m.contains("endpoint")));
}

#[test]
fn unknown_method_is_rejected() {
    let result = validate_with(|spec| spec["method"] = json!("FETCH"));

    assert!(matches!(result, Err(Error::ValidationError(ref m)) if m.contains("method")));
}

#[test]
fn bad_interval_is_rejected() {
    for interval in ["10", "0s", "soon"] {
        let result = validate_with(|spec| spec["interval"] = json!(interval));
        assert!(
            matches!(result, Err(Error::ValidationError(ref m)) if m.contains("interval")),
            "interval {:?} should be rejected",
            interval
        );
    }
}

#[test]
fn missing_required_field_is_validation_error() {
    let result = validate_with(|spec| {
        spec.as_object_mut().unwrap().remove("endpoint");
    });

    assert!(matches!(result, Err(Error::ValidationError(_))));
}

#[test]
fn sink_uri_is_accepted_instead_of_ref() {
    let result = validate_with(|spec| spec["sink"] = json!({ "uri": "http://event-display.default.svc" }));

    assert!(result.is_ok());
}

#[test]
fn other_kinds_are_not_validated() {
    let crd = definition(json!({
        "apiVersion": "apiextensions.k8s.io/v1",
        "kind": "CustomResourceDefinition",
        "metadata": { "name": "webhooksources.sources.triggermesh.io" },
        "spec": {
            "group": "sources.triggermesh.io",
            "scope": "Namespaced",
            "names": { "kind": "WebhookSource", "plural": "webhooksources" },
            "versions": [{ "name": "v1alpha1", "served": true, "storage": true }]
        }
    }));
    let cr = instance(json!({
        "apiVersion": "sources.triggermesh.io/v1alpha1",
        "kind": "WebhookSource",
        "metadata": { "name": "hook" },
        "spec": { "eventType": "" }
    }));

    let api_resource = resolve_api_resource(&crd, &cr).unwrap();

    assert_eq!(api_resource.plural, "webhooksources");
    assert!(validate_instance(&api_resource, &cr).is_ok());
}

// ============================================================================
// Typed Validation Tests
// ============================================================================

#[test]
fn typed_source_valid_spec_passes_validation() {
    let source = create_source(valid_spec());
    let result = validate_http_poller_source(&source);
    if let Err(e) = &result {
        panic!("Validation failed unexpectedly: {:?}", e);
    }
}

#[test]
fn typed_source_empty_event_type_fails_validation() {
    let mut spec = valid_spec();
    spec.event_type = "  ".to_string();

    let err = validate_http_poller_source(&create_source(spec)).unwrap_err();

    assert!(err.to_string().contains("eventType"));
}

#[test]
fn typed_source_without_sink_fails_validation() {
    let mut spec = valid_spec();
    spec.sink = Destination::default();

    let err = validate_http_poller_source(&create_source(spec)).unwrap_err();

    assert!(err.to_string().contains("sink"));
}

#[test]
fn typed_source_empty_password_fails_validation() {
    let mut spec = valid_spec();
    spec.basic_auth_username = Some("poller".to_string());
    spec.basic_auth_password = Some(ValueFromField::default());

    let err = validate_http_poller_source(&create_source(spec)).unwrap_err();

    assert!(err.to_string().contains("basicAuthPassword"));
}

#[test]
fn typed_source_accepts_every_supported_method() {
    for method in ["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"] {
        let mut spec = valid_spec();
        spec.method = method.to_string();
        assert!(
            validate_http_poller_source(&create_source(spec)).is_ok(),
            "method {} should be valid",
            method
        );
    }
}

// ============================================================================
// CRD Generation Tests
// ============================================================================

#[test]
fn generated_crd_matches_bundled_definition_identity() {
    let crds = generate_crds().unwrap();
    assert_eq!(crds.len(), 1);

    let generated: CustomResourceDefinition = serde_yaml::from_str(&crds[0]).unwrap();
    let bundled = definition(definition_json());

    assert_eq!(generated.metadata.name, bundled.metadata.name);
    assert_eq!(generated.spec.group, bundled.spec.group);
    assert_eq!(generated.spec.names.kind, bundled.spec.names.kind);
    assert_eq!(generated.spec.names.plural, bundled.spec.names.plural);
    assert_eq!(generated.spec.scope, "Namespaced");
}
