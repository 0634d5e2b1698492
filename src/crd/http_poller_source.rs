//! HTTPPollerSource Custom Resource Definition

use chrono::{DateTime, Utc};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// HTTPPollerSource resource specification
///
/// Periodically sends a request to an HTTP endpoint and forwards each
/// response body to the sink as a CloudEvent.
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "sources.triggermesh.io",
    version = "v1alpha1",
    kind = "HTTPPollerSource",
    plural = "httppollersources",
    singular = "httppollersource",
    namespaced,
    status = "HttpPollerSourceStatus",
    category = "all",
    category = "triggermesh",
    category = "sources",
    printcolumn = r#"{"name": "Ready", "type": "string", "jsonPath": ".status.conditions[?(@.type=='Ready')].status"}"#,
    printcolumn = r#"{"name": "Reason", "type": "string", "jsonPath": ".status.conditions[?(@.type=='Ready')].reason"}"#,
    printcolumn = r#"{"name": "Sink", "type": "string", "jsonPath": ".status.sinkUri"}"#,
    printcolumn = r#"{"name": "Age", "type": "date", "jsonPath": ".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct HttpPollerSourceSpec {
    /// CloudEvents type attribute of emitted events
    pub event_type: String,

    /// CloudEvents source attribute of emitted events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_source: Option<String>,

    /// URL to poll
    pub endpoint: String,

    /// HTTP method used for each request
    pub method: String,

    /// Skip TLS certificate verification of the endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_verify: Option<bool>,

    /// PEM CA certificate used to verify the endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_certificate: Option<String>,

    /// Basic authentication user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_auth_username: Option<String>,

    /// Basic authentication password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_auth_password: Option<ValueFromField>,

    /// Headers added to each request
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    /// Polling interval as a duration string (e.g. 10s, 1m30s)
    pub interval: String,

    /// Where events are delivered
    pub sink: Destination,
}

/// A value given inline or read from a secret
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValueFromField {
    /// Literal value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Secret holding the value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_from_secret: Option<SecretKeySelector>,
}

/// Key of a secret in the source's namespace
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecretKeySelector {
    /// Secret name
    pub name: String,
    /// Key in secret
    pub key: String,
}

/// Event destination, either an addressable object or a URI
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    /// Addressable object reference
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_: Option<KReference>,

    /// Absolute URI, or path relative to `ref`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Reference to an addressable object
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KReference {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    /// Defaults to the source's namespace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// HTTPPollerSource status
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HttpPollerSourceStatus {
    /// Observed generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,

    /// Resolved sink address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sink_uri: Option<String>,

    /// Status conditions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

/// Status condition
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Condition type (Ready, Deployed, SinkProvided)
    #[serde(rename = "type")]
    pub type_: String,

    /// Status (True, False, Unknown)
    pub status: String,

    /// Last transition time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<DateTime<Utc>>,

    /// Reason for the condition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Human-readable message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
