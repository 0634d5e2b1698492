//! Static resource template loading
//!
//! Templates with a `.json` extension are read as JSON, anything else as YAML.

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::api::DynamicObject;
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::{Error, Result};

/// Load a CustomResourceDefinition template
pub fn load_definition(path: &Path) -> Result<CustomResourceDefinition> {
    load(path)
}

/// Load a custom resource instance template
pub fn load_instance(path: &Path) -> Result<DynamicObject> {
    load(path)
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        Error::TemplateError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&text).map_err(|e| {
            Error::TemplateError(format!("Failed to parse {}: {}", path.display(), e))
        })
    } else {
        serde_yaml::from_str(&text).map_err(|e| {
            Error::TemplateError(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}
