//! Environment-driven configuration
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the working directory.

use std::path::PathBuf;

use crate::translator::{TranslatorOptions, DEFAULT_SERVICE_ACCOUNT_KEY_FILE};
use crate::{Error, Result};

/// Log output format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

/// Settings for the AsyncAPI to tmctl translation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslateConfig {
    /// AsyncAPI document to read
    pub asyncapi_file: PathBuf,
    /// Script to write, `-` for stdout
    pub script_file: PathBuf,
    /// File the Pub/Sub service account key is read from when the script runs
    pub service_account_key_file: String,
}

impl TranslateConfig {
    pub fn translator_options(&self) -> TranslatorOptions {
        TranslatorOptions::with_service_account_key_file(&self.service_account_key_file)
    }
}

/// Settings for creating a source on Kubernetes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KubeConfig {
    pub namespace: String,
    /// Use the pod's service account instead of a kubeconfig
    pub in_cluster: bool,
    /// CustomResourceDefinition describing the source kind
    pub definition_template: PathBuf,
    /// Source object to create
    pub instance_template: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub translate: TranslateConfig,
    pub kube: KubeConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from `.env` and the process environment
    pub fn load() -> Result<Self> {
        check_env_file(dotenvy::dotenv())?;

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let namespace = var("NAMESPACE", "default");
        if namespace.trim().is_empty() {
            return Err(Error::ConfigError("NAMESPACE cannot be empty".to_string()));
        }

        let format = match var("LOG_FORMAT", "text").to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "text" | "" => LogFormat::Text,
            other => {
                return Err(Error::ConfigError(format!(
                    "LOG_FORMAT must be 'text' or 'json', got '{}'",
                    other
                )))
            }
        };

        Ok(Config {
            translate: TranslateConfig {
                asyncapi_file: PathBuf::from(var("ASYNCAPI_FILE", "asyncapi.yaml")),
                script_file: PathBuf::from(var("TMCTL_SCRIPT", "tmctl.sh")),
                service_account_key_file: var(
                    "SERVICE_ACCOUNT_KEY_FILE",
                    DEFAULT_SERVICE_ACCOUNT_KEY_FILE,
                ),
            },
            kube: KubeConfig {
                namespace,
                in_cluster: lookup("NODE_ENV").as_deref() == Some("production"),
                definition_template: PathBuf::from(var(
                    "SOURCE_CRD_TEMPLATE",
                    "components/httppollersource-crd.json",
                )),
                instance_template: PathBuf::from(var(
                    "SOURCE_CR_TEMPLATE",
                    "components/httppollersource-cr.json",
                )),
            },
            logging: LoggingConfig { format },
        })
    }
}

/// A missing `.env` file is fine, a malformed one is not
///
/// Tracing is not initialized yet when this runs, so the problem is returned
/// instead of logged.
fn check_env_file<T>(result: std::result::Result<T, dotenvy::Error>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(Error::ConfigError(format!("Failed to load .env file: {}", e))),
    }
}
