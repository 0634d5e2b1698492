//! AsyncAPI document types

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::{Error, Result};

/// Transport protocol declared by a server
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Protocol {
    Kafka,
    Http,
    GooglePubSub,
    /// Any protocol tmctl has no source for
    Other(String),
}

impl Protocol {
    pub fn as_str(&self) -> &str {
        match self {
            Protocol::Kafka => "kafka",
            Protocol::Http => "http",
            Protocol::GooglePubSub => "googlepubsub",
            Protocol::Other(name) => name,
        }
    }
}

impl From<String> for Protocol {
    fn from(value: String) -> Self {
        match value.as_str() {
            "kafka" => Protocol::Kafka,
            "http" => Protocol::Http,
            "googlepubsub" => Protocol::GooglePubSub,
            _ => Protocol::Other(value),
        }
    }
}

impl From<&str> for Protocol {
    fn from(value: &str) -> Self {
        Protocol::from(value.to_string())
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document metadata
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Info {
    /// API title, used as the broker name
    pub title: String,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// A server declared under `servers`
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    /// Key under `servers`
    #[serde(skip)]
    pub name: String,

    /// Connection endpoint
    pub url: String,

    pub protocol: Protocol,

    #[serde(default)]
    pub protocol_version: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl Server {
    pub fn new(name: &str, protocol: impl Into<Protocol>, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            protocol: protocol.into(),
            protocol_version: None,
            description: None,
        }
    }
}

/// HTTP operation binding
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpOperationBinding {
    /// `request` or `response`
    #[serde(default, rename = "type")]
    pub type_: Option<String>,

    /// HTTP method used to poll the endpoint
    #[serde(default)]
    pub method: Option<String>,

    #[serde(default)]
    pub binding_version: Option<String>,
}

/// Google Cloud Pub/Sub operation binding
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePubSubOperationBinding {
    /// Pub/Sub topic to pull from
    #[serde(default)]
    pub topic: Option<String>,

    #[serde(default)]
    pub binding_version: Option<String>,
}

/// Protocol-specific bindings of an operation
#[derive(Clone, Debug, Default, Deserialize)]
pub struct OperationBindings {
    #[serde(default)]
    pub http: Option<HttpOperationBinding>,

    #[serde(default)]
    pub googlepubsub: Option<GooglePubSubOperationBinding>,
}

/// A publish or subscribe operation on a channel
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default)]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub bindings: OperationBindings,
}

/// A channel declared under `channels`
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Channel {
    /// Key under `channels`
    #[serde(skip)]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Names of the servers this channel is available on, in declaration order
    #[serde(default)]
    pub servers: Vec<String>,

    #[serde(default)]
    pub subscribe: Option<Operation>,

    #[serde(default)]
    pub publish: Option<Operation>,
}

impl Channel {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Bind the channel to a server
    pub fn on_server(mut self, server: &str) -> Self {
        self.servers.push(server.to_string());
        self
    }

    /// Declare a subscribe operation with the given bindings
    pub fn subscribe_with(mut self, bindings: OperationBindings) -> Self {
        self.subscribe = Some(Operation {
            bindings,
            ..Default::default()
        });
        self
    }

    /// Whether the channel declares a subscribe operation
    pub fn is_subscribable(&self) -> bool {
        self.subscribe.is_some()
    }

    pub fn has_servers(&self) -> bool {
        !self.servers.is_empty()
    }

    /// Bindings of the subscribe operation, if any
    pub fn subscribe_bindings(&self) -> Option<&OperationBindings> {
        self.subscribe.as_ref().map(|op| &op.bindings)
    }
}

/// A parsed AsyncAPI document
///
/// Channels keep the order in which they were declared in the source text.
#[derive(Clone, Debug, Default)]
pub struct Document {
    /// AsyncAPI specification version
    pub asyncapi: Option<String>,
    pub info: Info,
    servers: BTreeMap<String, Server>,
    channels: Vec<Channel>,
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    asyncapi: Option<String>,
    info: Info,
    #[serde(default)]
    servers: Option<BTreeMap<String, Server>>,
    #[serde(default)]
    channels: Option<serde_yaml::Mapping>,
}

impl Document {
    /// Create an empty document with the given title
    pub fn new(title: &str) -> Self {
        Self {
            info: Info {
                title: title.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with_server(mut self, server: Server) -> Self {
        self.servers.insert(server.name.clone(), server);
        self
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channels.push(channel);
        self
    }

    /// Parse a document from YAML or JSON text
    pub fn from_yaml(text: &str) -> Result<Self> {
        let raw: RawDocument = serde_yaml::from_str(text)
            .map_err(|e| Error::MalformedDocument(format!("Failed to parse document: {}", e)))?;

        let servers = raw
            .servers
            .unwrap_or_default()
            .into_iter()
            .map(|(name, mut server)| {
                server.name = name.clone();
                (name, server)
            })
            .collect();

        let mut channels = Vec::new();
        for (key, value) in raw.channels.unwrap_or_default() {
            let name = channel_name(&key).ok_or_else(|| {
                Error::MalformedDocument(format!("Channel name must be a scalar, got {:?}", key))
            })?;

            // A channel declared with no body is valid and has no operations.
            let mut channel: Channel = if value.is_null() {
                Channel::default()
            } else {
                serde_yaml::from_value(value).map_err(|e| {
                    Error::MalformedDocument(format!("Failed to parse channel '{}': {}", name, e))
                })?
            };
            channel.name = name;
            channels.push(channel);
        }

        Ok(Self {
            asyncapi: raw.asyncapi,
            info: raw.info,
            servers,
            channels,
        })
    }

    /// Read and parse a document from a file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_yaml(&text)
    }

    pub fn title(&self) -> &str {
        &self.info.title
    }

    /// Channels in declaration order
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.name == name)
    }

    pub fn server(&self, name: &str) -> Option<&Server> {
        self.servers.get(name)
    }

    pub fn servers(&self) -> impl Iterator<Item = &Server> {
        self.servers.values()
    }
}

/// Text form of a scalar mapping key; unquoted `2024:` names channel `2024`
fn channel_name(key: &serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Null => Some("null".to_string()),
        _ => None,
    }
}
