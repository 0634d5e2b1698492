//! Per-channel protocol resolution

use crate::asyncapi::{Channel, Protocol, Server};
use crate::translator::Command;
use crate::{Error, Result};

/// How a subscribable channel maps onto a tmctl source
///
/// Resolved once per channel from its first bound server. Each variant holds
/// only what its command needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route<'a> {
    Kafka {
        bootstrap_servers: &'a str,
    },
    Http {
        base_url: &'a str,
        method: &'a str,
    },
    GooglePubSub {
        topic: &'a str,
    },
    /// No tmctl source exists for this protocol
    Unsupported {
        server: &'a str,
        protocol: &'a str,
    },
}

impl<'a> Route<'a> {
    /// Resolve the route for `channel` served by `server`
    ///
    /// Fails if the protocol needs a subscribe binding field the channel
    /// does not declare.
    pub fn resolve(channel: &'a Channel, server: &'a Server) -> Result<Self> {
        let route = match &server.protocol {
            Protocol::Kafka => Route::Kafka {
                bootstrap_servers: &server.url,
            },
            Protocol::Http => {
                let method = channel
                    .subscribe_bindings()
                    .and_then(|b| b.http.as_ref())
                    .and_then(|http| http.method.as_deref())
                    .ok_or_else(|| missing_field(channel, "http.method"))?;
                Route::Http {
                    base_url: &server.url,
                    method,
                }
            }
            Protocol::GooglePubSub => {
                let topic = channel
                    .subscribe_bindings()
                    .and_then(|b| b.googlepubsub.as_ref())
                    .and_then(|pubsub| pubsub.topic.as_deref())
                    .ok_or_else(|| missing_field(channel, "googlepubsub.topic"))?;
                Route::GooglePubSub { topic }
            }
            Protocol::Other(protocol) => Route::Unsupported {
                server: &server.name,
                protocol,
            },
        };

        Ok(route)
    }

    /// Build the source command for `channel`, or `None` for unsupported protocols
    pub fn command(&self, channel: &str, service_account_key: &str) -> Option<Command> {
        match *self {
            Route::Kafka { bootstrap_servers } => {
                Some(Command::kafka_source(channel, bootstrap_servers))
            }
            Route::Http { base_url, method } => {
                Some(Command::http_poller_source(channel, base_url, method))
            }
            Route::GooglePubSub { topic } => Some(Command::google_pubsub_source(
                channel,
                topic,
                service_account_key,
            )),
            Route::Unsupported { .. } => None,
        }
    }
}

fn missing_field(channel: &Channel, field: &'static str) -> Error {
    Error::MissingBindingField {
        channel: channel.name.clone(),
        field,
    }
}
