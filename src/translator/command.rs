//! tmctl command model

use std::fmt;

/// Polling interval used for every generated HTTP poller source
pub const HTTP_POLLER_INTERVAL: &str = "10s";

/// CloudEvent type emitted by generated HTTP poller sources
pub const HTTP_POLLER_EVENT_TYPE: &str = "io.triggermesh.httppoller.event";

/// A single tmctl invocation, without the program name
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `create broker <name>`
    CreateBroker { name: String },

    /// `create source kafka ...`
    KafkaSource {
        name: String,
        topic: String,
        bootstrap_servers: String,
        group_id: String,
    },

    /// `create source httppoller ...`
    HttpPollerSource {
        name: String,
        method: String,
        endpoint: String,
        interval: String,
        event_type: String,
    },

    /// `create source googlecloudpubsub ...`
    GooglePubSubSource {
        name: String,
        topic: String,
        service_account_key: String,
    },
}

impl Command {
    pub fn create_broker(name: &str) -> Self {
        Command::CreateBroker {
            name: name.to_string(),
        }
    }

    pub fn kafka_source(channel: &str, bootstrap_servers: &str) -> Self {
        Command::KafkaSource {
            name: format!("{}-kafkasource", channel),
            topic: channel.to_string(),
            bootstrap_servers: bootstrap_servers.to_string(),
            group_id: format!("{}-group", channel),
        }
    }

    /// The source name only keeps ASCII alphanumerics of the channel name,
    /// while the endpoint is built from the channel name as declared.
    pub fn http_poller_source(channel: &str, base_url: &str, method: &str) -> Self {
        Command::HttpPollerSource {
            name: format!("{}-httppollersource", alphanumeric(channel)),
            method: method.to_string(),
            endpoint: format!("{}{}", base_url, channel),
            interval: HTTP_POLLER_INTERVAL.to_string(),
            event_type: HTTP_POLLER_EVENT_TYPE.to_string(),
        }
    }

    pub fn google_pubsub_source(channel: &str, topic: &str, service_account_key: &str) -> Self {
        Command::GooglePubSubSource {
            name: format!("{}-pubsubsource", channel),
            topic: topic.to_string(),
            service_account_key: service_account_key.to_string(),
        }
    }

    /// Logical name of the broker or source created by this command
    pub fn name(&self) -> &str {
        match self {
            Command::CreateBroker { name }
            | Command::KafkaSource { name, .. }
            | Command::HttpPollerSource { name, .. }
            | Command::GooglePubSubSource { name, .. } => name,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::CreateBroker { name } => write!(f, "create broker {}", name),
            Command::KafkaSource {
                name,
                topic,
                bootstrap_servers,
                group_id,
            } => write!(
                f,
                "create source kafka --name {} --topic {} --bootstrapServers {} --groupID {}",
                name, topic, bootstrap_servers, group_id
            ),
            Command::HttpPollerSource {
                name,
                method,
                endpoint,
                interval,
                event_type,
            } => write!(
                f,
                "create source httppoller --name {} --method {} --endpoint {} --interval {} --eventType {}",
                name, method, endpoint, interval, event_type
            ),
            Command::GooglePubSubSource {
                name,
                topic,
                service_account_key,
            } => write!(
                f,
                "create source googlecloudpubsub --name {} --topic {} --serviceAccountKey {}",
                name, topic, service_account_key
            ),
        }
    }
}

/// Strip every character that is not an ASCII letter or digit
pub fn alphanumeric(name: &str) -> String {
    name.chars().filter(char::is_ascii_alphanumeric).collect()
}
