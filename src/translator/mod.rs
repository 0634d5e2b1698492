//! AsyncAPI to tmctl translation
//!
//! The translator turns a [`Document`] into an ordered list of tmctl
//! commands: a broker named after the document title, followed by one source
//! per subscribable channel whose first bound server speaks a protocol tmctl
//! can ingest (`kafka`, `http`, `googlepubsub`).
//!
//! Only the first server listed on a channel is consulted. Channels bound to
//! several servers still produce a single source built from that first one.

mod command;
mod route;

pub use command::*;
pub use route::Route;

use tracing::{debug, info, warn};

use crate::asyncapi::{Channel, Document};
use crate::{Error, Result};

/// Default Pub/Sub credentials file, read by the shell when the script runs
pub const DEFAULT_SERVICE_ACCOUNT_KEY_FILE: &str = "serviceaccountkey.json";

/// Translator settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslatorOptions {
    /// Value passed as `--serviceAccountKey` to Pub/Sub sources
    pub service_account_key: String,
}

impl TranslatorOptions {
    /// Pass the content of `file` as the Pub/Sub service account key
    pub fn with_service_account_key_file(file: &str) -> Self {
        Self {
            service_account_key: format!("$(cat {})", file),
        }
    }
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self::with_service_account_key_file(DEFAULT_SERVICE_ACCOUNT_KEY_FILE)
    }
}

/// Derives tmctl commands from AsyncAPI documents
#[derive(Clone, Debug, Default)]
pub struct Translator {
    options: TranslatorOptions,
}

impl Translator {
    pub fn new(options: TranslatorOptions) -> Self {
        Self { options }
    }

    /// Translate a document into tmctl commands, broker first
    ///
    /// Either every selected channel translates or the whole call fails.
    pub fn translate(&self, document: &Document) -> Result<Vec<Command>> {
        let sources = document
            .channels()
            .iter()
            .filter(|channel| is_selected(channel))
            .map(|channel| self.translate_channel(document, channel))
            .collect::<Result<Vec<_>>>()?;

        let mut commands = Vec::with_capacity(sources.len() + 1);
        commands.push(Command::create_broker(document.title()));
        commands.extend(sources.into_iter().flatten());

        Ok(commands)
    }

    fn translate_channel(&self, document: &Document, channel: &Channel) -> Result<Option<Command>> {
        let server_name = &channel.servers[0];
        let server = document.server(server_name).ok_or_else(|| {
            Error::MalformedDocument(format!(
                "channel '{}' references undeclared server '{}'",
                channel.name, server_name
            ))
        })?;

        let route = Route::resolve(channel, server)?;
        let command = route.command(&channel.name, &self.options.service_account_key);

        match (&command, &route) {
            (Some(command), _) => info!(channel = %channel.name, server = %server.name, "{}", command),
            (None, Route::Unsupported { server: name, protocol }) => warn!(
                "Ignored channel/server pair {}/{}: protocol {} not supported",
                channel.name, name, protocol
            ),
            (None, _) => {}
        }

        Ok(command)
    }
}

/// Translate with default options
pub fn translate(document: &Document) -> Result<Vec<Command>> {
    Translator::default().translate(document)
}

fn is_selected(channel: &Channel) -> bool {
    if !channel.is_subscribable() {
        debug!("Skipping channel {}: no subscribe operation", channel.name);
        return false;
    }
    if !channel.has_servers() {
        debug!("Skipping channel {}: not bound to any server", channel.name);
        return false;
    }
    true
}
