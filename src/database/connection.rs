use std::future::Future;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use mongodb::Client;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use tokio::task::JoinHandle;
use tracing::instrument::WithSubscriber;
use tracing::{error, info, warn};

static CLIENT: OnceLock<Client> = OnceLock::new();

/// Opens a connection and hands back a client that has proven reachable
pub(crate) trait Connector: Send + Sync + 'static {
    fn connect(&self, url: &str) -> impl Future<Output = Result<Client>> + Send;
}

/// Production connector backed by the mongodb driver
pub(crate) struct MongoConnector;

impl Connector for MongoConnector {
    async fn connect(&self, url: &str) -> Result<Client> {
        let options = ClientOptions::parse(url)
            .await
            .context("invalid MongoDB connection string")?;
        let client = Client::with_options(options).context("failed to build MongoDB client")?;

        // The driver connects lazily; a ping forces server selection now
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .context("MongoDB did not answer ping")?;

        Ok(client)
    }
}

/// The process-wide client, once [`connect_db`] has succeeded
pub fn client() -> Option<&'static Client> {
    CLIENT.get()
}

/// Start the one-shot connection attempt on the current tokio runtime.
///
/// Returns immediately. Success or failure only shows up in the log; the
/// handle resolves to `()` either way.
pub fn connect_db(url: impl Into<String>) -> JoinHandle<()> {
    spawn_connect(MongoConnector, url.into(), &CLIENT)
}

fn spawn_connect<C: Connector>(
    connector: C,
    url: String,
    slot: &'static OnceLock<Client>,
) -> JoinHandle<()> {
    let attempt = async move {
        let target = redact_url(&url);
        info!(url = %target, "Connecting to MongoDB");
        match connector.connect(&url).await {
            Ok(client) => {
                info!(url = %target, "Connected to MongoDB");
                if slot.set(client).is_err() {
                    warn!(url = %target, "MongoDB client already initialised, keeping the existing handle");
                }
            }
            Err(err) => error!(url = %target, error = %format!("{err:#}"), "Failed to connect to MongoDB"),
        }
    };
    tokio::spawn(attempt.with_current_subscriber())
}

/// Strip `user:password@` from a connection string so it can be logged.
/// Works with or without a `scheme://` prefix.
pub fn redact_url(url: &str) -> String {
    let authority_start = url.find("://").map_or(0, |i| i + 3);
    let authority_end = url[authority_start..]
        .find(['/', '?'])
        .map_or(url.len(), |i| authority_start + i);

    match url[authority_start..authority_end].rfind('@') {
        Some(at) => format!(
            "{}***@{}",
            &url[..authority_start],
            &url[authority_start + at + 1..]
        ),
        None => url.to_string(),
    }
}
