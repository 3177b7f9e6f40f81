use serde_json::Value;
use tracing::{error, instrument};

use crate::config::ArrayConfig;
use crate::errors::{ArrayError, Result};
use crate::session::ArraySession;
use crate::types::{SnapshotRecord, VolumeRecord};

/// Client for the array management API
///
/// Every operation opens its own [`ArraySession`] and logs in from
/// scratch; nothing is shared between calls, so one client can be used
/// from several tasks at once.
///
/// Two flavours of each query are provided:
/// - `alerts`, `volumes`, `snapshots` return a [`Result`] carrying the
///   failure cause.
/// - `get_alerts`, `get_volumes`, `get_snapshots` never fail. Errors are
///   logged and turned into `None` or an empty list.
///
/// # Example
///
/// ```rust,no_run
/// use pure_array_api::{ArrayClient, ArrayConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ArrayClient::new(ArrayConfig::new("array01", "api-token")?);
///
///     for volume in client.volumes().await? {
///         println!("{volume}");
///     }
///
///     // Fail-soft: an empty list if anything went wrong
///     let snapshots = client.get_snapshots().await;
///     println!("{} snapshots", snapshots.len());
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct ArrayClient {
    config: ArrayConfig,
}

impl ArrayClient {
    /// Create a new client from its connection settings
    pub fn new(config: ArrayConfig) -> Self {
        Self { config }
    }

    /// Get the connection settings
    pub fn config(&self) -> &ArrayConfig {
        &self.config
    }

    /// Open a new session and log in with the configured API token
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The HTTP client cannot be built
    /// - The login request fails (connection refused, timeout)
    /// - The array answers with anything but HTTP 200
    #[instrument(
        name = "ArrayClient::login",
        skip_all,
        fields(array = %self.config.base_url())
    )]
    pub async fn login(&self) -> Result<ArraySession> {
        let mut session = ArraySession::open(&self.config)?;
        session.authenticate(self.config.api_token()).await?;
        Ok(session)
    }

    /// Open a new session and log in, never failing
    ///
    /// Returns the session together with the login outcome. The session is
    /// handed back even when the login failed (it is then unauthenticated);
    /// it is `None` only if the HTTP client could not be built. Failures
    /// are logged.
    #[instrument(
        name = "ArrayClient::authenticate",
        skip_all,
        fields(array = %self.config.base_url())
    )]
    pub async fn authenticate(&self) -> (Option<ArraySession>, bool) {
        let mut session = match ArraySession::open(&self.config) {
            Ok(session) => session,
            Err(err) => {
                log_failure("log in", &err);
                return (None, false);
            }
        };

        match session.authenticate(self.config.api_token()).await {
            Ok(()) => (Some(session), true),
            Err(err) => {
                log_failure("log in", &err);
                (Some(session), false)
            }
        }
    }

    /// Log in and fetch the open, recent alerts as raw JSON
    #[instrument(
        name = "ArrayClient::alerts",
        skip_all,
        fields(array = %self.config.base_url())
    )]
    pub async fn alerts(&self) -> Result<Value> {
        self.login().await?.open_alerts().await
    }

    /// Log in and list the volumes
    #[instrument(
        name = "ArrayClient::volumes",
        skip_all,
        fields(array = %self.config.base_url())
    )]
    pub async fn volumes(&self) -> Result<Vec<VolumeRecord>> {
        self.login().await?.volumes().await
    }

    /// Log in and list the snapshots
    #[instrument(
        name = "ArrayClient::snapshots",
        skip_all,
        fields(array = %self.config.base_url())
    )]
    pub async fn snapshots(&self) -> Result<Vec<SnapshotRecord>> {
        self.login().await?.snapshots().await
    }

    /// Fetch the open alerts, returning `None` on any failure
    pub async fn get_alerts(&self) -> Option<Value> {
        match self.alerts().await {
            Ok(messages) => Some(messages),
            Err(err) => {
                log_failure("retrieve messages", &err);
                None
            }
        }
    }

    /// List the volumes, returning an empty list on any failure
    pub async fn get_volumes(&self) -> Vec<VolumeRecord> {
        self.volumes().await.unwrap_or_else(|err| {
            log_failure("retrieve volumes", &err);
            Vec::new()
        })
    }

    /// List the snapshots, returning an empty list on any failure
    pub async fn get_snapshots(&self) -> Vec<SnapshotRecord> {
        self.snapshots().await.unwrap_or_else(|err| {
            log_failure("retrieve snapshots", &err);
            Vec::new()
        })
    }
}

fn log_failure(operation: &str, err: &ArrayError) {
    match err {
        ArrayError::Authentication { status, message } | ArrayError::Api { status, message } => {
            error!(status = *status, response = %message, "Failed to {operation}");
        }
        _ => {
            error!(error = %err, details = ?err, "Failed to {operation}");
        }
    }
}
