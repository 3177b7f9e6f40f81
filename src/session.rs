use reqwest::{Client, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde_json::Value;
use std::fmt::{self, Debug, Formatter};
use tracing::{debug, instrument};
use url::Url;

use crate::config::ArrayConfig;
use crate::errors::{ArrayError, Result};
use crate::types::{SnapshotRecord, VolumeRecord};

// Relative to the base URL so a path prefix (e.g. behind a proxy) is kept.
const AUTH_SESSION_PATH: &str = "api/1.8/auth/session";
const MESSAGE_PATH: &str = "api/1.8/message";
const VOLUME_PATH: &str = "api/1.8/volume";

/// Short-lived HTTP session against one array
///
/// Each session owns its own HTTP client and cookie store, so the session
/// cookie issued at login is only ever sent by the session that obtained
/// it. Queries on a session whose login failed return
/// [`ArrayError::NotAuthenticated`] without touching the network.
pub struct ArraySession {
    client: ClientWithMiddleware,
    base_url: Url,
    authenticated: bool,
}

impl ArraySession {
    pub(crate) fn open(config: &ArrayConfig) -> Result<Self> {
        let builder = Client::builder()
            .timeout(config.timeout())
            .cookie_store(true);

        // Without a TLS backend only plain http is possible.
        #[cfg(any(feature = "native-tls", feature = "rustls-tls"))]
        let builder = builder.danger_accept_invalid_certs(!config.verifies_tls());

        let client = builder.build().map_err(ArrayError::BuildHttpClient)?;

        let client = ClientBuilder::new(client).build();

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            authenticated: false,
        })
    }

    /// Exchange the API token for a session cookie
    ///
    /// Only HTTP 200 counts as success.
    pub(crate) async fn authenticate(&mut self, api_token: &str) -> Result<()> {
        let url = self.endpoint(AUTH_SESSION_PATH)?;

        debug!(url = %url, "Logging in to array");

        let response = self
            .client
            .post(url)
            .form(&[("api_token", api_token)])
            .send()
            .await
            .map_err(ArrayError::Request)?;

        let status = response.status();
        let body = response.text().await.map_err(ArrayError::ReadBody)?;

        if status != StatusCode::OK {
            return Err(ArrayError::Authentication {
                status: status.as_u16(),
                message: body,
            });
        }

        debug!(response = %body, "Login successful");
        self.authenticated = true;
        Ok(())
    }

    /// Whether the login exchange succeeded
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Base URL of the array this session talks to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the open, recent messages (alerts) as raw JSON
    #[instrument(name = "ArraySession::open_alerts", skip_all)]
    pub async fn open_alerts(&self) -> Result<Value> {
        let body = self
            .get(MESSAGE_PATH, &[("open", "true"), ("recent", "true")])
            .await?;

        let messages = serde_json::from_str(&body).map_err(ArrayError::Decode)?;
        debug!("Retrieved messages");
        Ok(messages)
    }

    /// List volumes that are not pending eradication
    #[instrument(name = "ArraySession::volumes", skip_all)]
    pub async fn volumes(&self) -> Result<Vec<VolumeRecord>> {
        self.list_volumes(&[("pending", "false")]).await
    }

    /// List volume snapshots
    #[instrument(name = "ArraySession::snapshots", skip_all)]
    pub async fn snapshots(&self) -> Result<Vec<SnapshotRecord>> {
        self.list_volumes(&[("snap", "true")]).await
    }

    async fn list_volumes(&self, query: &[(&str, &str)]) -> Result<Vec<VolumeRecord>> {
        let body = self.get(VOLUME_PATH, query).await?;

        // All or nothing: one entry without name/serial fails the whole list.
        let records: Vec<VolumeRecord> =
            serde_json::from_str(&body).map_err(ArrayError::Decode)?;

        debug!(count = records.len(), "Retrieved volume listing");
        Ok(records)
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String> {
        if !self.authenticated {
            return Err(ArrayError::NotAuthenticated);
        }

        let url = self.endpoint(path)?;

        debug!(url = %url, "Querying array");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(ArrayError::Request)?;

        let status = response.status();
        let body = response.text().await.map_err(ArrayError::ReadBody)?;

        if status != StatusCode::OK {
            return Err(ArrayError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        debug!(response = %body, "Query successful");
        Ok(body)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(ArrayError::InvalidUrl)
    }
}

impl Debug for ArraySession {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArraySession")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.authenticated)
            .finish_non_exhaustive()
    }
}
