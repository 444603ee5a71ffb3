//! HTTP client for the remote database proxy.
//!
//! The proxy accepts `{"sql": "...", "params": [...]}` and answers with
//! `{"rows": [...]}`. Authentication is a shared-secret header. The client
//! is constructed explicitly from [`ProxyConfig`] and passed by handle; it
//! holds no process-global state.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::client::{QueryExecutor, Row};
use crate::error::{DbError, DbResult};
use crate::sql::Fragment;
use crate::value::SqlValue;

/// Header carrying the shared secret on every proxy request.
pub const PROXY_SECRET_HEADER: &str = "x-proxy-secret";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the database proxy.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Endpoint that accepts query requests.
    pub url: Url,
    /// Shared secret sent with every request.
    pub secret: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ProxyConfig {
    /// Read the proxy configuration from the environment.
    ///
    /// `DATABASE_PROXY_URL` and `DATABASE_PROXY_SECRET` are required;
    /// `LEANBUILD_HTTP_TIMEOUT_SECS` defaults to 30.
    pub fn from_env() -> DbResult<Self> {
        let url = std::env::var("DATABASE_PROXY_URL")
            .map_err(|_| DbError::config("DATABASE_PROXY_URL is not set"))?;
        let url = Url::parse(&url)
            .map_err(|e| DbError::config(format!("DATABASE_PROXY_URL is not a valid URL: {e}")))?;
        let secret = std::env::var("DATABASE_PROXY_SECRET")
            .map_err(|_| DbError::config("DATABASE_PROXY_SECRET is not set"))?;
        let timeout = match std::env::var("LEANBUILD_HTTP_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    DbError::config(format!(
                        "LEANBUILD_HTTP_TIMEOUT_SECS must be an integer, got {raw:?}"
                    ))
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            url,
            secret,
            timeout,
        })
    }
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    sql: &'a str,
    params: &'a [SqlValue],
}

#[derive(Deserialize)]
struct QueryResponse {
    rows: Vec<Row>,
}

/// Production [`QueryExecutor`] backed by the HTTP proxy.
pub struct ProxyClient {
    http: reqwest::Client,
    url: Url,
    secret: String,
    timeout: Duration,
}

impl ProxyClient {
    /// Build a client from configuration.
    pub fn new(config: ProxyConfig) -> DbResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DbError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            url: config.url,
            secret: config.secret,
            timeout: config.timeout,
        })
    }
}

#[async_trait]
impl QueryExecutor for ProxyClient {
    async fn query(&self, fragment: Fragment) -> DbResult<Vec<Row>> {
        debug!(
            sql = fragment.text(),
            params = fragment.params().len(),
            "sending statement to database proxy"
        );

        let request = QueryRequest {
            sql: fragment.text(),
            params: fragment.params(),
        };

        let response = self
            .http
            .post(self.url.clone())
            .header(PROXY_SECRET_HEADER, self.secret.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    DbError::Timeout(self.timeout)
                } else {
                    DbError::Transport(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "database proxy returned an error");
            return Err(DbError::Proxy {
                status: status.as_u16(),
                message,
            });
        }

        let decoded: QueryResponse = response
            .json()
            .await
            .map_err(|err| DbError::decode(err.to_string()))?;
        Ok(decoded.rows)
    }
}
