//! Backend access: the `Backend` seam and its HTTP implementation.

use crate::api::error::{RemoteError, classify_response};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::resource::{Resource, UpdateMethod};
use crate::models::row::{EditableRow, RowId};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::ACCEPT;
use serde_json::{Map, Value};
use std::time::Duration;

/// One update call: `PUT|PATCH <resource>/<id>` with a JSON object body.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    pub resource: Resource,
    pub row_id: RowId,
    pub method: UpdateMethod,
    pub payload: Map<String, Value>,
}

/// What the console needs from a backend. Both calls return the raw JSON
/// body; envelopes are unwrapped by the caller.
pub trait Backend {
    fn fetch_all(&self, resource: Resource) -> Result<Value, RemoteError>;

    fn update(&self, request: &UpdateRequest) -> Result<Value, RemoteError>;
}

/// Fetch a resource and unwrap its list envelope into rows.
pub fn fetch_rows<B: Backend + ?Sized>(
    backend: &B,
    resource: Resource,
) -> Result<Vec<EditableRow>, RemoteError> {
    let body = backend.fetch_all(resource)?;
    resource.list_envelope().unwrap_list(body)
}

pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Self::new(
            &cfg.api_base_url,
            cfg.api_token.clone(),
            Duration::from_secs(cfg.timeout_secs),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn send(&self, builder: RequestBuilder) -> Result<Value, RemoteError> {
        let mut builder = builder.header(ACCEPT, "application/json");
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().map_err(|e| {
            if e.is_timeout() {
                RemoteError::Network("request timed out".into())
            } else {
                RemoteError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        log::debug!("HTTP {status}, {} bytes", body.len());
        classify_response(status, &body)
    }
}

impl Backend for HttpBackend {
    fn fetch_all(&self, resource: Resource) -> Result<Value, RemoteError> {
        let url = self.url(resource.path());
        log::debug!("GET {url}");
        self.send(self.client.get(&url))
    }

    fn update(&self, request: &UpdateRequest) -> Result<Value, RemoteError> {
        let url = self.url(&format!("{}/{}", request.resource.path(), request.row_id));
        let builder = match request.method {
            UpdateMethod::Put => self.client.put(&url),
            UpdateMethod::Patch => self.client.patch(&url),
        };
        log::debug!("{:?} {url} {:?}", request.method, request.payload);
        self.send(builder.json(&request.payload))
    }
}
