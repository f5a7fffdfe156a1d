// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! API client and request pipeline
//!
//! The client owns the active proxy and the current session. Each call
//! rebuilds the session for its credential, injects CSRF fields where the
//! method requires them, dispatches, and decodes the response envelope.

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::credential::Credential;
use crate::envelope;
use crate::error::Result;
use crate::proxy::ProxyConfig;
use crate::request::{takes_csrf_fields, ApiRequest};
use crate::session::Session;

/// Client for authenticated bilibili API calls
///
/// Holds the mutable per-client state the pipeline needs: the active
/// proxy and the most recently built session. The device identifier is
/// generated once at construction and reused for every session rebuild.
pub struct ApiClient {
    config: ClientConfig,
    device_id: String,
    proxy: RwLock<Option<ProxyConfig>>,
    session: RwLock<Option<Session>>,
}

impl ApiClient {
    /// Create a new client with default configuration
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Self {
        let proxy = config.proxy.clone();
        Self {
            config,
            device_id: Uuid::new_v4().to_string(),
            proxy: RwLock::new(proxy),
            session: RwLock::new(None),
        }
    }

    /// Get client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The device identifier seeded as the `buvid3` cookie
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Set the active proxy for all subsequent requests
    pub fn set_proxy(&self, proxy: ProxyConfig) {
        *self.proxy.write() = Some(proxy);
    }

    /// Clear the active proxy
    pub fn clear_proxy(&self) {
        *self.proxy.write() = None;
    }

    /// Get the active proxy, if any
    pub fn proxy(&self) -> Option<ProxyConfig> {
        self.proxy.read().clone()
    }

    /// The session built by the most recent request, if any
    pub fn current_session(&self) -> Option<Session> {
        self.session.read().clone()
    }

    /// Build a session for the credential and replace the stored one
    ///
    /// Rebuilds unconditionally; credential or proxy changes take effect
    /// on the next call because nothing is memoized.
    pub fn ensure_session(
        &self,
        credential: &Credential,
        proxy: Option<&ProxyConfig>,
    ) -> Result<Session> {
        let session = Session::build(&self.config, credential, &self.device_id, proxy)?;
        *self.session.write() = Some(session.clone());
        Ok(session)
    }

    /// Execute a request and unwrap the response envelope
    ///
    /// Returns the `data` field of a successful envelope, falling back to
    /// `result`, or `None` when the response carries no content-type
    /// header or the envelope has no payload.
    pub async fn execute(
        &self,
        request: &ApiRequest,
        credential: &Credential,
    ) -> Result<Option<Value>> {
        let (content_type, body) = self.dispatch(request, credential).await?;
        envelope::decode(content_type.as_deref(), &body)
    }

    /// Execute a request and return the whole envelope undecoded
    ///
    /// For endpoints whose status lives inside the payload rather than in
    /// the outer `code` field.
    pub async fn execute_raw(
        &self,
        request: &ApiRequest,
        credential: &Credential,
    ) -> Result<Option<Value>> {
        let (content_type, body) = self.dispatch(request, credential).await?;
        envelope::decode_raw(content_type.as_deref(), &body)
    }

    /// Execute a request and deserialize the payload into a typed value
    pub async fn execute_into<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        credential: &Credential,
    ) -> Result<T> {
        let payload = self
            .execute(request, credential)
            .await?
            .unwrap_or(Value::Null);
        Ok(serde_json::from_value(payload)?)
    }

    /// Shape the request per the pipeline contract and dispatch it
    async fn dispatch(
        &self,
        request: &ApiRequest,
        credential: &Credential,
    ) -> Result<(Option<String>, Vec<u8>)> {
        let mut request = request.clone();

        if request.method != reqwest::Method::GET && !request.no_csrf {
            credential.csrf_token()?;
        }

        if !request.no_csrf && takes_csrf_fields(&request.method) {
            let token = credential.csrf_token()?.to_string();
            let data = request.data.get_or_insert_with(Default::default);
            data.insert("csrf".to_string(), token.clone());
            data.insert("csrf_token".to_string(), token);
        }

        if request.params.contains_key("jsonp") {
            request
                .params
                .insert("callback".to_string(), "callback".to_string());
        }

        let proxy = self.proxy.read().clone();
        let session = self.ensure_session(credential, proxy.as_ref())?;

        tracing::debug!(
            method = %request.method,
            url = %request.url,
            "dispatching API request"
        );

        let mut builder = session
            .http()
            .request(request.method.clone(), request.url.clone())
            .query(&request.params);
        if let Some(data) = &request.data {
            builder = builder.form(data);
        }

        let response = builder.send().await?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await?;

        Ok((content_type, body.to_vec()))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
