// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Proxy configuration

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// HTTP proxy configuration
///
/// Immutable value object; a client holds at most one active proxy at a
/// time, applied to every session rebuild until changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Proxy host
    pub host: String,
    /// Proxy port
    pub port: u16,
    /// Basic auth username
    pub username: Option<String>,
    /// Basic auth password
    pub password: Option<String>,
}

impl ProxyConfig {
    /// Create a new proxy configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            username: None,
            password: None,
        }
    }

    /// Set basic auth credentials
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Proxy URL in `http://host:port` form
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Translate into a reqwest proxy
    pub(crate) fn to_reqwest(&self) -> Result<reqwest::Proxy> {
        let mut proxy = reqwest::Proxy::all(self.url())
            .map_err(|e| Error::config(format!("invalid proxy {}: {}", self.url(), e)))?;
        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            proxy = proxy.basic_auth(username, password);
        }
        Ok(proxy)
    }
}
