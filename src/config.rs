// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Client configuration

use std::time::Duration;

use crate::proxy::ProxyConfig;

/// Default user agent string sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Default referer header sent with every request
pub const DEFAULT_REFERER: &str = "https://www.bilibili.com";

/// Default domain the auth cookies are scoped to
pub const DEFAULT_COOKIE_DOMAIN: &str = ".bilibili.com";

/// API client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Referer header value
    pub referer: String,
    /// Domain the credential cookies are scoped to
    pub cookie_domain: String,
    /// Request timeout
    pub timeout: Duration,
    /// Initial proxy, if any
    pub proxy: Option<ProxyConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            cookie_domain: DEFAULT_COOKIE_DOMAIN.to_string(),
            timeout: Duration::from_secs(30),
            proxy: None,
        }
    }
}

impl ClientConfig {
    /// Create a new client config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set referer
    pub fn referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = referer.into();
        self
    }

    /// Set cookie domain
    pub fn cookie_domain(mut self, cookie_domain: impl Into<String>) -> Self {
        self.cookie_domain = cookie_domain.into();
        self
    }

    /// Set request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set initial proxy
    pub fn proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }
}
