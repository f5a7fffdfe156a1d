// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP session construction
//!
//! A session is a reqwest client bound to a shared cookie jar. The jar is
//! seeded from the credential's cookie mapping plus the client's device
//! identifier, all scoped to the configured API domain.

use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, REFERER, USER_AGENT};
use url::Url;

use crate::config::ClientConfig;
use crate::credential::{Credential, BUVID3};
use crate::error::{Error, Result};
use crate::proxy::ProxyConfig;

/// HTTP session: reqwest client plus shared cookie jar
#[derive(Clone)]
pub struct Session {
    http: reqwest::Client,
    jar: Arc<Jar>,
}

impl Session {
    /// Build a session for one credential
    ///
    /// Always constructs a fresh client and jar; nothing is reused from a
    /// previous session.
    pub(crate) fn build(
        config: &ClientConfig,
        credential: &Credential,
        device_id: &str,
        proxy: Option<&ProxyConfig>,
    ) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let scope = cookie_scope(&config.cookie_domain)?;

        for (name, value) in credential.cookies() {
            seed_cookie(&jar, &config.cookie_domain, &scope, &name, &value);
        }
        seed_cookie(&jar, &config.cookie_domain, &scope, BUVID3, device_id);

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| Error::config(format!("invalid user agent: {e}")))?,
        );
        headers.insert(
            REFERER,
            HeaderValue::from_str(&config.referer)
                .map_err(|e| Error::config(format!("invalid referer: {e}")))?,
        );

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .cookie_provider(jar.clone());

        if let Some(proxy) = proxy {
            builder = builder.proxy(proxy.to_reqwest()?);
        }

        tracing::debug!(
            domain = %config.cookie_domain,
            proxied = proxy.is_some(),
            "building API session"
        );

        Ok(Self {
            http: builder.build()?,
            jar,
        })
    }

    /// The underlying reqwest client
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The shared cookie jar
    pub fn cookie_jar(&self) -> &Arc<Jar> {
        &self.jar
    }
}

/// URL inside the cookie domain, used to anchor seeded cookies
fn cookie_scope(domain: &str) -> Result<Url> {
    let host = domain.trim_start_matches('.');
    Ok(Url::parse(&format!("https://www.{host}/"))?)
}

fn seed_cookie(jar: &Jar, domain: &str, scope: &Url, name: &str, value: &str) {
    let cookie = format!("{name}={value}; Domain={domain}; Path=/");
    jar.add_cookie_str(&cookie, scope);
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::cookie::CookieStore;

    #[test]
    fn test_jar_seeded_with_credential() {
        let config = ClientConfig::default();
        let credential = Credential::new().sessdata("sess").bili_jct("token");
        let session = Session::build(&config, &credential, "device-1", None).unwrap();

        let url = Url::parse("https://api.bilibili.com/x/web-interface/nav").unwrap();
        let header = session.cookie_jar().cookies(&url).unwrap();
        let cookies = header.to_str().unwrap();

        assert!(cookies.contains("SESSDATA=sess"));
        assert!(cookies.contains("bili_jct=token"));
        assert!(cookies.contains("buvid3=device-1"));
    }

    #[test]
    fn test_anonymous_session_still_has_device_id() {
        let config = ClientConfig::default();
        let session =
            Session::build(&config, &Credential::new(), "device-2", None).unwrap();

        let url = Url::parse("https://www.bilibili.com/").unwrap();
        let header = session.cookie_jar().cookies(&url).unwrap();
        assert_eq!(header.to_str().unwrap(), "buvid3=device-2");
    }

    #[test]
    fn test_proxied_session_builds() {
        let config = ClientConfig::default();
        let proxy = ProxyConfig::new("127.0.0.1", 8080).basic_auth("u", "p");
        let session = Session::build(&config, &Credential::new(), "device-3", Some(&proxy));
        assert!(session.is_ok());
    }

    #[test]
    fn test_cookie_scope_url() {
        let scope = cookie_scope(".bilibili.com").unwrap();
        assert_eq!(scope.as_str(), "https://www.bilibili.com/");
    }
}
