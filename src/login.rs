// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Web QR-code login flow
//!
//! Generate a QR link, have the user scan it in the bilibili app, then
//! poll until the login is confirmed. The confirmed poll response carries
//! a URL whose query string holds the credential cookies.
//!
//! QR rendering is left to the caller; this module only exposes the link.

use url::Url;

use crate::client::ApiClient;
use crate::credential::Credential;
use crate::error::{Error, Result};
use crate::request::ApiRequest;

/// QR generation endpoint
pub const QR_GENERATE_URL: &str =
    "https://passport.bilibili.com/x/passport-login/web/qrcode/generate";

/// QR poll endpoint
pub const QR_POLL_URL: &str = "https://passport.bilibili.com/x/passport-login/web/qrcode/poll";

// Inner status codes returned by the poll endpoint.
const CODE_WAITING_SCAN: i64 = 86101;
const CODE_WAITING_CONFIRM: i64 = 86090;
const CODE_EXPIRED: i64 = 86038;

/// QR login progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrLoginState {
    /// QR code not scanned yet
    WaitingScan,
    /// Scanned, waiting for in-app confirmation
    WaitingConfirm,
    /// QR code expired; generate a new one
    Expired,
    /// Login confirmed; credential available
    Done,
}

/// Web QR-code login session
pub struct QrLogin<'a> {
    client: &'a ApiClient,
    generate_url: String,
    poll_url: String,
    qr_url: Option<String>,
    qrcode_key: Option<String>,
    credential: Option<Credential>,
}

impl<'a> QrLogin<'a> {
    /// Create a new QR login session over a client
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            generate_url: QR_GENERATE_URL.to_string(),
            poll_url: QR_POLL_URL.to_string(),
            qr_url: None,
            qrcode_key: None,
            credential: None,
        }
    }

    /// Override passport endpoints (test servers)
    pub fn endpoints(
        mut self,
        generate_url: impl Into<String>,
        poll_url: impl Into<String>,
    ) -> Self {
        self.generate_url = generate_url.into();
        self.poll_url = poll_url.into();
        self
    }

    /// Fetch a fresh QR link and key, returning the link to render
    pub async fn generate(&mut self) -> Result<&str> {
        let request = ApiRequest::get(&self.generate_url)?;
        let payload = self
            .client
            .execute(&request, &Credential::new())
            .await?
            .ok_or_else(|| Error::protocol("QR generate response carried no payload"))?;

        let qr_url = payload["url"]
            .as_str()
            .ok_or_else(|| Error::protocol("QR generate payload missing url"))?
            .to_string();
        let qrcode_key = payload["qrcode_key"]
            .as_str()
            .ok_or_else(|| Error::protocol("QR generate payload missing qrcode_key"))?
            .to_string();

        self.qr_url = Some(qr_url);
        self.qrcode_key = Some(qrcode_key);
        Ok(self.qr_url.as_deref().unwrap_or_default())
    }

    /// Check the login state once
    ///
    /// On [`QrLoginState::Done`] the credential is parsed out of the poll
    /// response and stored; fetch it with [`QrLogin::credential`].
    pub async fn poll(&mut self) -> Result<QrLoginState> {
        let qrcode_key = self
            .qrcode_key
            .as_deref()
            .ok_or_else(|| Error::config("no QR code generated yet"))?;

        let request = ApiRequest::get(&self.poll_url)?.param("qrcode_key", qrcode_key);
        let payload = self
            .client
            .execute(&request, &Credential::new())
            .await?
            .ok_or_else(|| Error::protocol("QR poll response carried no payload"))?;

        let code = payload["code"]
            .as_i64()
            .ok_or_else(|| Error::protocol("QR poll payload missing status code"))?;

        match code {
            CODE_WAITING_SCAN => Ok(QrLoginState::WaitingScan),
            CODE_WAITING_CONFIRM => Ok(QrLoginState::WaitingConfirm),
            CODE_EXPIRED => Ok(QrLoginState::Expired),
            _ => {
                let cred_url = payload["url"]
                    .as_str()
                    .ok_or_else(|| Error::protocol("QR poll payload missing credential url"))?;
                self.credential = Some(credential_from_url(cred_url)?);
                Ok(QrLoginState::Done)
            }
        }
    }

    /// Check if a QR code has been generated
    pub fn has_qrcode(&self) -> bool {
        self.qr_url.is_some()
    }

    /// The QR link to render, if generated
    pub fn qr_url(&self) -> Option<&str> {
        self.qr_url.as_deref()
    }

    /// Check if the login has completed
    pub fn is_done(&self) -> bool {
        self.credential.is_some()
    }

    /// The credential obtained on completion
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }
}

/// Parse the credential cookies out of a passport URL's query string
fn credential_from_url(raw: &str) -> Result<Credential> {
    let url = Url::parse(raw).map_err(|e| Error::protocol(format!("bad credential url: {e}")))?;

    let mut credential = Credential::new();
    for (name, value) in url.query_pairs() {
        if name == "SESSDATA" {
            credential.sessdata = Some(value.into_owned());
        } else if name == "bili_jct" {
            credential.bili_jct = Some(value.into_owned());
        } else if name.eq_ignore_ascii_case("DedeUserID") {
            credential.dedeuserid = Some(value.into_owned());
        }
    }
    Ok(credential)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_from_url() {
        let credential = credential_from_url(
            "https://passport.biligame.com/crossDomain?DedeUserID=42&SESSDATA=abc%2Cdef&bili_jct=tok&gourl=https%3A%2F%2Fwww.bilibili.com",
        )
        .unwrap();

        assert_eq!(credential.dedeuserid.as_deref(), Some("42"));
        assert_eq!(credential.sessdata.as_deref(), Some("abc,def"));
        assert_eq!(credential.bili_jct.as_deref(), Some("tok"));
        assert!(credential.has_csrf());
    }

    #[test]
    fn test_credential_from_url_case_insensitive_userid() {
        let credential =
            credential_from_url("https://example.com/cb?DEDEUSERID=7&SESSDATA=s").unwrap();
        assert_eq!(credential.dedeuserid.as_deref(), Some("7"));
    }

    #[test]
    fn test_credential_from_bad_url() {
        assert!(credential_from_url("not a url").unwrap_err().is_protocol());
    }

    #[test]
    fn test_poll_before_generate() {
        let client = ApiClient::new();
        let mut login = QrLogin::new(&client);
        let err = tokio_test::block_on(login.poll()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
