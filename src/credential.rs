// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Login credential and its cookie mapping
//!
//! A credential bundles the three auth cookies bilibili issues at login:
//! - `SESSDATA`: the session token
//! - `bili_jct`: the CSRF token, required for state-changing requests
//! - `DedeUserID`: the numeric user id

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Session token cookie name
pub const SESSDATA: &str = "SESSDATA";
/// CSRF token cookie name
pub const BILI_JCT: &str = "bili_jct";
/// User id cookie name
pub const DEDE_USER_ID: &str = "DedeUserID";
/// Device identifier cookie name
pub const BUVID3: &str = "buvid3";

/// Login credential for authenticated API calls
///
/// All fields are optional; an empty credential issues anonymous requests.
/// Immutable once constructed - build with the setter chain and pass by
/// reference into each request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Session token (`SESSDATA` cookie)
    pub sessdata: Option<String>,
    /// CSRF token (`bili_jct` cookie)
    pub bili_jct: Option<String>,
    /// User id (`DedeUserID` cookie)
    pub dedeuserid: Option<String>,
}

impl Credential {
    /// Create a new empty credential
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session token
    pub fn sessdata(mut self, sessdata: impl Into<String>) -> Self {
        self.sessdata = Some(sessdata.into());
        self
    }

    /// Set the CSRF token
    pub fn bili_jct(mut self, bili_jct: impl Into<String>) -> Self {
        self.bili_jct = Some(bili_jct.into());
        self
    }

    /// Set the user id
    pub fn dedeuserid(mut self, dedeuserid: impl Into<String>) -> Self {
        self.dedeuserid = Some(dedeuserid.into());
        self
    }

    /// Cookie mapping derived from the non-null fields
    ///
    /// Up to three entries: `SESSDATA`, `bili_jct`, `DedeUserID`.
    pub fn cookies(&self) -> HashMap<String, String> {
        let mut cookies = HashMap::new();
        if let Some(sessdata) = &self.sessdata {
            cookies.insert(SESSDATA.to_string(), sessdata.clone());
        }
        if let Some(bili_jct) = &self.bili_jct {
            cookies.insert(BILI_JCT.to_string(), bili_jct.clone());
        }
        if let Some(dedeuserid) = &self.dedeuserid {
            cookies.insert(DEDE_USER_ID.to_string(), dedeuserid.clone());
        }
        cookies
    }

    /// Check if a CSRF-capable token is present
    pub fn has_csrf(&self) -> bool {
        self.bili_jct.is_some()
    }

    /// Get the CSRF token, failing if absent
    pub fn csrf_token(&self) -> Result<&str> {
        self.bili_jct
            .as_deref()
            .ok_or_else(|| Error::auth("missing CSRF token"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_mapping() {
        let credential = Credential::new()
            .sessdata("sess")
            .bili_jct("token")
            .dedeuserid("12345");

        let cookies = credential.cookies();
        assert_eq!(cookies.len(), 3);
        assert_eq!(cookies.get(SESSDATA).map(String::as_str), Some("sess"));
        assert_eq!(cookies.get(BILI_JCT).map(String::as_str), Some("token"));
        assert_eq!(cookies.get(DEDE_USER_ID).map(String::as_str), Some("12345"));
    }

    #[test]
    fn test_partial_cookie_mapping() {
        let credential = Credential::new().sessdata("sess");

        let cookies = credential.cookies();
        assert_eq!(cookies.len(), 1);
        assert!(!cookies.contains_key(BILI_JCT));
    }

    #[test]
    fn test_csrf_check() {
        let anonymous = Credential::new();
        assert!(!anonymous.has_csrf());
        assert!(anonymous.csrf_token().unwrap_err().is_auth());

        let credential = Credential::new().bili_jct("token");
        assert!(credential.has_csrf());
        assert_eq!(credential.csrf_token().unwrap(), "token");
    }
}
