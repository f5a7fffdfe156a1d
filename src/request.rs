// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! API request descriptor and builder

use std::collections::HashMap;

use reqwest::Method;
use url::Url;

use crate::error::{Error, Result};

/// Logical description of one API call
///
/// Transient value, one per call. The body mapping is sent
/// form-urlencoded; CSRF fields are injected into it by the pipeline for
/// state-changing methods.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Request method (normalized to upper case)
    pub method: Method,
    /// Request URL
    pub url: Url,
    /// Query parameters
    pub params: HashMap<String, String>,
    /// Form body fields, if any
    pub data: Option<HashMap<String, String>>,
    /// Suppress CSRF enforcement and injection
    pub no_csrf: bool,
}

impl ApiRequest {
    /// Create a new request with an arbitrary method
    ///
    /// The method string is upper-cased before parsing, so `"post"` and
    /// `"POST"` are equivalent.
    pub fn new(method: impl AsRef<str>, url: impl AsRef<str>) -> Result<Self> {
        let normalized = method.as_ref().to_ascii_uppercase();
        let method = Method::from_bytes(normalized.as_bytes())
            .map_err(|_| Error::config(format!("invalid HTTP method: {}", method.as_ref())))?;
        Ok(Self {
            method,
            url: Url::parse(url.as_ref())?,
            params: HashMap::new(),
            data: None,
            no_csrf: false,
        })
    }

    /// Create a new GET request
    pub fn get(url: impl AsRef<str>) -> Result<Self> {
        Self::new("GET", url)
    }

    /// Create a new POST request
    pub fn post(url: impl AsRef<str>) -> Result<Self> {
        Self::new("POST", url)
    }

    /// Add a query parameter
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Replace the query parameters
    pub fn params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    /// Add a form body field
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.data
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replace the form body
    pub fn data(mut self, data: HashMap<String, String>) -> Self {
        self.data = Some(data);
        self
    }

    /// Suppress CSRF enforcement and injection for this request
    pub fn no_csrf(mut self, no_csrf: bool) -> Self {
        self.no_csrf = no_csrf;
        self
    }

    /// Get the URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }
}

/// Check if the method belongs to the fixed set that receives CSRF body
/// fields (POST, DELETE, PATCH)
pub(crate) fn takes_csrf_fields(method: &Method) -> bool {
    [Method::POST, Method::DELETE, Method::PATCH].contains(method)
}
