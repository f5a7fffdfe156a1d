// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! JSON response envelope decoding
//!
//! Every API endpoint wraps its payload in
//! `{ "code": <int>, "message"?: <string>, "data"?: <any>, "result"?: <any> }`.
//! `code == 0` is success; the payload is `data` if present, else `result`.
//! A response without a content-type header is an empty success, not an
//! error.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Placeholder message for API errors whose envelope carries none
pub const DEFAULT_ERROR_MESSAGE: &str = "no error message provided";

/// Raw response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Status code; zero denotes success
    #[serde(default)]
    pub code: Option<i64>,
    /// Error message for nonzero codes
    #[serde(default)]
    pub message: Option<String>,
    /// Primary payload field
    #[serde(default)]
    pub data: Option<Value>,
    /// Fallback payload field
    #[serde(default)]
    pub result: Option<Value>,
}

impl Envelope {
    /// Unwrap the envelope into its payload
    ///
    /// Nonzero codes become [`Error::Api`]; a zero code yields `data` if
    /// present, else `result`, else `None`.
    pub fn into_payload(self) -> Result<Option<Value>> {
        match self.code {
            None => Err(Error::protocol("response missing status code field")),
            Some(0) => Ok(self.data.or(self.result)),
            Some(code) => Err(Error::api(
                code,
                self.message
                    .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
            )),
        }
    }
}

/// Decode a response body into the unwrapped payload
///
/// `content_type` is the raw header value, if the response carried one.
pub fn decode(content_type: Option<&str>, body: &[u8]) -> Result<Option<Value>> {
    let Some(envelope) = parse(content_type, body)? else {
        return Ok(None);
    };
    envelope.into_payload()
}

/// Decode a response body into the whole envelope as a JSON value
///
/// Skips the success/payload unwrapping; callers get `code`, `message`
/// and payload fields verbatim.
pub fn decode_raw(content_type: Option<&str>, body: &[u8]) -> Result<Option<Value>> {
    let Some(content_type) = content_type else {
        return Ok(None);
    };
    if !is_json(content_type) {
        return Err(Error::protocol("response is not JSON"));
    }
    let value = serde_json::from_slice(body)
        .map_err(|e| Error::protocol(format!("malformed envelope: {e}")))?;
    Ok(Some(value))
}

fn parse(content_type: Option<&str>, body: &[u8]) -> Result<Option<Envelope>> {
    let Some(content_type) = content_type else {
        return Ok(None);
    };
    if !is_json(content_type) {
        return Err(Error::protocol("response is not JSON"));
    }
    let envelope = serde_json::from_slice(body)
        .map_err(|e| Error::protocol(format!("malformed envelope: {e}")))?;
    Ok(Some(envelope))
}

/// Check if a content-type header denotes JSON, ignoring parameters such
/// as `; charset=utf-8`
fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}
