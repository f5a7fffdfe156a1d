// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the biliapi client
//!
//! Three domain errors cover the request pipeline (missing CSRF token,
//! malformed envelope, nonzero API status); the rest wrap transport and
//! construction failures.

use thiserror::Error;

/// Result type alias for biliapi operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for biliapi operations
#[derive(Error, Debug)]
pub enum Error {
    /// Missing required CSRF token
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Response violated the envelope contract
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// API returned a nonzero status code
    #[error("API error {code}: {message}")]
    Api {
        /// Envelope `code` field
        code: i64,
        /// Server-supplied message, or the placeholder when absent
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Client or session construction error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create an authentication error
    pub fn auth<S: Into<String>>(msg: S) -> Self {
        Error::Auth(msg.into())
    }

    /// Create a protocol error
    pub fn protocol<S: Into<String>>(msg: S) -> Self {
        Error::Protocol(msg.into())
    }

    /// Create an API error from an envelope status
    pub fn api(code: i64, message: impl Into<String>) -> Self {
        Error::Api {
            code,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Check if this is an authentication error
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth(_))
    }

    /// Check if this is a protocol error
    pub fn is_protocol(&self) -> bool {
        matches!(self, Error::Protocol(_))
    }

    /// Check if this is an API error
    pub fn is_api(&self) -> bool {
        matches!(self, Error::Api { .. })
    }

    /// Check if this is a transport error
    pub fn is_http(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// Get the API status code if available
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Error::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Get the API message if available
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Error::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}
