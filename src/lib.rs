// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # biliapi - Async bilibili web API client
//!
//! Cookie-authenticated requests to the bilibili web API with CSRF token
//! handling, proxy support, and decoding of the standard
//! `{code, message, data/result}` response envelope.
//!
//! ## Features
//!
//! - Cookie auth: `SESSDATA` / `bili_jct` / `DedeUserID` seeding with a
//!   stable per-client `buvid3` device id
//! - CSRF handling: automatic `csrf` + `csrf_token` body fields for
//!   POST/DELETE/PATCH, hard failure when the token is missing
//! - Envelope decoding: `code == 0` unwraps `data` (or `result`);
//!   nonzero codes surface as typed API errors
//! - Proxy support: host/port with optional basic auth, switchable at
//!   runtime
//! - Web QR-code login: generate a link, poll for the scan, receive a
//!   [`Credential`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use biliapi::{ApiClient, ApiRequest, Credential};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credential = Credential::new()
//!         .sessdata("your-sessdata")
//!         .bili_jct("your-csrf-token");
//!
//!     let client = ApiClient::new();
//!     let request = ApiRequest::get("https://api.bilibili.com/x/web-interface/nav")?;
//!     let payload = client.execute(&request, &credential).await?;
//!
//!     println!("{payload:?}");
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod credential;
pub mod envelope;
pub mod error;
pub mod login;
pub mod proxy;
pub mod request;
pub mod session;

// Re-exports for convenience

// Client and pipeline
pub use client::ApiClient;
pub use config::{ClientConfig, DEFAULT_COOKIE_DOMAIN, DEFAULT_REFERER, DEFAULT_USER_AGENT};
pub use request::ApiRequest;
pub use session::Session;

// Credentials and proxy
pub use credential::Credential;
pub use proxy::ProxyConfig;

// Envelope
pub use envelope::{Envelope, DEFAULT_ERROR_MESSAGE};

// Errors
pub use error::{Error, Result};

// Login
pub use login::{QrLogin, QrLoginState};

/// biliapi version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
