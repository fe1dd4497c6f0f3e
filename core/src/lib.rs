//! Small convenience layer over a blocking HTTP transport.
//!
//! # Overview
//! `Client` builds a request from a method, URL, query parameters, headers
//! and an optional body, sends it through a pooled `ureq` agent, and keeps the
//! status code, body text, response headers and an optional debug trace of the
//! exchange. JSON helpers decode the stored body into a map or a typed value.
//!
//! # Design
//! - `request` builds the plain-data `HttpRequest` and does no I/O, so query
//!   encoding and header injection are testable without a server.
//! - `client` is the only module that talks to the network.
//! - The library emits `tracing` events and never installs a subscriber.
//!
//! ```no_run
//! use fetch_core::{Client, Config, Header, Query};
//!
//! let mut client = Client::new(Config::default().with_debug(true));
//! let result = client.get(
//!     "https://httpbin.org/get",
//!     &[Query::new("name", "John Doe")],
//!     &[Header::new("Accept", "application/json")],
//! );
//! if let Err(err) = result {
//!     eprintln!("request failed: {err}");
//!     return;
//! }
//! println!("{}", client.debug_info());
//! let body = client.response_to_map().unwrap_or_default();
//! println!("{body:?}");
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod request;
pub mod trace;

pub use client::Client;
pub use config::Config;
pub use error::ClientError;
pub use http::{Header, HttpMethod, HttpRequest, HttpResponse, Query};
pub use request::{build_request, query_string, USER_AGENT};
