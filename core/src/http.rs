//! HTTP request and response types described as plain data.
//!
//! # Design
//! `HttpRequest` is the descriptor for one call: it is produced by
//! `request::build_request`, handed to the transport, and dropped. Headers and
//! query parameters are ordered `Vec`s rather than maps because both order and
//! repeated keys are meaningful on the wire.
//!
//! All fields use owned types (`String`, `Vec`) so values can be kept on the
//! `Client` after the transport's borrowed buffers are gone.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use ureq::http;

use crate::error::ClientError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    /// The method token as it appears on the request line.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            other => Err(ClientError::Build(format!("unsupported method: {other}"))),
        }
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Post => http::Method::POST,
            HttpMethod::Put => http::Method::PUT,
            HttpMethod::Delete => http::Method::DELETE,
            HttpMethod::Patch => http::Method::PATCH,
            HttpMethod::Head => http::Method::HEAD,
            HttpMethod::Options => http::Method::OPTIONS,
        }
    }
}

/// A single request header. Repeated keys are sent as repeated headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A single query parameter. Repeated keys are sent as repeated pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub key: String,
    pub value: String,
}

impl Query {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An HTTP request described as plain data.
///
/// `url` already carries the encoded query string and `headers` already ends
/// with the default `User-Agent`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<Header>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Convert into an `http::Request` with a unit body. The caller attaches
    /// the real body with `Request::map` so requests without one are sent
    /// without a `Content-Length`.
    pub fn to_http(&self) -> Result<http::Request<()>, ClientError> {
        let mut builder = http::Request::builder()
            .method(http::Method::from(self.method))
            .uri(self.url.as_str());
        for header in &self.headers {
            builder = builder.header(header.key.as_str(), header.value.as_str());
        }
        builder
            .body(())
            .map_err(|e| ClientError::Build(e.to_string()))
    }
}

/// A completed response described as plain data.
///
/// `headers` maps each lower-cased header name to all of its values joined
/// by a single space, in the order the server sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// Flatten a header map into `name -> "v1 v2 ..."`.
pub(crate) fn join_headers(headers: &http::HeaderMap) -> HashMap<String, String> {
    let mut joined: HashMap<String, String> = HashMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        joined
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push(' ');
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }
    joined
}
