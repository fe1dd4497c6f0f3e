//! Human-readable dump of one request/response exchange.
//!
//! Both sections are rendered the way the messages look on an HTTP/1.1 wire:
//! start line, headers, blank line, body, with CRLF line endings.

use ureq::http::{HeaderMap, StatusCode};
use url::Url;

use crate::http::HttpRequest;

const BANNER: &str = "API Debug Info\n===============\n\n";
const CLIENT_SIDE: &str = "Client Side\n============\n";
const SERVER_SIDE: &str = "Server Side\n============\n";

/// Render the full trace for a completed exchange.
pub fn format_exchange(
    request: &HttpRequest,
    status: StatusCode,
    headers: &HeaderMap,
    body: &str,
) -> String {
    let mut out = String::from(BANNER);
    out.push_str(CLIENT_SIDE);
    out.push_str(&format_request(request));
    out.push_str(SERVER_SIDE);
    out.push_str(&format_response(status, headers, body));
    out
}

/// `METHOD /path?query HTTP/1.1`, `Host`, caller headers, then the body.
pub fn format_request(request: &HttpRequest) -> String {
    let (target, host) = match Url::parse(&request.url) {
        Ok(url) => {
            let mut target = url.path().to_string();
            if let Some(query) = url.query() {
                target.push('?');
                target.push_str(query);
            }
            let mut host = url.host_str().unwrap_or_default().to_string();
            if let Some(port) = url.port() {
                host.push_str(&format!(":{port}"));
            }
            (target, host)
        }
        Err(_) => (request.url.clone(), String::new()),
    };

    let mut out = format!("{} {target} HTTP/1.1\r\n", request.method);
    out.push_str(&format!("Host: {host}\r\n"));
    for header in &request.headers {
        out.push_str(&format!("{}: {}\r\n", header.key, header.value));
    }
    out.push_str("\r\n");
    if let Some(body) = &request.body {
        out.push_str(body);
    }
    out.push('\n');
    out
}

/// `HTTP/1.1 <code> <reason>`, response headers, then the body.
pub fn format_response(status: StatusCode, headers: &HeaderMap, body: &str) -> String {
    let mut out = format!(
        "HTTP/1.1 {} {}\r\n",
        status.as_u16(),
        status.canonical_reason().unwrap_or_default()
    );
    for (name, value) in headers {
        out.push_str(&format!(
            "{}: {}\r\n",
            name,
            String::from_utf8_lossy(value.as_bytes())
        ));
    }
    out.push_str("\r\n");
    out.push_str(body);
    out.push('\n');
    out
}
