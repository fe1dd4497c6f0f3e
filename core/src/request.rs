//! Request building: URL validation, query encoding and header injection.
//!
//! Building never touches the network. Anything that would make the request
//! unsendable is rejected here with `ClientError::Build`.

use ureq::http::{HeaderName, HeaderValue};
use url::form_urlencoded;
use url::Url;

use crate::error::ClientError;
use crate::http::{Header, HttpMethod, HttpRequest, Query};

/// `User-Agent` value appended to every request.
pub const USER_AGENT: &str = concat!("fetch-core/", env!("CARGO_PKG_VERSION"));

/// Assemble the descriptor for a single call.
///
/// Caller headers are kept in order and the default `User-Agent` is appended
/// after them, so a caller-supplied `User-Agent` is sent alongside it rather
/// than replaced.
pub fn build_request(
    method: HttpMethod,
    url: &str,
    query: &[Query],
    headers: &[Header],
    body: Option<&str>,
) -> Result<HttpRequest, ClientError> {
    let parsed = Url::parse(url).map_err(|e| ClientError::Build(format!("{url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ClientError::Build(format!("unsupported scheme: {other}")));
        }
    }

    for header in headers {
        validate_header(header)?;
    }

    let mut all_headers = headers.to_vec();
    all_headers.push(Header::new("User-Agent", USER_AGENT));

    Ok(HttpRequest {
        method,
        url: append_query(url, parsed.query().is_some(), query),
        headers: all_headers,
        body: body.map(str::to_string),
    })
}

/// Serialize query parameters as `?k1=v1&k2=v2`, or `""` when there are none.
///
/// Keys and values are form-encoded, so a space becomes `+`.
pub fn query_string(query: &[Query]) -> String {
    if query.is_empty() {
        return String::new();
    }
    let pairs: Vec<String> = query
        .iter()
        .map(|q| format!("{}={}", encode(&q.key), encode(&q.value)))
        .collect();
    format!("?{}", pairs.join("&"))
}

fn encode(s: &str) -> String {
    form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

/// Insert the query before any fragment, joining onto an existing query with
/// `&` instead of opening a second one.
fn append_query(url: &str, has_query: bool, query: &[Query]) -> String {
    let mut qs = query_string(query);
    if qs.is_empty() {
        return url.to_string();
    }
    if has_query {
        qs.replace_range(..1, "&");
    }
    match url.split_once('#') {
        Some((base, fragment)) => format!("{base}{qs}#{fragment}"),
        None => format!("{url}{qs}"),
    }
}

fn validate_header(header: &Header) -> Result<(), ClientError> {
    HeaderName::from_bytes(header.key.as_bytes())
        .map_err(|e| ClientError::Build(format!("header name {:?}: {e}", header.key)))?;
    HeaderValue::from_str(&header.value)
        .map_err(|e| ClientError::Build(format!("header {}: {e}", header.key)))?;
    Ok(())
}
