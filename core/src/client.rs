//! Blocking HTTP client that keeps the outcome of its last call.
//!
//! # Design
//! `Client` owns a pooled `ureq::Agent` and the results of the most recent
//! exchange. Every call runs build → send → read → map as one blocking
//! sequence and overwrites the previous results first, so exactly one call's
//! outcome is visible at a time. Calls take `&mut self`; sharing a `Client`
//! across threads therefore needs an explicit lock on the caller's side.
//!
//! Non-2xx statuses are returned as data. Only failures to build, send or
//! read count as errors.

use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use ureq::http;
use ureq::{Agent, AsSendBody, Body};

use crate::config::{
    Config, IDLE_CONNECTION_TIMEOUT, MAX_IDLE_CONNECTIONS, MAX_IDLE_CONNECTIONS_PER_HOST,
};
use crate::error::ClientError;
use crate::http::{join_headers, Header, HttpMethod, HttpResponse, Query};
use crate::request::build_request;
use crate::trace;

/// Synchronous HTTP client for one call at a time.
pub struct Client {
    config: Config,
    agent: Agent,
    response: HttpResponse,
    error: Option<ClientError>,
    debug_info: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("response", &self.response)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Client {
    pub fn new(config: Config) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .max_idle_connections(MAX_IDLE_CONNECTIONS)
            .max_idle_connections_per_host(MAX_IDLE_CONNECTIONS_PER_HOST)
            .max_idle_age(IDLE_CONNECTION_TIMEOUT)
            .timeout_global(Some(config.effective_timeout()))
            .build()
            .new_agent();

        Self {
            config,
            agent,
            response: HttpResponse::default(),
            error: None,
            debug_info: String::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access to the configuration. Changes apply from the next call.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn get(
        &mut self,
        url: &str,
        query: &[Query],
        headers: &[Header],
    ) -> Result<&HttpResponse, ClientError> {
        self.do_request(HttpMethod::Get, url, query, None, headers)
    }

    pub fn post(
        &mut self,
        url: &str,
        query: &[Query],
        body: Option<&str>,
        headers: &[Header],
    ) -> Result<&HttpResponse, ClientError> {
        self.do_request(HttpMethod::Post, url, query, body, headers)
    }

    pub fn put(
        &mut self,
        url: &str,
        query: &[Query],
        body: Option<&str>,
        headers: &[Header],
    ) -> Result<&HttpResponse, ClientError> {
        self.do_request(HttpMethod::Put, url, query, body, headers)
    }

    pub fn delete(
        &mut self,
        url: &str,
        query: &[Query],
        body: Option<&str>,
        headers: &[Header],
    ) -> Result<&HttpResponse, ClientError> {
        self.do_request(HttpMethod::Delete, url, query, body, headers)
    }

    /// Perform a single request and record its outcome on the client.
    ///
    /// The previous call's status, body, headers, error and debug trace are
    /// cleared before anything else happens, so after any failure
    /// `status_code()` is 0 and `body()` and `response_headers()` are empty
    /// rather than left over from the previous call. On error the returned
    /// value is also kept in `error()`.
    ///
    /// The whole body is read into memory with no size cap. Bytes that are
    /// not valid UTF-8 are replaced with U+FFFD instead of failing the call.
    pub fn do_request(
        &mut self,
        method: HttpMethod,
        url: &str,
        query: &[Query],
        body: Option<&str>,
        headers: &[Header],
    ) -> Result<&HttpResponse, ClientError> {
        self.reset();

        match self.execute(method, url, query, body, headers) {
            Ok(response) => {
                self.response = response;
                Ok(&self.response)
            }
            Err(err) => {
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    fn reset(&mut self) {
        self.response = HttpResponse::default();
        self.error = None;
        self.debug_info.clear();
    }

    fn execute(
        &mut self,
        method: HttpMethod,
        url: &str,
        query: &[Query],
        body: Option<&str>,
        headers: &[Header],
    ) -> Result<HttpResponse, ClientError> {
        let request = build_request(method, url, query, headers, body)?;
        let http_request = request.to_http()?;

        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let sent = match request.body.as_deref() {
            Some(body) => self.send(http_request.map(|()| body)),
            None => self.send(http_request),
        };
        let mut response = sent.map_err(|e| {
            tracing::warn!(url = %request.url, error = %e, "transport failed");
            ClientError::from(e)
        })?;

        // The body reader is dropped on every path out of this function,
        // which releases the connection back to the pool or closes it.
        let bytes = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| {
                tracing::warn!(url = %request.url, error = %e, "reading response body failed");
                ClientError::Read(e.to_string())
            })?;
        let text = String::from_utf8_lossy(&bytes).into_owned();

        let status = response.status();
        tracing::debug!(status = status.as_u16(), bytes = text.len(), "response received");

        if self.config.debug {
            self.debug_info = trace::format_exchange(&request, status, response.headers(), &text);
        }

        Ok(HttpResponse {
            status: status.as_u16(),
            headers: join_headers(response.headers()),
            body: text,
        })
    }

    /// Send with the timeout currently configured, so a changed
    /// `Config::timeout` applies without rebuilding the agent.
    fn send<S: AsSendBody>(
        &self,
        request: http::Request<S>,
    ) -> Result<http::Response<Body>, ureq::Error> {
        let request = self
            .agent
            .configure_request(request)
            .timeout_global(Some(self.config.effective_timeout()))
            .build();
        self.agent.run(request)
    }

    /// The last successful response, or an empty one after a failure.
    pub fn response(&self) -> &HttpResponse {
        &self.response
    }

    pub fn status_code(&self) -> u16 {
        self.response.status
    }

    pub fn body(&self) -> &str {
        &self.response.body
    }

    pub fn response_headers(&self) -> &HashMap<String, String> {
        &self.response.headers
    }

    /// The error of the last call, if it failed.
    pub fn error(&self) -> Option<&ClientError> {
        self.error.as_ref()
    }

    /// Request/response dump of the last call. Empty unless `debug` was set
    /// when the call completed.
    pub fn debug_info(&self) -> &str {
        &self.debug_info
    }

    /// Decode the last body as a JSON object.
    pub fn response_to_map(&self) -> Result<Map<String, Value>, ClientError> {
        self.response_to_struct()
    }

    /// Decode the last body as any JSON value.
    pub fn response_to_value(&self) -> Result<Value, ClientError> {
        self.response_to_struct()
    }

    /// Decode the last body into `T`.
    pub fn response_to_struct<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        Ok(serde_json::from_str(&self.response.body)?)
    }
}
