//! The shared transport: request preparation and failure classification.
//!
//! # Design
//! `Transport` decides everything about a request except how bytes move:
//! the URL, the bearer token, the JSON headers. An [`HttpExecutor`] does the
//! round-trip. On the way back the transport classifies failures into the
//! three [`ApiError`] kinds and hands successful bodies on as JSON, with the
//! `data` envelope already removed.

use std::future::Future;

use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::envelope;
use crate::error::{ApiError, ExecutorError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::raw::{Field, Raw};
use crate::session::Session;

const JSON: &str = "application/json";

const SERVER_MESSAGE: Field<String> = Field::new(&["message", "detail", "error", "msg"]);
const NESTED_MESSAGE: Field<String> = Field::new(&["message", "detail"]);
const ERROR_LISTS: &[&str] = &["errors", "non_field_errors"];

/// Performs one HTTP round-trip.
///
/// Implementations return `Ok` for every response that arrived, whatever
/// its status; status interpretation belongs to the [`Transport`].
pub trait HttpExecutor: Send + Sync {
    fn execute(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, ExecutorError>> + Send;
}

#[derive(Debug)]
pub struct Transport<E> {
    base_url: String,
    session: Session,
    executor: E,
}

impl<E: HttpExecutor> Transport<E> {
    pub fn new(config: &ClientConfig, session: Session, executor: E) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
            executor,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Builds the request for `path`. The token is read from the session
    /// now, so a sign-in between two calls applies to the second one.
    pub fn prepare(&self, method: HttpMethod, path: &str, body: Option<RequestBody>) -> HttpRequest {
        let mut headers = Vec::new();
        if let Some(token) = self.session.token() {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        // A multipart body needs the content type with its own boundary,
        // which the executor takes from the form.
        if !body.as_ref().is_some_and(RequestBody::is_multipart) {
            headers.push(("Accept".to_string(), JSON.to_string()));
            headers.push(("Content-Type".to_string(), JSON.to_string()));
        }
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers,
            body,
        }
    }

    /// Sends the request and returns the unwrapped JSON payload.
    pub async fn send(&self, method: HttpMethod, path: &str, body: Option<RequestBody>) -> Result<Value, ApiError> {
        let request = self.prepare(method, path, body);
        debug!(method = method.as_str(), url = %request.url, "sending request");
        let response = self.executor.execute(request).await.map_err(|err| {
            debug!(error = %err, "request produced no usable response");
            ApiError::from(err)
        })?;
        interpret(response).map(envelope::unwrap)
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.send(HttpMethod::Get, path, None).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.send(HttpMethod::Delete, path, None).await
    }
}

/// Maps a received response to its JSON payload or a classified error.
pub fn interpret(response: HttpResponse) -> Result<Value, ApiError> {
    if !response.is_success() {
        return Err(ApiError::ServerRejected {
            status: response.status,
            message: server_message(&response.body)
                .unwrap_or_else(|| format!("Permintaan gagal (status {})", response.status)),
        });
    }
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&response.body).map_err(|err| ApiError::unexpected(format!("invalid JSON response: {err}")))
}

/// The human-readable message in an error body, if the server sent one.
fn server_message(body: &str) -> Option<String> {
    let payload: Value = serde_json::from_str(body).ok()?;
    let raw = Raw::new(&payload);
    SERVER_MESSAGE
        .get(raw)
        .or_else(|| NESTED_MESSAGE.get(raw.nested("error")))
        .or_else(|| raw.first(ERROR_LISTS).and_then(first_error))
        .filter(|message| !message.trim().is_empty())
}

/// First message in `["..."]` or `{field: ["..."]}` validation errors.
fn first_error(errors: &Value) -> Option<String> {
    match errors {
        Value::String(message) => Some(message.clone()),
        Value::Array(items) => items.iter().find_map(first_error),
        Value::Object(fields) => fields.values().find_map(first_error),
        _ => None,
    }
}
