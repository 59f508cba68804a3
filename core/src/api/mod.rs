//! Domain operations exposed to the UI.
//!
//! # Design
//! Every operation composes the same pipeline: encode → transport →
//! unwrap → (resolve records) → normalize. Reads and writes fail
//! differently on purpose:
//! - reads (`fetch_*`) log the failure and return an empty list or `None`,
//!   so a screen always has something to render;
//! - writes log the failure and return it, so the action that triggered the
//!   write can tell the user.

mod articles;
mod auth;
mod bookings;
mod dashboard;
mod packages;
mod reviews;
mod users;
mod wishlist;

use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

use crate::config::ClientConfig;
use crate::encode::{self, Attachment, Endpoint};
use crate::entities::{normalize_list, Normalize};
use crate::envelope;
use crate::error::ApiError;
use crate::executor::UreqExecutor;
use crate::http::{HttpMethod, RequestBody};
use crate::routes::Routes;
use crate::session::Session;
use crate::transport::{HttpExecutor, Transport};

/// Client for the travel backend.
#[derive(Debug)]
pub struct TravelApi<E> {
    transport: Transport<E>,
    routes: Routes,
}

impl TravelApi<UreqExecutor> {
    /// A client that talks HTTP through `ureq`.
    pub fn connect(config: &ClientConfig, session: Session) -> Self {
        Self::new(config, session, UreqExecutor::new(config.timeout()))
    }
}

impl<E: HttpExecutor> TravelApi<E> {
    pub fn new(config: &ClientConfig, session: Session, executor: E) -> Self {
        Self {
            transport: Transport::new(config, session, executor),
            routes: Routes::new(&config.api_prefix),
        }
    }

    pub fn session(&self) -> &Session {
        self.transport.session()
    }

    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    pub fn transport(&self) -> &Transport<E> {
        &self.transport
    }

    /// Fetches a list endpoint. Failures read as an empty list.
    async fn read_list<T: Normalize>(&self, path: &str, what: &'static str) -> Vec<T> {
        match self.transport.get(path).await {
            Ok(payload) => normalize_list(envelope::records(&payload)),
            Err(err) => {
                warn!(resource = what, path, error = %err, "fetch failed; showing an empty list");
                Vec::new()
            }
        }
    }

    /// Fetches a single record. Failures and empty payloads read as `None`.
    async fn read_one<T: Normalize>(&self, path: &str, what: &'static str) -> Option<T> {
        match self.transport.get(path).await {
            Ok(payload) => normalize_record(&payload),
            Err(err) => {
                warn!(resource = what, path, error = %err, "fetch failed; showing nothing");
                None
            }
        }
    }

    /// Sends a write, logging any failure before returning it.
    async fn write(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<RequestBody>,
        what: &'static str,
    ) -> Result<Value, ApiError> {
        self.transport
            .send(method, path, body)
            .await
            .inspect_err(|err| error!(resource = what, path, error = %err, "write failed"))
    }

    /// Encodes a canonical payload for `endpoint`, sends it, and normalizes
    /// the record the backend returns.
    async fn write_record<P: Serialize, T: Normalize>(
        &self,
        method: HttpMethod,
        path: &str,
        endpoint: &Endpoint,
        payload: &P,
        attachment: Option<Attachment>,
        what: &'static str,
    ) -> Result<T, ApiError> {
        let body = encode_body(endpoint, payload, attachment, path, what)?;
        let response = self.write(method, path, Some(body), what).await?;
        Ok(T::from_value(&response))
    }

    /// A bodiless write (delete, toggle) whose response is ignored.
    async fn write_empty(&self, method: HttpMethod, path: &str, what: &'static str) -> Result<(), ApiError> {
        self.write(method, path, None, what).await.map(drop)
    }
}

/// Encodes a write body, logging a payload the endpoint cannot carry.
fn encode_body<P: Serialize>(
    endpoint: &Endpoint,
    payload: &P,
    attachment: Option<Attachment>,
    path: &str,
    what: &'static str,
) -> Result<RequestBody, ApiError> {
    encode::encode(endpoint, payload, attachment)
        .inspect_err(|err| error!(resource = what, path, error = %err, "could not encode request"))
}

/// A single record payload; anything that is not an object means "no record".
fn normalize_record<T: Normalize>(payload: &Value) -> Option<T> {
    payload.is_object().then(|| T::from_value(payload))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unencodable_payload_is_unexpected() {
        let err = encode_body(&encode::LOGIN, &json!(["not", "an", "object"]), None, "/api/auth/login/", "login")
            .unwrap_err();
        assert!(matches!(err, ApiError::Unexpected { .. }));
    }

    #[test]
    fn plain_payload_encodes_as_json() {
        let body = encode_body(&encode::LOGIN, &json!({"email": "a@b.c"}), None, "/api/auth/login/", "login").unwrap();
        assert!(!body.is_multipart());
    }
}
