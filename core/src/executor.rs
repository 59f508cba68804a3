//! Production executor on top of `ureq`.
//!
//! ureq is blocking, so each round-trip runs on tokio's blocking pool.
//! Status codes are never treated as errors here (the transport interprets
//! them); only failures where no response arrived are reported as
//! [`ExecutorError::NoResponse`]. Once a status line is in, the exchange
//! counts as answered even if the body cannot be read.

use std::time::Duration;

use tracing::warn;
use ureq::typestate::WithBody;
use ureq::{Agent, RequestBuilder};

use crate::config::REQUEST_TIMEOUT;
use crate::error::ExecutorError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::transport::HttpExecutor;

#[derive(Clone)]
pub struct UreqExecutor {
    agent: Agent,
}

impl Default for UreqExecutor {
    fn default() -> Self {
        Self::new(REQUEST_TIMEOUT)
    }
}

impl UreqExecutor {
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl HttpExecutor for UreqExecutor {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ExecutorError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute_blocking(&agent, request))
            .await
            .map_err(|err| ExecutorError::Failed(format!("blocking task failed: {err}")))?
    }
}

fn execute_blocking(agent: &Agent, request: HttpRequest) -> Result<HttpResponse, ExecutorError> {
    let HttpRequest {
        method,
        url,
        headers,
        body,
    } = request;

    let result = match method {
        HttpMethod::Get => with_headers(agent.get(&url), &headers).call(),
        HttpMethod::Delete => with_headers(agent.delete(&url), &headers).call(),
        HttpMethod::Post => send(with_headers(agent.post(&url), &headers), body),
        HttpMethod::Put => send(with_headers(agent.put(&url), &headers), body),
        HttpMethod::Patch => send(with_headers(agent.patch(&url), &headers), body),
    };

    let mut response = result.map_err(classify)?;
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| value.to_str().ok().map(|value| (name.to_string(), value.to_string())))
        .collect();
    let body = match response.body_mut().read_to_vec() {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(err) => unreadable_body(status, err)?,
    };

    Ok(HttpResponse { status, headers, body })
}

/// A rejection keeps its status with an empty body; a success whose body is
/// lost is a failure, not unreachability.
fn unreadable_body(status: u16, error: ureq::Error) -> Result<String, ExecutorError> {
    if (200..300).contains(&status) {
        Err(ExecutorError::Failed(format!("reading response body: {error}")))
    } else {
        warn!(status, error = %error, "discarding unreadable error body");
        Ok(String::new())
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send(
    builder: RequestBuilder<WithBody>,
    body: Option<RequestBody>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        None => builder.send_empty(),
        Some(RequestBody::Json(text)) => builder.send(text.as_bytes()),
        Some(RequestBody::Multipart(form)) => {
            let bytes = form.to_bytes();
            builder.header("Content-Type", form.content_type().as_str()).send(&bytes[..])
        }
    }
}

fn classify(error: ureq::Error) -> ExecutorError {
    match error {
        ureq::Error::Io(_) | ureq::Error::Timeout(_) | ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => {
            ExecutorError::NoResponse(error.to_string())
        }
        other => ExecutorError::Failed(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_failures_mean_no_response() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(classify(ureq::Error::Io(io)), ExecutorError::NoResponse(_)));
        assert!(matches!(classify(ureq::Error::HostNotFound), ExecutorError::NoResponse(_)));
        assert!(matches!(classify(ureq::Error::ConnectionFailed), ExecutorError::NoResponse(_)));
    }

    #[test]
    fn unreadable_body_after_status_is_not_unreachability() {
        assert_eq!(unreadable_body(500, ureq::Error::BodyExceedsLimit(10)), Ok(String::new()));
        assert!(matches!(
            unreadable_body(200, ureq::Error::BodyExceedsLimit(10)),
            Err(ExecutorError::Failed(_))
        ));
    }

    #[test]
    fn other_failures_are_not_unreachability() {
        let err = classify(ureq::Error::BadUri("::".into()));
        assert!(matches!(err, ExecutorError::Failed(_)));
    }
}
