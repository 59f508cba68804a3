//! Scripted executor for unit tests.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::error::ExecutorError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::HttpExecutor;

type Reply = Result<HttpResponse, ExecutorError>;

/// Replays canned replies and records every request it sees. Replies
/// registered with [`StubExecutor::route`] match on the URL's path suffix;
/// everything else is served from a FIFO queue.
#[derive(Debug, Default)]
pub(crate) struct StubExecutor {
    routes: Vec<(String, Reply)>,
    queue: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

fn reply(status: u16, body: &str) -> Reply {
    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body: body.to_string(),
    })
}

impl StubExecutor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, status: u16, body: &str) -> Self {
        self.queue.lock().push_back(reply(status, body));
        self
    }

    pub(crate) fn fail(self, error: ExecutorError) -> Self {
        self.queue.lock().push_back(Err(error));
        self
    }

    pub(crate) fn route(mut self, path: &str, status: u16, body: &str) -> Self {
        self.routes.push((path.to_string(), reply(status, body)));
        self
    }

    pub(crate) fn route_fail(mut self, path: &str, error: ExecutorError) -> Self {
        self.routes.push((path.to_string(), Err(error)));
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests.lock().last().cloned().expect("no request was sent")
    }
}

impl HttpExecutor for StubExecutor {
    async fn execute(&self, request: HttpRequest) -> Reply {
        let reply = self
            .routes
            .iter()
            .find(|(path, _)| request.url.ends_with(path.as_str()))
            .map(|(_, reply)| reply.clone())
            .or_else(|| self.queue.lock().pop_front())
            .unwrap_or_else(|| Err(ExecutorError::Failed(format!("no stubbed reply for {}", request.url))));
        self.requests.lock().push(request);
        reply
    }
}
