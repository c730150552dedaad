/*!
 * Mock transport for testing
 *
 * Routes requests to scripted replies by URL prefix so no real network call is
 * ever made, and records every request it sees.
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use nexo::errors::ProviderError;
use nexo::providers::transport::{HttpRequest, HttpResponse, Transport};

/// Tracks calls so tests can assert which backends were contacted
#[derive(Debug, Default)]
pub struct ApiCallTracker {
    /// Count of all calls made
    pub call_count: usize,
    /// Calls per route prefix
    pub calls_by_route: HashMap<String, usize>,
    /// Every request received, in order
    pub requests: Vec<HttpRequest>,
}

/// Scripted outcome for a route
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Answer with a status and body
    Respond(HttpResponse),
    /// Fail at the transport level
    Fail(ProviderError),
    /// Answer after sleeping
    Delayed(Duration, HttpResponse),
}

impl MockReply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self::Respond(HttpResponse::new(200, body))
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Respond(HttpResponse::new(status, body))
    }
}

#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Vec<(String, MockReply)>,
    tracker: Arc<Mutex<ApiCallTracker>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests whose URL starts with `prefix`
    pub fn route(mut self, prefix: &str, reply: MockReply) -> Self {
        self.routes.push((prefix.to_string(), reply));
        self
    }

    pub fn call_count(&self) -> usize {
        self.tracker.lock().unwrap().call_count
    }

    pub fn calls_to(&self, prefix: &str) -> usize {
        self.tracker
            .lock()
            .unwrap()
            .calls_by_route
            .get(prefix)
            .copied()
            .unwrap_or(0)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.tracker.lock().unwrap().requests.clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest, _timeout: Duration) -> Result<HttpResponse, ProviderError> {
        let route = self
            .routes
            .iter()
            .find(|(prefix, _)| request.url.starts_with(prefix.as_str()))
            .cloned();

        {
            let mut tracker = self.tracker.lock().unwrap();
            tracker.call_count += 1;
            if let Some((prefix, _)) = &route {
                *tracker.calls_by_route.entry(prefix.clone()).or_insert(0) += 1;
            }
            tracker.requests.push(request.clone());
        }

        match route {
            Some((_, MockReply::Respond(response))) => Ok(response),
            Some((_, MockReply::Fail(error))) => Err(error),
            Some((_, MockReply::Delayed(delay, response))) => {
                tokio::time::sleep(delay).await;
                Ok(response)
            }
            None => Err(ProviderError::ConnectionError(format!("no route for {}", request.url))),
        }
    }
}
