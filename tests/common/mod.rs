//! Shared test helpers: a scripted in-memory transport.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use rest_resource::{HttpMethod, HttpResponse, Transport, TransportError};
use serde_json::Value;

pub const ENDPOINT: &str = "http://192.168.99.100:8080";

/// A request seen by [`FakeTransport`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Value>,
}

/// Replays scripted responses in order and records every call.
///
/// A call with nothing left in the script fails with a transport error.
#[derive(Debug, Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, code: u16, body: Value) -> Self {
        self.push(Ok(HttpResponse::with_body(code, body)));
        self
    }

    pub fn respond_with_link(self, code: u16, body: Value, link: &str) -> Self {
        let mut headers = HashMap::new();
        headers.insert("link".to_string(), vec![link.to_string()]);
        self.push(Ok(HttpResponse::new(code, headers, body)));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.push(Err(TransportError::other(message)));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.url).collect()
    }

    fn push(&self, response: Result<HttpResponse, TransportError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    fn record(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&Value>,
    ) -> Result<HttpResponse, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            url: url.to_string(),
            body: body.cloned(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::other("no scripted response")))
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.record(HttpMethod::Get, url, None)
    }

    async fn post(&self, url: &str, body: &Value) -> Result<HttpResponse, TransportError> {
        self.record(HttpMethod::Post, url, Some(body))
    }

    async fn put(&self, url: &str, body: &Value) -> Result<HttpResponse, TransportError> {
        self.record(HttpMethod::Put, url, Some(body))
    }

    async fn delete(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.record(HttpMethod::Delete, url, None)
    }
}
