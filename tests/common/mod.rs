// tests/common/mod.rs
//! Shared fixtures: a recording transport with canned responses.

#![allow(dead_code)]

use async_trait::async_trait;
use notion_rest::{
    ApiKey, BoxError, ClientOptions, HttpRequest, HttpResponse, NotionClient, Transport,
};
use reqwest::header::HeaderMap;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const API_KEY: &str = "secret_0123456789abcdefghijklmnop";

/// Answers each request with the next canned response and remembers what
/// it was asked.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<(u16, Vec<u8>)>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: impl Into<Vec<u8>>) {
        self.responses
            .lock()
            .unwrap()
            .push_back((status, body.into()));
    }

    pub fn respond_json(&self, status: u16, body: serde_json::Value) {
        self.respond(status, serde_json::to_vec(&body).unwrap());
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    pub fn last_body(&self) -> serde_json::Value {
        let body = self.last_request().body.expect("request had no body");
        serde_json::from_slice(&body).unwrap()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        self.requests.lock().unwrap().push(request);
        let (status, body) = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or("no canned response left")?;
        Ok(HttpResponse {
            status,
            headers: HeaderMap::new(),
            body,
        })
    }
}

pub fn client_with(transport: Arc<MockTransport>) -> NotionClient {
    NotionClient::with_options(
        ApiKey::new(API_KEY).unwrap(),
        ClientOptions::default().transport(transport),
    )
    .unwrap()
}

pub fn empty_list() -> serde_json::Value {
    serde_json::json!({"object": "list", "results": [], "has_more": false, "next_cursor": null})
}
