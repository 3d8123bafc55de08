//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use cloudlaunch::clients::{Connection, Document, Params, Transport, TransportError};
use cloudlaunch::{ApiClient, ApiConfig};

/// One recorded `action` call.
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub keys: Vec<String>,
    pub params: Params,
    pub validate: bool,
}

impl Call {
    pub fn keys(&self) -> String {
        self.keys.join(".")
    }
}

/// A transport that records every action and replies from a queue.
///
/// When the queue is empty the parameters of the call are echoed back.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<Call>>,
    responses: Mutex<VecDeque<Value>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond_with(&self, value: Value) {
        self.responses.lock().unwrap().push_back(value);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Call {
        self.calls().pop().expect("no action was performed")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn get_document(&self, _connection: &Connection) -> Result<Document, TransportError> {
        Ok(Document::default())
    }

    async fn action(
        &self,
        _connection: &Connection,
        _document: &Document,
        keys: &[&str],
        params: Params,
        validate: bool,
    ) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push(Call {
            keys: keys.iter().map(ToString::to_string).collect(),
            params: params.clone(),
            validate,
        });
        let queued = self.responses.lock().unwrap().pop_front();
        Ok(queued.unwrap_or(Value::Object(params)))
    }
}

/// A configured client on top of `transport`.
pub fn client(transport: Arc<RecordingTransport>) -> ApiClient {
    let config = ApiConfig::builder()
        .url("http://localhost:8000/api/v1")
        .token("test-token")
        .build();
    ApiClient::with_transport(config, transport)
}

/// Converts a `json!` object into parameters.
pub fn params(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

/// Loads a JSON fixture from `tests/fixtures`.
pub fn fixture(name: &str) -> Value {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    let text = std::fs::read_to_string(&path).unwrap();
    serde_json::from_str(&text).unwrap()
}
