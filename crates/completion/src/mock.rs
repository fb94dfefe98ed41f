//! Scripted mock client for tests.

use async_trait::async_trait;
use std::sync::Mutex;

use atlas_core::completion::{CompletionClient, CompletionRequest};
use atlas_core::error::CompletionError;

/// A mock client that returns a sequence of scripted results.
///
/// Each call to `complete` returns the next result in the queue and records
/// the request it received. Panics if more calls are made than results
/// provided.
pub struct SequentialMockClient {
    results: Mutex<Vec<Result<String, CompletionError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    call_count: Mutex<usize>,
}

impl SequentialMockClient {
    pub fn new(results: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            results: Mutex::new(results),
            requests: Mutex::new(Vec::new()),
            call_count: Mutex::new(0),
        }
    }

    /// A client that returns a single answer.
    pub fn single_text(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    /// A client whose single call fails with the given error.
    pub fn failing(error: CompletionError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Every request received so far, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for SequentialMockClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        self.requests.lock().unwrap().push(request);

        let mut count = self.call_count.lock().unwrap();
        let results = self.results.lock().unwrap();

        if *count >= results.len() {
            panic!(
                "SequentialMockClient: no more results (call #{}, have {})",
                *count,
                results.len()
            );
        }

        let result = results[*count].clone();
        *count += 1;
        result
    }
}
