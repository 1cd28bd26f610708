// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities: a mocked Kubernetes API and an in-memory platform.

use async_trait::async_trait;
use http::{Request, Response};
use k8s_openapi::api::batch::v1::Job;
use kube::client::Body;
use kube::core::ErrorResponse;
use kube::{Client, ResourceExt};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

use crate::error::{OperatorError, Result};
use crate::kubernetes::{SubmitOutcome, WorkloadPlatform};
use crate::types::ImageSet;

/// A mock HTTP service that returns predefined responses based on request paths.
/// Every request it receives is recorded.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(("GET".to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(("POST".to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// Number of recorded requests with this method and path
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, p)| m == method && p == path)
            .count()
    }

    /// Number of recorded requests with this method, any path
    pub fn count_method(&self, method: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == method)
            .count()
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        self.responses
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .cloned()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let response = self.find_response(&method, &path);
        self.requests.lock().unwrap().push((method, path));

        Box::pin(async move {
            let (status, body) =
                response.unwrap_or_else(|| (404, status_json(404, "NotFound", "not found")));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a mock ImageSet JSON response
pub fn image_set_json(namespace: &str, name: &str, images: &[&str]) -> String {
    serde_json::json!({
        "apiVersion": "images.example.com/v1",
        "kind": "ImageSet",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": format!("{}-uid", name)
        },
        "spec": { "images": images }
    })
    .to_string()
}

/// Create a mock Job JSON response
pub fn job_json(namespace: &str, name: &str) -> String {
    serde_json::json!({
        "apiVersion": "batch/v1",
        "kind": "Job",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": format!("{}-uid", name)
        }
    })
    .to_string()
}

/// Create a Status failure response body
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// A kube API error as returned by the API server
pub fn api_error(code: u16, reason: &str) -> kube::Error {
    kube::Error::Api(ErrorResponse {
        status: "Failure".to_string(),
        message: format!("injected {}", reason),
        reason: reason.to_string(),
        code,
    })
}

/// Build an ImageSet object with a uid, as the API server would return it
pub fn make_image_set(namespace: &str, name: &str, images: &[&str]) -> ImageSet {
    serde_json::from_str(&image_set_json(namespace, name, images)).unwrap()
}

/// Failure to inject into [`FakePlatform`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fault {
    Fetch,
    JobLookup,
    Bind,
    Submit,
    /// Submit reports a conflict without storing the Job, like a lost race
    SubmitConflict,
}

#[derive(Default)]
struct FakeState {
    image_sets: HashMap<(String, String), ImageSet>,
    jobs: HashMap<(String, String), Job>,
    submissions: usize,
    faults: HashSet<Fault>,
}

/// In-memory [`WorkloadPlatform`]; Job names are unique per namespace like in a real cluster
#[derive(Clone, Default)]
pub struct FakePlatform {
    state: Arc<Mutex<FakeState>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image_set(self, image_set: ImageSet) -> Self {
        let key = (image_set.namespace().unwrap_or_default(), image_set.name_any());
        self.state.lock().unwrap().image_sets.insert(key, image_set);
        self
    }

    pub fn with_job(self, job: Job) -> Self {
        let key = (job.namespace().unwrap_or_default(), job.name_any());
        self.state.lock().unwrap().jobs.insert(key, job);
        self
    }

    pub fn with_fault(self, fault: Fault) -> Self {
        self.state.lock().unwrap().faults.insert(fault);
        self
    }

    pub fn clear_faults(&self) {
        self.state.lock().unwrap().faults.clear();
    }

    /// Number of submit calls, successful or not
    pub fn submissions(&self) -> usize {
        self.state.lock().unwrap().submissions
    }

    pub fn jobs(&self) -> Vec<Job> {
        self.state.lock().unwrap().jobs.values().cloned().collect()
    }

    pub fn job(&self, namespace: &str, name: &str) -> Option<Job> {
        self.state
            .lock()
            .unwrap()
            .jobs
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    fn has_fault(&self, fault: Fault) -> bool {
        self.state.lock().unwrap().faults.contains(&fault)
    }
}

#[async_trait]
impl WorkloadPlatform for FakePlatform {
    async fn fetch_image_set(&self, namespace: &str, name: &str) -> Result<Option<ImageSet>> {
        if self.has_fault(Fault::Fetch) {
            return Err(OperatorError::FetchFailed(
                format!("{}/{}", namespace, name),
                api_error(500, "InternalError"),
            ));
        }
        Ok(self
            .state
            .lock()
            .unwrap()
            .image_sets
            .get(&(namespace.to_string(), name.to_string()))
            .cloned())
    }

    async fn find_job(&self, namespace: &str, name: &str) -> Result<Option<Job>> {
        if self.has_fault(Fault::JobLookup) {
            return Err(OperatorError::JobLookupFailed(
                format!("{}/{}", namespace, name),
                api_error(503, "ServiceUnavailable"),
            ));
        }
        Ok(self.job(namespace, name))
    }

    async fn submit_job(&self, job: &Job) -> Result<SubmitOutcome> {
        let conflict = self.has_fault(Fault::SubmitConflict);
        let failure = self.has_fault(Fault::Submit);
        let key = (job.namespace().unwrap_or_default(), job.name_any());

        let mut state = self.state.lock().unwrap();
        state.submissions += 1;

        if failure {
            return Err(OperatorError::SubmitFailed(
                format!("{}/{}", key.0, key.1),
                api_error(500, "InternalError"),
            ));
        }
        if conflict || state.jobs.contains_key(&key) {
            return Ok(SubmitOutcome::AlreadyExists);
        }
        state.jobs.insert(key, job.clone());
        Ok(SubmitOutcome::Created)
    }

    fn bind_ownership(&self, owner: &ImageSet, job: &mut Job) -> Result<()> {
        if self.has_fault(Fault::Bind) {
            return Err(OperatorError::OwnershipBinding(
                "injected binding failure".to_string(),
            ));
        }
        crate::workload::set_controller_reference(owner, job)
    }
}
