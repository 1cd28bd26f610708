// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes operations the reconciler depends on

use async_trait::async_trait;
use k8s_openapi::api::batch::v1::Job;
use kube::{api::PostParams, Api, Client, ResourceExt};
use tracing::{debug, info, instrument};

use crate::constants::OPERATOR_NAME;
use crate::error::{OperatorError, Result};
use crate::types::ImageSet;
use crate::workload::set_controller_reference;

/// Result of submitting a Job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    /// A Job with the same name was created concurrently
    AlreadyExists,
}

/// The calls the reconciler makes against the cluster.
///
/// Each call is a single request; retries belong to whoever drives the reconciler.
#[async_trait]
pub trait WorkloadPlatform: Send + Sync {
    /// Get an ImageSet, `None` when it does not exist
    async fn fetch_image_set(&self, namespace: &str, name: &str) -> Result<Option<ImageSet>>;

    /// Get a Job, `None` when it does not exist
    async fn find_job(&self, namespace: &str, name: &str) -> Result<Option<Job>>;

    /// Create the Job, reporting a name clash as [`SubmitOutcome::AlreadyExists`]
    async fn submit_job(&self, job: &Job) -> Result<SubmitOutcome>;

    /// Record `owner` as the controller of `job`
    fn bind_ownership(&self, owner: &ImageSet, job: &mut Job) -> Result<()> {
        set_controller_reference(owner, job)
    }
}

/// [`WorkloadPlatform`] backed by the Kubernetes API
#[derive(Clone)]
pub struct KubePlatform {
    client: Client,
}

impl KubePlatform {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl WorkloadPlatform for KubePlatform {
    #[instrument(skip(self))]
    async fn fetch_image_set(&self, namespace: &str, name: &str) -> Result<Option<ImageSet>> {
        let image_sets: Api<ImageSet> = Api::namespaced(self.client.clone(), namespace);

        match image_sets.get(name).await {
            Ok(image_set) => Ok(Some(image_set)),
            Err(kube::Error::Api(err)) if err.code == 404 => {
                debug!("ImageSet {}/{} not found", namespace, name);
                Ok(None)
            }
            Err(e) => Err(OperatorError::FetchFailed(
                format!("{}/{}", namespace, name),
                e,
            )),
        }
    }

    #[instrument(skip(self))]
    async fn find_job(&self, namespace: &str, name: &str) -> Result<Option<Job>> {
        let jobs: Api<Job> = Api::namespaced(self.client.clone(), namespace);

        match jobs.get(name).await {
            Ok(job) => Ok(Some(job)),
            Err(kube::Error::Api(err)) if err.code == 404 => Ok(None),
            Err(e) => Err(OperatorError::JobLookupFailed(
                format!("{}/{}", namespace, name),
                e,
            )),
        }
    }

    #[instrument(skip(self, job), fields(job = %job.name_any()))]
    async fn submit_job(&self, job: &Job) -> Result<SubmitOutcome> {
        let namespace = job
            .namespace()
            .ok_or(OperatorError::MissingObjectKey(".metadata.namespace"))?;
        let jobs: Api<Job> = Api::namespaced(self.client.clone(), &namespace);
        let pp = PostParams {
            field_manager: Some(OPERATOR_NAME.to_string()),
            ..Default::default()
        };

        match jobs.create(&pp, job).await {
            Ok(_) => {
                info!("Created Job {}/{}", namespace, job.name_any());
                Ok(SubmitOutcome::Created)
            }
            Err(kube::Error::Api(err)) if err.code == 409 && err.reason == "AlreadyExists" => {
                debug!("Job {}/{} already exists", namespace, job.name_any());
                Ok(SubmitOutcome::AlreadyExists)
            }
            Err(e) => Err(OperatorError::SubmitFailed(
                format!("{}/{}", namespace, job.name_any()),
                e,
            )),
        }
    }
}
