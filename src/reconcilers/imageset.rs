// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! ImageSet reconciler - makes sure every ImageSet has a Job copying its images.

use crate::config::Config;
use crate::constants::ERROR_REQUEUE_SECS;
use crate::error::{OperatorError, Result};
use crate::kubernetes::{KubePlatform, SubmitOutcome, WorkloadPlatform};
use crate::types::imageset::job_name_for;
use crate::types::ImageSet;
use crate::workload::{build_job, ScriptBuilder};
use futures::StreamExt;
use k8s_openapi::api::batch::v1::Job;
use kube::{
    runtime::{controller::Action, Controller},
    Api, ResourceExt,
};
use kube_runtime::watcher::Config as WatcherConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// How a single reconcile ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The ImageSet is gone; nothing to do
    ImageSetAbsent,
    /// The Job was already there
    JobPresent,
    JobCreated,
    /// Someone else created the Job between our lookup and our create
    JobAlreadyExists,
}

pub struct ImageSetReconciler<P> {
    platform: P,
    scripts: ScriptBuilder,
    runner_image: String,
}

impl<P: WorkloadPlatform> ImageSetReconciler<P> {
    pub fn new(platform: P, config: &Config) -> Self {
        Self {
            platform,
            scripts: ScriptBuilder::from_config(config),
            runner_image: config.runner_image.clone(),
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Reconcile the ImageSet identified by `namespace`/`name`.
    ///
    /// Creates at most one Job and never retries; a returned error means the
    /// caller should try again later.
    #[instrument(skip(self), fields(image_set = %format!("{}/{}", namespace, name)))]
    pub async fn reconcile(&self, namespace: &str, name: &str) -> Result<ReconcileOutcome> {
        let Some(image_set) = self.platform.fetch_image_set(namespace, name).await? else {
            debug!("ImageSet no longer exists, skipping");
            return Ok(ReconcileOutcome::ImageSetAbsent);
        };

        let job_name = job_name_for(name);
        if self.platform.find_job(namespace, &job_name).await?.is_some() {
            debug!("Job {} already exists", job_name);
            return Ok(ReconcileOutcome::JobPresent);
        }

        let mut job = self.build_job(&image_set, namespace, &job_name)?;
        self.platform.bind_ownership(&image_set, &mut job)?;

        info!(
            "Creating Job {}/{} for {} images",
            namespace,
            job_name,
            image_set.spec.images.len()
        );
        match self.platform.submit_job(&job).await? {
            SubmitOutcome::Created => Ok(ReconcileOutcome::JobCreated),
            SubmitOutcome::AlreadyExists => {
                debug!("Job {} was created concurrently", job_name);
                Ok(ReconcileOutcome::JobAlreadyExists)
            }
        }
    }

    fn build_job(&self, image_set: &ImageSet, namespace: &str, job_name: &str) -> Result<Job> {
        let script = self.scripts.build(&image_set.spec.images)?;
        Ok(build_job(
            job_name,
            namespace,
            &image_set.name_any(),
            script,
            &self.runner_image,
        ))
    }
}

impl ImageSetReconciler<KubePlatform> {
    /// Watch ImageSets (and the Jobs they own) until a shutdown signal arrives
    pub async fn run(self, watch_namespace: Option<String>) -> anyhow::Result<()> {
        let client = self.platform.client().clone();
        let (image_sets, jobs): (Api<ImageSet>, Api<Job>) = match &watch_namespace {
            Some(ns) => (
                Api::namespaced(client.clone(), ns),
                Api::namespaced(client, ns),
            ),
            None => (Api::all(client.clone()), Api::all(client)),
        };
        let context = Arc::new(self);

        Controller::new(image_sets, WatcherConfig::default())
            .owns(jobs, WatcherConfig::default())
            .shutdown_on_signal()
            .run(reconcile, error_policy, context)
            .for_each(|res| async move {
                match res {
                    Ok(o) => debug!("Reconciled ImageSet: {:?}", o),
                    Err(e) => warn!("Reconciliation error: {:?}", e),
                }
            })
            .await;

        Ok(())
    }
}

async fn reconcile<P: WorkloadPlatform>(
    image_set: Arc<ImageSet>,
    ctx: Arc<ImageSetReconciler<P>>,
) -> Result<Action> {
    let namespace = image_set
        .namespace()
        .ok_or(OperatorError::MissingObjectKey(".metadata.namespace"))?;

    ctx.reconcile(&namespace, &image_set.name_any()).await?;

    // Jobs are owned, so deleting one triggers a new reconcile on its own
    Ok(Action::await_change())
}

fn error_policy<P>(
    _image_set: Arc<ImageSet>,
    error: &OperatorError,
    _ctx: Arc<ImageSetReconciler<P>>,
) -> Action {
    error!("Reconciliation error: {}", error);
    Action::requeue(Duration::from_secs(ERROR_REQUEUE_SECS))
}
