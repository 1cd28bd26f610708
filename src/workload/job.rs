// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Job specification wrapping the copy script.

use k8s_openapi::api::batch::v1::{Job, JobSpec};
use k8s_openapi::api::core::v1::{
    Container, PodSpec, PodTemplateSpec, SecretVolumeSource, Volume, VolumeMount,
};
use kube::api::ObjectMeta;
use std::collections::BTreeMap;

use crate::constants::{credentials, job, labels, OPERATOR_NAME};

/// Build the Job that runs `script` for the ImageSet `image_set_name`.
/// Owner references are not set here, see [`super::owner`].
pub fn build_job(
    job_name: &str,
    namespace: &str,
    image_set_name: &str,
    script: String,
    runner_image: &str,
) -> Job {
    let labels = BTreeMap::from([
        (labels::MANAGED_BY.to_string(), OPERATOR_NAME.to_string()),
        (labels::IMAGE_SET.to_string(), image_set_name.to_string()),
    ]);

    Job {
        metadata: ObjectMeta {
            name: Some(job_name.to_string()),
            namespace: Some(namespace.to_string()),
            labels: Some(labels.clone()),
            ..Default::default()
        },
        spec: Some(JobSpec {
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(labels),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![Container {
                        name: job::CONTAINER_NAME.to_string(),
                        image: Some(runner_image.to_string()),
                        command: Some(vec!["sh".to_string(), "-c".to_string(), script]),
                        volume_mounts: Some(vec![
                            secret_mount(credentials::SOURCE_VOLUME, credentials::SOURCE_MOUNT_PATH),
                            secret_mount(credentials::TARGET_VOLUME, credentials::TARGET_MOUNT_PATH),
                        ]),
                        ..Default::default()
                    }],
                    volumes: Some(vec![
                        secret_volume(credentials::SOURCE_VOLUME, credentials::SOURCE_SECRET_NAME),
                        secret_volume(credentials::TARGET_VOLUME, credentials::TARGET_SECRET_NAME),
                    ]),
                    restart_policy: Some(job::RESTART_POLICY.to_string()),
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        status: None,
    }
}

fn secret_mount(volume: &str, path: &str) -> VolumeMount {
    VolumeMount {
        name: volume.to_string(),
        mount_path: path.to_string(),
        read_only: Some(true),
        ..Default::default()
    }
}

fn secret_volume(volume: &str, secret_name: &str) -> Volume {
    Volume {
        name: volume.to_string(),
        secret: Some(SecretVolumeSource {
            secret_name: Some(secret_name.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}
