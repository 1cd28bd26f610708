// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::{CustomResource, ResourceExt};
use serde::{Deserialize, Serialize};

use crate::constants::JOB_NAME_PREFIX;

/// A list of images to copy from the source registry to the target registry
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "images.example.com", version = "v1", kind = "ImageSet")]
#[kube(namespaced)]
#[kube(status = "ImageSetStatus")]
#[serde(rename_all = "camelCase")]
pub struct ImageSetSpec {
    /// Image references relative to a registry, e.g. `library/nginx:1.27`
    #[serde(default)]
    pub images: Vec<String>,
}

/// Reserved for observed state; the operator does not write it yet
#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
pub struct ImageSetStatus {}

impl ImageSet {
    /// Name of the Job that copies this ImageSet's images
    pub fn job_name(&self) -> String {
        job_name_for(&self.name_any())
    }
}

/// Job name derived from an ImageSet name
pub fn job_name_for(image_set_name: &str) -> String {
    format!("{}{}", JOB_NAME_PREFIX, image_set_name)
}
