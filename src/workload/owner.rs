// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Controller owner references, so deleting an ImageSet garbage-collects its Job.

use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::{Resource, ResourceExt};

use crate::error::{OperatorError, Result};
use crate::types::ImageSet;

/// Make `owner` the controller of `job`.
///
/// Fails when the owner has no name or uid yet, when the two objects live in
/// different namespaces, or when another object already controls the job.
/// Binding the same owner twice replaces the earlier reference.
pub fn set_controller_reference(owner: &ImageSet, job: &mut Job) -> Result<()> {
    let owner_ref = OwnerReference {
        block_owner_deletion: Some(true),
        ..owner.controller_owner_ref(&()).ok_or_else(|| {
            OperatorError::OwnershipBinding(format!(
                "ImageSet '{}' has no name or uid",
                owner.name_any()
            ))
        })?
    };

    if owner.namespace() != job.namespace() {
        return Err(OperatorError::OwnershipBinding(format!(
            "ImageSet {}/{} cannot own Job in namespace {}",
            owner.namespace().unwrap_or_default(),
            owner.name_any(),
            job.namespace().unwrap_or_default()
        )));
    }

    let references = job.metadata.owner_references.get_or_insert_with(Vec::new);

    if let Some(other) = references
        .iter()
        .find(|r| r.controller == Some(true) && r.uid != owner_ref.uid)
    {
        return Err(OperatorError::OwnershipBinding(format!(
            "Job is already controlled by {} '{}'",
            other.kind, other.name
        )));
    }

    references.retain(|r| r.uid != owner_ref.uid);
    references.push(owner_ref);
    Ok(())
}
