// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OperatorError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to fetch ImageSet {0}: {1}")]
    FetchFailed(String, #[source] kube::Error),

    #[error("Failed to look up Job {0}: {1}")]
    JobLookupFailed(String, #[source] kube::Error),

    #[error("Failed to submit Job {0}: {1}")]
    SubmitFailed(String, #[source] kube::Error),

    #[error("Failed to set owner reference: {0}")]
    OwnershipBinding(String),

    #[error("Object is missing {0}")]
    MissingObjectKey(&'static str),

    #[error("Invalid image reference {0:?}: {1}")]
    InvalidImageReference(String, &'static str),
}

pub type Result<T> = std::result::Result<T, OperatorError>;
