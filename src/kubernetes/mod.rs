// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes access: CRD discovery and the platform the reconciler talks to.

pub mod crd;
pub mod platform;

pub use crd::wait_for_imageset_crd;
pub use platform::{KubePlatform, SubmitOutcome, WorkloadPlatform};
