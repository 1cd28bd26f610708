// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// The operator name, used as field manager and in the managed-by label
pub const OPERATOR_NAME: &str = "imageset-operator";

/// Prefix of the Job created for each ImageSet
pub const JOB_NAME_PREFIX: &str = "handle-images-";

/// Labels stamped on every Job the operator creates
pub mod labels {
    pub const MANAGED_BY: &str = "app.kubernetes.io/managed-by";
    /// Name of the owning ImageSet
    pub const IMAGE_SET: &str = "images.example.com/imageset";
}

/// Registry credentials mounted into the copy Job
pub mod credentials {
    pub const SOURCE_SECRET_NAME: &str = "source-registry-image-pull-secret";
    pub const TARGET_SECRET_NAME: &str = "target-registry-image-push-secret";

    pub const SOURCE_VOLUME: &str = "source-secret";
    pub const TARGET_VOLUME: &str = "target-secret";

    pub const SOURCE_MOUNT_PATH: &str = "/etc/secret/source";
    pub const TARGET_MOUNT_PATH: &str = "/etc/secret/target";

    /// File names of the secret keys inside each mount
    pub const USERNAME_FILE: &str = "username";
    pub const PASSWORD_FILE: &str = "password";
}

/// Copy Job container defaults
pub mod job {
    pub const CONTAINER_NAME: &str = "image-handler";
    pub const RESTART_POLICY: &str = "OnFailure";
    pub const DEFAULT_RUNNER_IMAGE: &str = "docker:latest";
}

/// Registry hosts used when none are configured
pub mod registry {
    pub const DEFAULT_SOURCE: &str = "registry-1";
    pub const DEFAULT_TARGET: &str = "registry-2";
}

/// Requeue delay after a failed reconcile
pub const ERROR_REQUEUE_SECS: u64 = 60;

/// CRD polling configuration
pub mod crd {
    /// Initial polling interval in seconds when waiting for CRD
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}
