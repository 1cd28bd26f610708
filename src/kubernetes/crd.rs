// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! CRD availability checking utilities

use crate::constants::crd::{POLL_INTERVAL_SECS, POLL_MAX_INTERVAL_SECS};
use crate::error::Result;
use crate::types::ImageSet;
use kube::{discovery::Discovery, Client, Resource};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Wait for the ImageSet CRD to be served by the API server.
/// This uses exponential backoff starting at POLL_INTERVAL_SECS seconds.
pub async fn wait_for_imageset_crd(client: &Client) -> Result<()> {
    let mut interval = POLL_INTERVAL_SECS;
    let group = ImageSet::group(&());
    let version = ImageSet::version(&());

    loop {
        match check_imageset_crd_exists(client).await {
            Ok(true) => {
                info!("ImageSet CRD ({}/{}) is available", group, version);
                return Ok(());
            }
            Ok(false) => {
                info!(
                    "ImageSet CRD ({}/{}) not yet available, waiting {} seconds...",
                    group, version, interval
                );
            }
            Err(e) => {
                warn!(
                    "Error checking for ImageSet CRD: {}, retrying in {} seconds...",
                    e, interval
                );
            }
        }

        sleep(Duration::from_secs(interval)).await;

        // Exponential backoff with max cap
        interval = (interval * 2).min(POLL_MAX_INTERVAL_SECS);
    }
}

/// Check if the ImageSet CRD exists by attempting to discover it.
async fn check_imageset_crd_exists(client: &Client) -> Result<bool> {
    let group = ImageSet::group(&());
    let discovery = Discovery::new(client.clone())
        .filter(&[&*group])
        .run()
        .await?;

    for api_group in discovery.groups() {
        if api_group.name() == group {
            for (ar, _) in api_group.recommended_resources() {
                if ar.kind == ImageSet::kind(&()) && ar.version == ImageSet::version(&()) {
                    return Ok(true);
                }
            }
        }
    }

    Ok(false)
}
