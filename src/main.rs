// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use tracing::info;

use imageset_operator::config::Config;
use imageset_operator::kubernetes::{wait_for_imageset_crd, KubePlatform};
use imageset_operator::reconcilers::ImageSetReconciler;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting ImageSet operator");

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: source_registry={}, target_registry={}, runner_image={}, watch_namespace={}",
        config.source_registry,
        config.target_registry,
        config.runner_image,
        config.watch_namespace.as_deref().unwrap_or("<all>")
    );

    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    info!("Waiting for ImageSet CRD to become available...");
    wait_for_imageset_crd(&client).await?;

    let reconciler = ImageSetReconciler::new(KubePlatform::new(client), &config);

    info!("Starting ImageSet reconciler...");
    reconciler.run(config.watch_namespace.clone()).await?;

    info!("ImageSet reconciler stopped");
    Ok(())
}
