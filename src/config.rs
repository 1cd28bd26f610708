// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Context, Result};
use std::env;
use url::Url;

use crate::constants::{job, registry};

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Registry host images are pulled from
    pub source_registry: String,
    /// Registry host images are pushed to
    pub target_registry: String,
    /// Image of the container that runs the copy script
    pub runner_image: String,
    /// Only watch ImageSets in this namespace; all namespaces when unset
    pub watch_namespace: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source_registry: registry::DEFAULT_SOURCE.to_string(),
            target_registry: registry::DEFAULT_TARGET.to_string(),
            runner_image: job::DEFAULT_RUNNER_IMAGE.to_string(),
            watch_namespace: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let source_registry = lookup("SOURCE_REGISTRY").unwrap_or(defaults.source_registry);
        validate_registry_host(&source_registry).context("SOURCE_REGISTRY is invalid")?;

        let target_registry = lookup("TARGET_REGISTRY").unwrap_or(defaults.target_registry);
        validate_registry_host(&target_registry).context("TARGET_REGISTRY is invalid")?;

        let runner_image = lookup("RUNNER_IMAGE")
            .filter(|i| !i.trim().is_empty())
            .unwrap_or(defaults.runner_image);

        let watch_namespace = lookup("WATCH_NAMESPACE").filter(|ns| !ns.trim().is_empty());

        Ok(Config {
            source_registry,
            target_registry,
            runner_image,
            watch_namespace,
        })
    }
}

/// A registry must be a bare `host[:port]`: no scheme, credentials, or path
fn validate_registry_host(host: &str) -> Result<()> {
    if host.is_empty() || host.trim() != host {
        bail!("registry host '{}' is empty or padded with whitespace", host);
    }
    if host.contains("://") {
        bail!("registry host '{}' must not include a scheme", host);
    }

    let parsed = Url::parse(&format!("registry://{}", host))
        .with_context(|| format!("registry host '{}' cannot be parsed", host))?;

    let bare = parsed.host_str().is_some()
        && parsed.username().is_empty()
        && parsed.password().is_none()
        && parsed.path().is_empty()
        && parsed.query().is_none()
        && parsed.fragment().is_none();
    if !bare {
        bail!("registry host '{}' must be of the form host[:port]", host);
    }

    Ok(())
}
