// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Shell script that logs into both registries and copies every image.

use crate::config::Config;
use crate::constants::credentials::{
    PASSWORD_FILE, SOURCE_MOUNT_PATH, TARGET_MOUNT_PATH, USERNAME_FILE,
};
use crate::error::{OperatorError, Result};

/// Aborts the script on the first failing command
const FAIL_FAST: &str = "set -e";

/// Builds the copy script for a list of images
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptBuilder {
    source_registry: String,
    target_registry: String,
}

impl ScriptBuilder {
    pub fn new(source_registry: impl Into<String>, target_registry: impl Into<String>) -> Self {
        Self {
            source_registry: source_registry.into(),
            target_registry: target_registry.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.source_registry, &config.target_registry)
    }

    /// Command lines of the script: two logins, then pull/tag/push per image.
    /// Always `2 + 3 * images.len()` lines long.
    ///
    /// Every image is checked with [`validate_image_reference`] first; nothing
    /// is built when one of them is rejected.
    pub fn commands<S: AsRef<str>>(&self, images: &[S]) -> Result<Vec<String>> {
        for image in images {
            validate_image_reference(image.as_ref())?;
        }

        let mut commands = Vec::with_capacity(2 + 3 * images.len());
        commands.push(login(&self.source_registry, SOURCE_MOUNT_PATH));
        commands.push(login(&self.target_registry, TARGET_MOUNT_PATH));

        for image in images {
            let image = image.as_ref();
            let source = format!("{}/{}", self.source_registry, image);
            let target = format!("{}/{}", self.target_registry, image);

            commands.push(format!("docker pull {}", source));
            commands.push(format!("docker tag {} {}", source, target));
            commands.push(format!("docker push {}", target));
        }

        Ok(commands)
    }

    /// The full script, fail-fast directive first, one command per line
    pub fn build<S: AsRef<str>>(&self, images: &[S]) -> Result<String> {
        let mut script = String::from(FAIL_FAST);
        for command in self.commands(images)? {
            script.push('\n');
            script.push_str(&command);
        }
        Ok(script)
    }
}

/// Accept only `[A-Za-z0-9._/:@-]`, so an image can never end a command or
/// start a new one inside `sh -c`.
pub fn validate_image_reference(image: &str) -> Result<()> {
    let invalid = |reason| Err(OperatorError::InvalidImageReference(image.to_string(), reason));

    if image.is_empty() {
        return invalid("empty");
    }
    if image.starts_with('-') {
        return invalid("starts with '-'");
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '/' | ':' | '@' | '-');
    if !image.chars().all(allowed) {
        return invalid("contains characters outside [A-Za-z0-9._/:@-]");
    }

    Ok(())
}

fn login(registry: &str, mount_path: &str) -> String {
    format!(
        "docker login {} --username \"$(cat {}/{})\" --password-stdin < {}/{}",
        registry, mount_path, USERNAME_FILE, mount_path, PASSWORD_FILE
    )
}
