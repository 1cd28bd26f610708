// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use kube::CustomResourceExt;

use imageset_operator::types::ImageSet;

fn main() -> Result<()> {
    let crd = serde_yaml::to_string(&ImageSet::crd()).context("Failed to serialize ImageSet CRD")?;
    print!("{}", crd);
    Ok(())
}
