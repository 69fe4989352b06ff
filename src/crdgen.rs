/*
* Copyright (C) 2025 Pedro Henrique / phkaiser13
*
* File: src/crdgen.rs
*
* This binary emits the CustomResourceDefinition manifest for the
* `ClusterPermission` API as YAML. The schema embedded in the manifest is
* generated from the Rust types, so the manifest applied to the cluster and
* the types the operator compiles against can never drift apart.
*
* Usage: `crdgen [output-path]` — with no argument the manifest goes to
* stdout. Log verbosity is controlled via RUST_LOG.
*
* SPDX-License-Identifier: Apache-2.0
*/

use std::env;
use std::fs;

use anyhow::{Context, Result};
use kube::CustomResourceExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clusterpermission_api::{ClusterPermission, SCHEME};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    for kind in SCHEME.kinds() {
        info!(kind = %kind, "registered kind");
    }

    let manifest = serde_yaml::to_string(&ClusterPermission::crd())
        .context("Failed to serialize the ClusterPermission CRD to YAML")?;

    match env::args().nth(1) {
        Some(path) => {
            fs::write(&path, &manifest)
                .with_context(|| format!("Failed to write CRD manifest to '{}'", path))?;
            info!(path = %path, "CRD manifest written");
        }
        None => print!("{manifest}"),
    }

    Ok(())
}
