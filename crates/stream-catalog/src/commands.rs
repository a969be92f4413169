use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use stream_data::{load, save, streams_as_tree, StreamInfo};
use tracing::info;

use crate::report::{control_rows, ControlRow, StreamSummary};

fn load_catalog(path: &Path) -> Result<Vec<StreamInfo>> {
    load(path).with_context(|| format!("failed to load catalog {}", path.display()))
}

pub fn show(path: &Path) -> Result<Vec<StreamSummary>> {
    let streams = load_catalog(path)?;
    Ok(streams.iter().map(StreamSummary::from).collect())
}

/// Load the catalog and report how many streams it holds.
pub fn check(path: &Path) -> Result<usize> {
    let streams = load_catalog(path)?;
    info!(path = %path.display(), streams = streams.len(), "catalog is valid");
    Ok(streams.len())
}

/// Rewrite the catalog with defaults filled in; in place unless `output` is given.
pub fn normalize(path: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let streams = load_catalog(path)?;
    let target = output.unwrap_or(path);
    save(&streams, target)
        .with_context(|| format!("failed to write catalog {}", target.display()))?;

    info!(
        source = %path.display(),
        target = %target.display(),
        streams = streams.len(),
        "catalog normalized"
    );
    Ok(target.to_path_buf())
}

pub fn export(path: &Path, output: &Path, pretty: bool) -> Result<usize> {
    let streams = load_catalog(path)?;
    let tree = streams_as_tree(&streams);

    let json = if pretty {
        serde_json::to_string_pretty(&tree)?
    } else {
        serde_json::to_string(&tree)?
    };
    fs::write(output, json).context("failed to write export file")?;

    info!(streams = streams.len(), output = %output.display(), "catalog exported");
    Ok(streams.len())
}

pub fn controls(path: &Path, stream: &str) -> Result<Vec<ControlRow>> {
    let streams = load_catalog(path)?;
    let found = streams
        .iter()
        .find(|candidate| candidate.name == stream)
        .with_context(|| format!("no stream named {stream:?} in {}", path.display()))?;
    Ok(control_rows(found))
}
