use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use super::merge::merge_graphs;
use super::model::LinkGraph;
use super::parse::parse_beacon_log;

/// How a freshly parsed log combines with an existing graph file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum UpdateMode {
    /// Merge into whatever the output file already holds.
    Append,
    /// Replace the output file with the fresh parse.
    Overwrite,
}

/// Read the persisted graph wholesale. A missing file or an undecodable
/// document yields an empty graph for the given operator; loading never fails.
pub fn load_graph(path: &Path, mycall: &str) -> LinkGraph {
    let Ok(raw) = fs::read_to_string(path) else {
        return LinkGraph::empty(mycall);
    };

    match serde_json::from_str::<LinkGraph>(&raw) {
        Ok(graph) if !graph.mycall.is_empty() => graph,
        Ok(mut graph) => {
            graph.mycall = mycall.to_ascii_uppercase();
            graph
        }
        Err(_) => LinkGraph::empty(mycall),
    }
}

/// Persist the graph atomically: encode, write a sibling temp file, rename
/// over the target. A failed write leaves the previous document intact.
pub fn save_graph(path: &Path, graph: &LinkGraph) -> Result<()> {
    let encoded = serde_json::to_string_pretty(graph).context("failed to encode heard graph")?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("heard_graph.json");
    let tmp_path = path.with_file_name(format!(".{file_name}.tmp"));

    fs::write(&tmp_path, encoded)
        .with_context(|| format!("failed to write {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}

/// One full update cycle: parse the input log, combine per `mode`, rewrite
/// the output file, and return the graph that was written.
pub fn update_graph_file(
    input: &Path,
    output: &Path,
    mycall: &str,
    mode: UpdateMode,
) -> Result<LinkGraph> {
    let raw = fs::read_to_string(input)
        .with_context(|| format!("failed to read beacon log {}", input.display()))?;
    let fresh = parse_beacon_log(&raw, mycall);

    let merged = match mode {
        UpdateMode::Append => merge_graphs(&load_graph(output, mycall), &fresh, mycall),
        UpdateMode::Overwrite => fresh,
    };

    save_graph(output, &merged)?;
    Ok(merged)
}
