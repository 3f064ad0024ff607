//! Project file loading

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use worktrack_model::Project;

#[derive(Deserialize)]
#[serde(untagged)]
enum ProjectFile {
    Many(Vec<Project>),
    One(Box<Project>),
}

/// Read a JSON file holding one project or a list of projects.
pub fn load_projects(path: &Path) -> anyhow::Result<Vec<Project>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_projects(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Parse one project or a list of projects from JSON text.
pub fn parse_projects(json: &str) -> anyhow::Result<Vec<Project>> {
    let projects = match serde_json::from_str::<ProjectFile>(json)? {
        ProjectFile::Many(projects) => projects,
        ProjectFile::One(project) => vec![*project],
    };
    tracing::info!("Loaded {} projects", projects.len());
    Ok(projects)
}
