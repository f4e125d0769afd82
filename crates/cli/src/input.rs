use anyhow::{Context, Result};
use prospect_graph::{Entity, GraphConfig};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Entity snapshot as stored by the app: a bare list or a session object
#[derive(Deserialize)]
#[serde(untagged)]
enum EntityFile {
    List(Vec<Entity>),
    Session {
        #[serde(rename = "savedProspects")]
        saved_prospects: Vec<Entity>,
    },
}

pub fn load_entities(path: &Path) -> Result<Vec<Entity>> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file: EntityFile = serde_json::from_slice(&data)
        .with_context(|| format!("Invalid entity snapshot {}", path.display()))?;

    let entities = match file {
        EntityFile::List(entities) => entities,
        EntityFile::Session { saved_prospects } => saved_prospects,
    };
    log::debug!("Loaded {} entities from {}", entities.len(), path.display());
    Ok(entities)
}

/// Explicit `--config`, then PROSPECT_GRAPH_CONFIG, then defaults
pub fn load_config(explicit: Option<&Path>) -> Result<GraphConfig> {
    let path = explicit
        .map(Path::to_path_buf)
        .or_else(|| env::var("PROSPECT_GRAPH_CONFIG").ok().map(PathBuf::from));

    match path {
        Some(path) => GraphConfig::load(&path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(GraphConfig::default()),
    }
}
