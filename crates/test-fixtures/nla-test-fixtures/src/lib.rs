//! Scene documents for the NLA proxy tests, looked up by the names listed in
//! `fixtures/manifest.json`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    scenes: HashMap<String, String>,
}

pub mod scenes {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.scenes.keys().cloned().collect()
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = MANIFEST
            .scenes
            .get(name)
            .ok_or_else(|| anyhow!("unknown scene fixture '{name}'"))?;
        Ok(Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(rel))
    }

    /// Parse a scene into any deserializable host type (usually `Document`).
    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let path = path(name)?;
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read scene {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("failed to parse scene '{name}'"))
    }
}
