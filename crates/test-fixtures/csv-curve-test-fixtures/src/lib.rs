use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    csv: HashMap<String, String>,
}

/// Directory every manifest path is relative to.
pub fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn lookup<'a>(map: &'a HashMap<String, String>, kind: &str, name: &str) -> Result<&'a str> {
    map.get(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod csv {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.csv.keys().cloned().collect()
    }

    /// Resource id relative to [`fixtures_root`], without the file extension.
    pub fn id(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.csv, "csv", name)?;
        let path = Path::new(rel);
        let stem = path.with_extension("");
        stem.to_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("fixture path for '{name}' is not UTF-8"))
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.csv, "csv", name)?;
        Ok(resolve_path(rel))
    }

    pub fn bytes(name: &str) -> Result<Vec<u8>> {
        let path = path(name)?;
        fs::read(&path).with_context(|| format!("failed to read fixture at {}", path.display()))
    }

    pub fn text(name: &str) -> Result<String> {
        let path = path(name)?;
        fs::read_to_string(&path)
            .with_context(|| format!("failed to read fixture at {}", path.display()))
    }
}
