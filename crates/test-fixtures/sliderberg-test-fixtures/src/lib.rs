//! Shared fixtures for SliderBerg tests: markup presets, an in-memory DOM
//! host and a harness driving a registry against it on a fake clock.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub mod dom;
pub mod harness;

pub use dom::{ListenerRecord, MockDom, NodeId, ObserverKind, StyleWrite, BODY, FRAME_MS};
pub use harness::{Harness, Mounted, SETTLE_MS};

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    sliders: HashMap<String, String>,
}

/// Markup for one slider block.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderMarkup {
    #[serde(default)]
    pub wrapper_id: Option<String>,
    pub slides: usize,
    /// `data-*` configuration placed on the slides container.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default = "enabled")]
    pub prev_next: bool,
    #[serde(default = "enabled")]
    pub indicators: bool,
    /// Older blocks nest a second slides container inside the first.
    #[serde(default)]
    pub legacy: bool,
    /// Rendered slide heights in px; missing entries default to 300.
    #[serde(default)]
    pub slide_heights: Vec<f64>,
}

fn enabled() -> bool {
    true
}

impl SliderMarkup {
    pub fn new(slides: usize) -> Self {
        Self {
            wrapper_id: None,
            slides,
            attributes: BTreeMap::new(),
            prev_next: true,
            indicators: true,
            legacy: false,
            slide_heights: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.wrapper_id = Some(id.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod sliders {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.sliders.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.sliders, "slider", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.sliders, "slider", name)?;
        super::load_json(rel)
    }

    pub fn markup(name: &str) -> Result<SliderMarkup> {
        load(name)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.sliders, "slider", name)?;
        Ok(resolve_path(rel))
    }
}
