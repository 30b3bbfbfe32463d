// src/levels/loader.rs
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{GameError, Result};
use crate::game::level::{Level, Rect};

#[derive(Deserialize, Serialize, Debug)]
pub struct LevelData {
    #[serde(default)]
    pub name: String,
    pub tiles: Vec<Vec<u16>>,
    #[serde(default)]
    pub items: Vec<Vec<String>>,
    #[serde(default)]
    pub next_level: Option<String>,
    #[serde(default)]
    pub solids: Vec<Platform>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy)]
pub struct Platform {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LevelData {
    pub fn into_level(self) -> Result<Level> {
        let mut level = Level::from_rows(self.tiles, self.items)?;
        level.name = self.name;
        level.next_level = self.next_level.filter(|next| !next.trim().is_empty());
        level.solids = self
            .solids
            .into_iter()
            .map(|p| Rect {
                x: p.x,
                y: p.y,
                width: p.width,
                height: p.height,
            })
            .collect();
        Ok(level)
    }
}

// Anything that can hand out levels by reference.
pub trait LevelSource {
    fn load(&self, reference: &str) -> Result<Level>;
}

// Levels stored as JSON files; references are paths relative to `root`.
#[derive(Debug, Clone)]
pub struct LevelLoader {
    root: PathBuf,
}

impl LevelLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl LevelSource for LevelLoader {
    fn load(&self, reference: &str) -> Result<Level> {
        let file = File::open(self.root.join(reference))?;
        let reader = BufReader::new(file);
        let data: LevelData = serde_json::from_reader(reader)?;
        let mut level = data.into_level()?;
        if level.name.is_empty() {
            level.name = reference.to_string();
        }
        tracing::info!(level = %level.name, width = level.width(), height = level.height(), "level loaded");
        Ok(level)
    }
}

// In-memory levels, keyed by reference.
impl LevelSource for HashMap<String, Level> {
    fn load(&self, reference: &str) -> Result<Level> {
        self.get(reference)
            .cloned()
            .ok_or_else(|| GameError::InvalidLevel(format!("no level named {reference}")))
    }
}
