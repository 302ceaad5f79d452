//! JSON file inputs for the command line.

use std::path::{Path, PathBuf};

use anyhow::Context;
use mealcart_shared::{Household, HouseholdProvider, InMemoryCatalog, WeekPlan};

pub fn load_recipes(path: &Path) -> anyhow::Result<InMemoryCatalog> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading recipes from {}", path.display()))?;

    InMemoryCatalog::from_json(&json)
        .with_context(|| format!("parsing recipes from {}", path.display()))
}

pub fn load_plan(path: &Path) -> anyhow::Result<WeekPlan> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading week plan from {}", path.display()))?;

    serde_json::from_str(&json).with_context(|| format!("parsing week plan from {}", path.display()))
}

/// Household state stored as a JSON document.
#[derive(Clone, Debug)]
pub struct JsonHouseholdFile {
    path: PathBuf,
}

impl JsonHouseholdFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HouseholdProvider for JsonHouseholdFile {
    fn load_household(&self) -> anyhow::Result<Household> {
        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading household from {}", self.path.display()))?;

        serde_json::from_str(&json)
            .with_context(|| format!("parsing household from {}", self.path.display()))
    }
}
