use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

pub const TAG_KID_FRIENDLY: &str = "kid-friendly";
pub const TAG_BULK_COOK: &str = "bulk-cook";
pub const TAG_HIGH_PROTEIN: &str = "high-protein";
pub const TAG_ORGANIC_FRIENDLY: &str = "organic-friendly";

/// Primary protein of a dish, read from its tag set.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Protein {
    Chicken,
    Beef,
    Pork,
    Lamb,
    Turkey,
    Fish,
    Seafood,
    Tofu,
    Legumes,
    Eggs,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
}

impl RecipeIngredient {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            quantity,
            unit: unit.into(),
        }
    }
}

/// A catalog recipe. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub total_time_min: u32,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default)]
    pub cost_per_serve: Option<f64>,
    #[serde(default)]
    pub source: Option<String>,
}

fn default_servings() -> u32 {
    4
}

impl Recipe {
    /// Tag comparison ignores case and treats `-`, `_` and spaces alike.
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = canonical_tag(tag);
        self.tags.iter().any(|t| canonical_tag(t) == wanted)
    }

    /// First tag that names a protein, in tag order.
    pub fn primary_protein(&self) -> Option<Protein> {
        self.tags.iter().find_map(|t| t.trim().parse::<Protein>().ok())
    }

    pub fn native_servings(&self) -> u32 {
        self.servings.max(1)
    }
}

fn canonical_tag(tag: &str) -> String {
    tag.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '_' || c == ' ' { '-' } else { c })
        .collect()
}
