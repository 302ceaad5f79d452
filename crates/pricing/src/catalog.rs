use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use mealcart_shared::normalize_ingredient_name;

#[derive(
    EnumString,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    #[default]
    Medium,
    Low,
}

/// Where a price came from.
#[derive(
    EnumString, Display, AsRefStr, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PriceSource {
    #[default]
    Mapped,
    Scraped,
    UserReported,
    Category,
}

/// A purchasable retail pack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub pack_size: f64,
    pub pack_unit: String,
    pub price: f64,
    #[serde(default)]
    pub confidence: Confidence,
    #[serde(default)]
    pub source: PriceSource,
    #[serde(default)]
    pub store: Option<String>,
    #[serde(default)]
    pub observed_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IngredientMapping {
    pub ingredient: String,
    pub products: Vec<Product>,
    /// The shopper has to pick between several equally valid products.
    #[serde(default)]
    pub requires_user_choice: bool,
}

/// Read-only ingredient to product mapping table, keyed by normalized name.
#[derive(Clone, Debug, Default)]
pub struct ProductCatalog {
    mappings: HashMap<String, IngredientMapping>,
}

impl ProductCatalog {
    pub fn new(mappings: impl IntoIterator<Item = IngredientMapping>) -> Self {
        let mut catalog = Self::default();

        for mut mapping in mappings {
            let key = normalize_ingredient_name(&mapping.ingredient);
            if key.is_empty() || mapping.products.is_empty() {
                tracing::warn!(ingredient = %mapping.ingredient, "ignoring unusable product mapping");
                continue;
            }

            mapping.requires_user_choice |= mapping.products.len() > 1;
            mapping.ingredient = key.clone();
            catalog.mappings.insert(key, mapping);
        }

        catalog
    }

    pub fn from_json(json: &str) -> mealcart_shared::Result<Self> {
        let mappings: Vec<IngredientMapping> = serde_json::from_str(json)?;
        Ok(Self::new(mappings))
    }

    /// Mapping table shipped with the crate.
    pub fn builtin() -> Self {
        Self::from_json(include_str!("../data/product_catalog.json"))
            .expect("embedded product catalog is valid JSON")
    }

    /// Looks up a mapping by normalized name, retrying without a plural
    /// `s`/`es` suffix.
    pub fn get(&self, ingredient: &str) -> Option<&IngredientMapping> {
        let key = normalize_ingredient_name(ingredient);

        self.mappings.get(&key).or_else(|| {
            ["es", "s"]
                .iter()
                .filter_map(|suffix| key.strip_suffix(suffix))
                .find_map(|singular| self.mappings.get(singular))
        })
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
