use serde::{Deserialize, Serialize};

use crate::AggregatedIngredient;

/// One row of the flat export consumed by older list views.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlatIngredientRow {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
    /// Titles of the contributing recipes, deduplicated, comma separated.
    pub recipes: String,
    pub pantry: bool,
}

pub fn to_legacy_format(aggregated: &[AggregatedIngredient]) -> Vec<FlatIngredientRow> {
    aggregated
        .iter()
        .map(|item| {
            let mut titles: Vec<&str> = Vec::new();
            for source in &item.source_recipes {
                if !titles.contains(&source.title.as_str()) {
                    titles.push(&source.title);
                }
            }

            FlatIngredientRow {
                name: item.display_name.clone(),
                quantity: item.total_qty,
                unit: item.unit.clone(),
                category: item.category.to_string(),
                recipes: titles.join(", "),
                pantry: item.is_pantry_staple,
            }
        })
        .collect()
}
