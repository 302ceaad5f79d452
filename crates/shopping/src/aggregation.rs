//! Week plan to shopping list aggregation.
//!
//! Folds every cooked day of a plan into one entry per normalized ingredient
//! name and base unit. Quantities are summed in base units and only upgraded
//! for display once the fold is complete.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use validator::Validate;

use mealcart_shared::text::capitalize;
use mealcart_shared::{
    Analytics, AnalyticsEvent, Household, Recipe, RecipeCatalog, WeekPlan,
    normalize_ingredient_name,
};
use mealcart_units::{
    UnitFamily, canonical_unit, format_for_display, normalize_to_base_unit, round_to_places,
    unit_family,
};

use crate::{CategorizationService, Category, ShoppingListError};

/// Pantry state applied while aggregating.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationOptions {
    /// Items on hand, as the user typed them.
    pub pantry_items: Vec<String>,
    /// Normalized names the user always keeps stocked.
    pub pantry_preferences: HashSet<String>,
}

impl AggregationOptions {
    pub fn from_household(household: &Household) -> Self {
        Self {
            pantry_items: household.pantry_items.clone(),
            pantry_preferences: household.pantry_preferences.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceRecipe {
    pub recipe_id: String,
    pub title: String,
    pub quantity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AggregatedIngredient {
    /// Normalized name, shared with pricing lookups.
    pub name: String,
    pub display_name: String,
    pub total_qty: f64,
    pub unit: String,
    pub category: Category,
    pub source_recipes: Vec<SourceRecipe>,
    pub is_pantry_staple: bool,
    /// Unrounded total in the unit it was summed in. Pack math uses this,
    /// `total_qty`/`unit` are for display.
    #[serde(skip)]
    pub base_qty: f64,
    #[serde(skip)]
    pub base_unit: String,
}

/// Pantry lookups built once per aggregation.
struct Pantry {
    items: Vec<String>,
    preferences: HashSet<String>,
}

impl Pantry {
    fn new(options: &AggregationOptions) -> Self {
        Self {
            items: options
                .pantry_items
                .iter()
                .map(|i| normalize_ingredient_name(i))
                .filter(|i| !i.is_empty())
                .collect(),
            preferences: options
                .pantry_preferences
                .iter()
                .map(|p| normalize_ingredient_name(p))
                .collect(),
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.preferences.contains(name) || self.items.iter().any(|item| same_item(item, name))
    }
}

/// Exact match, tolerating a plural `s`/`es` on either side.
fn same_item(a: &str, b: &str) -> bool {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    matches!(long.strip_prefix(short), Some("" | "s" | "es"))
}

/// Builds shopping lists from week plans using a recipe catalog.
pub struct IngredientAggregationService<'a, C: RecipeCatalog + ?Sized> {
    catalog: &'a C,
    analytics: Analytics,
}

impl<'a, C: RecipeCatalog + ?Sized> IngredientAggregationService<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self {
            catalog,
            analytics: Analytics::disabled(),
        }
    }

    pub fn with_analytics(mut self, analytics: Analytics) -> Self {
        self.analytics = analytics;
        self
    }

    pub fn aggregate_shopping_list(
        &self,
        plan: &WeekPlan,
        options: &AggregationOptions,
    ) -> Result<Vec<AggregatedIngredient>, ShoppingListError> {
        plan.validate()?;

        let pantry = Pantry::new(options);
        let mut list = ShoppingListBuilder::default();

        for day in &plan.days {
            if day.leftover {
                continue;
            }

            let Some(recipe_id) = day.recipe_id.as_deref() else {
                continue;
            };

            let Some(recipe) = self.catalog.get_recipe_by_id(recipe_id) else {
                tracing::warn!(recipe_id, date = %day.date, "planned recipe not found, skipping day");
                continue;
            };

            let scale = f64::from(day.servings) / f64::from(recipe.native_servings());
            self.add_recipe(&mut list, &recipe, scale, &pantry);
        }

        Ok(list.finish())
    }

    fn add_recipe(
        &self,
        list: &mut ShoppingListBuilder,
        recipe: &Recipe,
        scale: f64,
        pantry: &Pantry,
    ) {
        for ingredient in &recipe.ingredients {
            let Some(raw_name) = ingredient.name.as_deref() else {
                tracing::warn!(recipe_id = %recipe.id, "ingredient without a name, skipping");
                continue;
            };

            let name = normalize_ingredient_name(raw_name);
            if name.is_empty() {
                tracing::warn!(
                    recipe_id = %recipe.id,
                    ingredient = raw_name,
                    "ingredient name empty after normalization, skipping"
                );
                continue;
            }

            let measure = normalize_to_base_unit(ingredient.quantity * scale, &ingredient.unit);
            let unit = canonical_unit(&measure.unit);
            let is_pantry = pantry.contains(&name);
            let entry = list.merge(&name, measure.quantity, &unit, recipe, is_pantry);

            if entry.source_recipes.len() >= 2 {
                self.analytics.record(AnalyticsEvent::IngredientReused {
                    ingredient: entry.name.clone(),
                    recipe_count: entry.source_recipes.len(),
                    recipe_ids: entry
                        .source_recipes
                        .iter()
                        .map(|s| s.recipe_id.clone())
                        .collect(),
                });
            }
        }
    }
}

#[derive(Default)]
struct ShoppingListBuilder {
    entries: Vec<AggregatedIngredient>,
    /// Map key -> entry index. The plain normalized name is taken by the
    /// first unit seen, other units get a qualified key.
    index: HashMap<String, usize>,
}

impl ShoppingListBuilder {
    fn merge(
        &mut self,
        name: &str,
        quantity: f64,
        unit: &str,
        recipe: &Recipe,
        is_pantry: bool,
    ) -> &AggregatedIngredient {
        let source = SourceRecipe {
            recipe_id: recipe.id.clone(),
            title: recipe.title.clone(),
            quantity,
        };

        let existing = match self.index.get(name) {
            Some(&i) if self.entries[i].unit == unit => Some(i),
            Some(_) => {
                let qualified = qualified_key(name, unit);
                if !self.index.contains_key(&qualified) {
                    tracing::debug!(ingredient = name, unit, "mixed units, keeping a separate entry");
                }
                self.index.get(&qualified).copied()
            }
            None => None,
        };

        let i = match existing {
            Some(i) => {
                let entry = &mut self.entries[i];
                entry.total_qty += quantity;
                entry.is_pantry_staple |= is_pantry;
                entry.source_recipes.push(source);
                i
            }
            None => {
                let key = if self.index.contains_key(name) {
                    qualified_key(name, unit)
                } else {
                    name.to_string()
                };

                let display_name = capitalize(&key);

                self.entries.push(AggregatedIngredient {
                    name: name.to_string(),
                    display_name,
                    total_qty: quantity,
                    unit: unit.to_string(),
                    category: CategorizationService::categorize(name),
                    source_recipes: vec![source],
                    is_pantry_staple: is_pantry,
                    base_qty: quantity,
                    base_unit: unit.to_string(),
                });
                self.index.insert(key, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };

        &self.entries[i]
    }

    fn finish(self) -> Vec<AggregatedIngredient> {
        let mut entries: Vec<AggregatedIngredient> = self
            .entries
            .into_iter()
            .map(|mut entry| {
                entry.base_qty = entry.total_qty;
                entry.base_unit = entry.unit.clone();

                let display = format_for_display(entry.total_qty, &entry.unit);
                entry.total_qty = round_to_places(display.quantity, 1);
                entry.unit = display.unit;
                for source in &mut entry.source_recipes {
                    source.quantity = round_to_places(source.quantity, 1);
                }
                entry
            })
            .collect();

        entries.sort_by(|a, b| {
            a.category
                .as_ref()
                .cmp(b.category.as_ref())
                .then_with(|| a.display_name.cmp(&b.display_name))
        });

        entries
    }
}

fn qualified_key(name: &str, unit: &str) -> String {
    let label = match unit_family(unit) {
        Some(UnitFamily::Weight) => "by weight",
        Some(UnitFamily::Volume) => "by volume",
        Some(UnitFamily::Count) => "by count",
        None => unit,
    };

    format!("{name} ({label})")
}
