use std::collections::{HashMap, HashSet};

use mealcart_shared::{Household, Protein, Recipe, reuse_key};

/// Per-call scoring input. Built fresh for each evaluation, never persisted.
#[derive(Clone, Debug)]
pub struct ScoringContext<'a> {
    pub household: &'a Household,
    pub is_weekend: bool,
    pub selected_recipe_ids: Vec<String>,
    pub protein_usage: HashMap<Protein, u32>,
    /// Keyed by [`reuse_key`].
    pub ingredient_usage: HashMap<String, u32>,
    pub recent_recipe_ids: HashSet<String>,
    pub preferred_source: Option<String>,
}

impl<'a> ScoringContext<'a> {
    pub fn new(household: &'a Household, is_weekend: bool) -> Self {
        Self {
            household,
            is_weekend,
            selected_recipe_ids: Vec::new(),
            protein_usage: HashMap::new(),
            ingredient_usage: HashMap::new(),
            recent_recipe_ids: HashSet::new(),
            preferred_source: None,
        }
    }

    pub fn with_recent(mut self, ids: impl IntoIterator<Item = String>) -> Self {
        self.recent_recipe_ids.extend(ids);
        self
    }

    pub fn with_preferred_source(mut self, source: Option<String>) -> Self {
        self.preferred_source = source;
        self
    }

    /// Folds a chosen recipe into the week's usage counters.
    pub fn record_selection(&mut self, recipe: &Recipe) {
        self.selected_recipe_ids.push(recipe.id.clone());

        if let Some(protein) = recipe.primary_protein() {
            *self.protein_usage.entry(protein).or_default() += 1;
        }

        for key in recipe_reuse_keys(recipe) {
            *self.ingredient_usage.entry(key).or_default() += 1;
        }
    }

    pub fn protein_uses(&self, protein: Protein) -> u32 {
        self.protein_usage.get(&protein).copied().unwrap_or(0)
    }

    pub fn ingredient_uses(&self, key: &str) -> u32 {
        self.ingredient_usage.get(key).copied().unwrap_or(0)
    }
}

/// Reuse keys of a recipe with how many of its ingredients map to each, in
/// first-seen order.
pub(crate) fn reuse_key_counts(recipe: &Recipe) -> Vec<(String, u32)> {
    let mut counts: Vec<(String, u32)> = Vec::new();

    for name in recipe.ingredients.iter().filter_map(|i| i.name.as_deref()) {
        let Some(key) = reuse_key(name) else {
            continue;
        };

        match counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => counts.push((key, 1)),
        }
    }

    counts
}

fn recipe_reuse_keys(recipe: &Recipe) -> impl Iterator<Item = String> {
    reuse_key_counts(recipe).into_iter().map(|(key, _)| key)
}

#[cfg(test)]
mod tests {
    use mealcart_shared::RecipeIngredient;

    use super::*;

    #[test]
    fn test_record_selection_counts_distinct_keys() {
        let household = Household::default();
        let mut context = ScoringContext::new(&household, false);

        let recipe = Recipe {
            id: "stir-fry".to_string(),
            title: "Stir fry".to_string(),
            ingredients: vec![
                RecipeIngredient::new("Brown onion, diced", 1.0, ""),
                RecipeIngredient::new("brown onion", 1.0, ""),
                RecipeIngredient::new("chicken thigh fillets", 500.0, "g"),
            ],
            tags: vec!["chicken".to_string()],
            total_time_min: 25,
            servings: 4,
            cost_per_serve: None,
            source: None,
        };

        context.record_selection(&recipe);

        assert_eq!(context.selected_recipe_ids, vec!["stir-fry".to_string()]);
        assert_eq!(context.protein_uses(Protein::Chicken), 1);
        assert_eq!(context.ingredient_uses("brown onion"), 1);
        assert_eq!(context.ingredient_uses("chicken thigh"), 1);
        assert_eq!(reuse_key_counts(&recipe)[0], ("brown onion".to_string(), 2));
    }
}
