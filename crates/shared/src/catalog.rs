use std::collections::HashMap;

use crate::Recipe;

/// Lookup into the recipe catalog owned outside the core.
pub trait RecipeCatalog {
    fn get_recipe_by_id(&self, id: &str) -> Option<Recipe>;
}

/// Catalog held in memory, preserving load order.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalog {
    recipes: Vec<Recipe>,
    index: HashMap<String, usize>,
}

impl InMemoryCatalog {
    pub fn new(recipes: impl IntoIterator<Item = Recipe>) -> crate::Result<Self> {
        let mut catalog = Self::default();

        for recipe in recipes {
            if catalog.index.contains_key(&recipe.id) {
                crate::bail!("duplicate recipe id '{}'", recipe.id);
            }
            catalog.index.insert(recipe.id.clone(), catalog.recipes.len());
            catalog.recipes.push(recipe);
        }

        Ok(catalog)
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        let recipes: Vec<Recipe> = serde_json::from_str(json)?;
        Self::new(recipes)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl RecipeCatalog for InMemoryCatalog {
    fn get_recipe_by_id(&self, id: &str) -> Option<Recipe> {
        self.index.get(id).map(|&i| self.recipes[i].clone())
    }
}
