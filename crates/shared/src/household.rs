use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DietaryFlags {
    /// Weeknight dinners must carry the kid-friendly tag.
    pub kid_friendly: bool,
    pub high_protein: bool,
    pub organic: bool,
}

/// Household state supplied as scoring input. Never mutated by the core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Household {
    pub adults: u32,
    pub children: u32,
    pub dietary: DietaryFlags,
    pub favorite_recipe_ids: HashSet<String>,
    pub pantry_items: Vec<String>,
    /// Normalized ingredient names the user always keeps stocked.
    pub pantry_preferences: HashSet<String>,
}

impl Default for Household {
    fn default() -> Self {
        Household {
            adults: 2,
            children: 0,
            dietary: DietaryFlags::default(),
            favorite_recipe_ids: HashSet::new(),
            pantry_items: Vec::new(),
            pantry_preferences: HashSet::new(),
        }
    }
}

impl Household {
    pub fn members(&self) -> u32 {
        (self.adults + self.children).max(1)
    }

    pub fn is_favorite(&self, recipe_id: &str) -> bool {
        self.favorite_recipe_ids.contains(recipe_id)
    }

    pub fn requires_kid_friendly(&self) -> bool {
        self.dietary.kid_friendly
    }
}

/// Source of pantry and favorites state.
pub trait HouseholdProvider: Send + Sync {
    fn load_household(&self) -> anyhow::Result<Household>;
}

/// Provider over a fixed household value.
#[derive(Clone, Debug, Default)]
pub struct StaticHousehold(pub Household);

impl HouseholdProvider for StaticHousehold {
    fn load_household(&self) -> anyhow::Result<Household> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_members_never_zero() {
        let household = Household {
            adults: 0,
            children: 0,
            ..Default::default()
        };
        assert_eq!(household.members(), 1);

        let family = Household {
            adults: 2,
            children: 3,
            ..Default::default()
        };
        assert_eq!(family.members(), 5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let household: Household =
            serde_json::from_str(r#"{"children":2,"dietary":{"kid_friendly":true}}"#).unwrap();
        assert_eq!(household.adults, 2);
        assert!(household.requires_kid_friendly());
        assert!(!household.dietary.organic);
    }
}
