use serde::{Deserialize, Serialize};

/// Tunable scoring weights.
///
/// Immutable once handed to a [`crate::RecipeScorer`]. Penalties are stored as
/// positive magnitudes and subtracted by the scorer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub base_score: f64,
    /// Weeknight dinners longer than this are rejected outright.
    pub weeknight_max_minutes: u32,
    pub favorite_bonus: f64,
    pub recency_penalty: f64,
    /// Charged once per earlier use of the same primary protein this week.
    pub protein_repeat_penalty: f64,
    pub ingredient_reuse_bonus: f64,
    pub pack_reuse_bonus: f64,
    pub pack_reuse_threshold: u32,
    pub cost_bonus_max: f64,
    pub cost_ceiling_per_serve: f64,
    pub bulk_cook_bonus: f64,
    pub preference_bonus: f64,
    pub preferred_source_bonus: f64,
    pub complexity_threshold: usize,
    pub complexity_penalty: f64,
    pub quick_minutes: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base_score: 100.0,
            weeknight_max_minutes: 40,
            favorite_bonus: 20.0,
            recency_penalty: 25.0,
            protein_repeat_penalty: 15.0,
            ingredient_reuse_bonus: 3.0,
            pack_reuse_bonus: 10.0,
            pack_reuse_threshold: 2,
            cost_bonus_max: 15.0,
            cost_ceiling_per_serve: 8.0,
            bulk_cook_bonus: 5.0,
            preference_bonus: 5.0,
            preferred_source_bonus: 5.0,
            complexity_threshold: 10,
            complexity_penalty: 2.0,
            quick_minutes: 30,
        }
    }
}

impl ScoringWeights {
    pub fn validate(&self) -> Result<(), String> {
        if self.weeknight_max_minutes == 0 {
            return Err("weeknight_max_minutes must be greater than 0".to_string());
        }

        if self.cost_ceiling_per_serve <= 0.0 {
            return Err("cost_ceiling_per_serve must be positive".to_string());
        }

        if self.pack_reuse_threshold == 0 {
            return Err("pack_reuse_threshold must be at least 1".to_string());
        }

        Ok(())
    }
}
