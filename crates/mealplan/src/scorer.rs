//! Two-stage recipe scoring: hard filters first, then an additive soft score.
//!
//! A hard filter short-circuits to a zero score carrying only the blocking
//! reason. Otherwise the score starts at the configured base and every rule
//! adds or subtracts independently, so the result does not depend on rule
//! order. The final score is clamped at zero.

use serde::Serialize;
use strum::{AsRefStr, Display};

use mealcart_shared::text::capitalize;
use mealcart_shared::{
    Recipe, TAG_BULK_COOK, TAG_HIGH_PROTEIN, TAG_KID_FRIENDLY, TAG_ORGANIC_FRIENDLY,
};

use crate::context::reuse_key_counts;
use crate::{ScoringContext, ScoringWeights};

#[derive(Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HardFilter {
    #[strum(serialize = "Too long for a weeknight")]
    WeeknightTime,
    #[strum(serialize = "Not kid-friendly")]
    NotKidFriendly,
}

/// Qualitative labels for the UI, independent of the numeric score.
#[derive(Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ReasonTag {
    #[strum(serialize = "favorite")]
    #[serde(rename = "favorite")]
    Favorite,
    #[strum(serialize = "≤30m")]
    #[serde(rename = "≤30m")]
    Quick,
    #[strum(serialize = "best value")]
    #[serde(rename = "best value")]
    BestValue,
    #[strum(serialize = "reuses ingredients")]
    #[serde(rename = "reuses ingredients")]
    ReusesIngredients,
    #[strum(serialize = "bulk cook")]
    #[serde(rename = "bulk cook")]
    BulkCook,
    #[strum(serialize = "kid-friendly")]
    #[serde(rename = "kid-friendly")]
    KidFriendly,
    #[strum(serialize = "new this week")]
    #[serde(rename = "new this week")]
    Fresh,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ScoreExplanation {
    pub score: f64,
    pub blocked_by: Option<HardFilter>,
    pub reasons: Vec<String>,
    pub penalties: Vec<String>,
    pub bonuses: Vec<String>,
    pub tags: Vec<ReasonTag>,
}

impl ScoreExplanation {
    fn blocked(filter: HardFilter) -> Self {
        Self {
            score: 0.0,
            blocked_by: Some(filter),
            reasons: vec![filter.to_string()],
            ..Default::default()
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked_by.is_some()
    }

    fn bonus(&mut self, points: f64, label: impl AsRef<str>) {
        self.score += points;
        self.bonuses.push(format!("{} (+{})", label.as_ref(), format_points(points)));
    }

    fn penalty(&mut self, points: f64, label: impl AsRef<str>) {
        self.score -= points;
        self.penalties.push(format!("{} (-{})", label.as_ref(), format_points(points)));
    }

    fn tag(&mut self, tag: ReasonTag) {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }
}

fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{points:.0}")
    } else {
        format!("{points:.1}")
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RankedRecipe<'a> {
    pub recipe: &'a Recipe,
    pub explanation: ScoreExplanation,
}

impl RankedRecipe<'_> {
    pub fn score(&self) -> f64 {
        self.explanation.score
    }
}

#[derive(Clone, Debug, Default)]
pub struct RecipeScorer {
    weights: ScoringWeights,
}

impl RecipeScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn score_recipe(&self, recipe: &Recipe, context: &ScoringContext<'_>) -> ScoreExplanation {
        if let Some(filter) = self.hard_filter(recipe, context) {
            tracing::debug!(recipe_id = %recipe.id, %filter, "recipe blocked");
            return ScoreExplanation::blocked(filter);
        }

        let w = &self.weights;
        let household = context.household;
        let mut explanation = ScoreExplanation {
            score: w.base_score,
            ..Default::default()
        };

        if household.is_favorite(&recipe.id) {
            explanation.bonus(w.favorite_bonus, "Household favorite");
            explanation.reasons.push("One of your favorites".to_string());
            explanation.tag(ReasonTag::Favorite);
        }

        if context.recent_recipe_ids.contains(&recipe.id) {
            explanation.penalty(w.recency_penalty, "Cooked recently");
        } else {
            explanation.tag(ReasonTag::Fresh);
        }

        if let Some(protein) = recipe.primary_protein() {
            let uses = context.protein_uses(protein);
            if uses > 0 {
                explanation.penalty(
                    w.protein_repeat_penalty * f64::from(uses),
                    format!("{} already planned {uses}x this week", capitalize(protein.as_ref())),
                );
            }
        }

        self.apply_reuse(recipe, context, &mut explanation);

        if let Some(cost) = recipe.cost_per_serve {
            let ceiling = w.cost_ceiling_per_serve;
            if cost >= 0.0 && cost < ceiling {
                let points = w.cost_bonus_max * (ceiling - cost) / ceiling;
                explanation.bonus(points, format!("Budget friendly at {cost:.2} per serve"));
                if points >= w.cost_bonus_max / 2.0 {
                    explanation.tag(ReasonTag::BestValue);
                }
            }
        }

        if recipe.has_tag(TAG_BULK_COOK) {
            explanation.bonus(w.bulk_cook_bonus, "Cooks in bulk");
            explanation.tag(ReasonTag::BulkCook);
        }

        if household.dietary.high_protein && recipe.has_tag(TAG_HIGH_PROTEIN) {
            explanation.bonus(w.preference_bonus, "Matches high-protein preference");
        }

        if household.dietary.organic && recipe.has_tag(TAG_ORGANIC_FRIENDLY) {
            explanation.bonus(w.preference_bonus, "Matches organic preference");
        }

        if let (Some(wanted), Some(source)) = (&context.preferred_source, &recipe.source) {
            if wanted.eq_ignore_ascii_case(source) {
                explanation.bonus(w.preferred_source_bonus, format!("From {source}"));
            }
        }

        let ingredient_count = recipe.ingredients.len();
        if ingredient_count > w.complexity_threshold {
            let extra = ingredient_count - w.complexity_threshold;
            explanation.penalty(
                w.complexity_penalty * extra as f64,
                format!("{ingredient_count} ingredients"),
            );
        }

        if recipe.total_time_min > 0 && recipe.total_time_min <= w.quick_minutes {
            explanation.reasons.push(format!("Ready in {} minutes", recipe.total_time_min));
            explanation.tag(ReasonTag::Quick);
        }

        if recipe.has_tag(TAG_KID_FRIENDLY) {
            explanation.tag(ReasonTag::KidFriendly);
        }

        explanation.score = explanation.score.max(0.0);
        explanation
    }

    fn hard_filter(&self, recipe: &Recipe, context: &ScoringContext<'_>) -> Option<HardFilter> {
        if context.is_weekend {
            return None;
        }

        if recipe.total_time_min > self.weights.weeknight_max_minutes {
            return Some(HardFilter::WeeknightTime);
        }

        if context.household.requires_kid_friendly() && !recipe.has_tag(TAG_KID_FRIENDLY) {
            return Some(HardFilter::NotKidFriendly);
        }

        None
    }

    fn apply_reuse(
        &self,
        recipe: &Recipe,
        context: &ScoringContext<'_>,
        explanation: &mut ScoreExplanation,
    ) {
        let w = &self.weights;
        let mut matches = 0u32;
        let mut pack_candidate: Option<String> = None;

        for (key, in_recipe) in reuse_key_counts(recipe) {
            let already_used = context.ingredient_uses(&key);
            if already_used > 0 {
                matches += 1;
            }
            if pack_candidate.is_none() && in_recipe + already_used >= w.pack_reuse_threshold {
                pack_candidate = Some(key);
            }
        }

        if matches > 0 {
            explanation.bonus(
                w.ingredient_reuse_bonus * f64::from(matches),
                format!("Reuses {matches} ingredient(s) from this week"),
            );
            explanation.tag(ReasonTag::ReusesIngredients);
        }

        if let Some(key) = pack_candidate {
            explanation.bonus(w.pack_reuse_bonus, format!("Shares a pack of {key}"));
        }
    }

    /// Scores every candidate, drops blocked or zero-scored ones, and returns
    /// the best `top_n` in descending score order. Ties keep input order.
    pub fn score_and_rank<'r>(
        &self,
        candidates: &'r [Recipe],
        context: &ScoringContext<'_>,
        top_n: usize,
    ) -> Vec<RankedRecipe<'r>> {
        self.rank_iter(candidates, context, top_n)
    }

    /// [`score_and_rank`](Self::score_and_rank) over borrowed recipes from
    /// any source, e.g. a filtered view of a catalog.
    pub fn rank_iter<'r>(
        &self,
        candidates: impl IntoIterator<Item = &'r Recipe>,
        context: &ScoringContext<'_>,
        top_n: usize,
    ) -> Vec<RankedRecipe<'r>> {
        let mut ranked: Vec<RankedRecipe<'r>> = candidates
            .into_iter()
            .map(|recipe| RankedRecipe {
                recipe,
                explanation: self.score_recipe(recipe, context),
            })
            .filter(|r| r.explanation.score > 0.0)
            .collect();

        ranked.sort_by(|a, b| b.score().total_cmp(&a.score()));
        ranked.truncate(top_n);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use mealcart_shared::{Household, RecipeIngredient};

    use super::*;

    fn recipe(id: &str, minutes: u32, tags: &[&str]) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: format!("Recipe {id}"),
            ingredients: vec![],
            tags: tags.iter().map(|t| t.to_string()).collect(),
            total_time_min: minutes,
            servings: 4,
            cost_per_serve: None,
            source: None,
        }
    }

    fn kid_household() -> Household {
        let mut household = Household::default();
        household.children = 2;
        household.dietary.kid_friendly = true;
        household
    }

    #[test]
    fn test_weeknight_time_filter() {
        let household = Household::default();
        let context = ScoringContext::new(&household, false);
        let explanation = RecipeScorer::default().score_recipe(&recipe("slow", 90, &[]), &context);

        assert_eq!(explanation.score, 0.0);
        assert_eq!(explanation.blocked_by, Some(HardFilter::WeeknightTime));
        assert_eq!(explanation.reasons, vec![HardFilter::WeeknightTime.to_string()]);
        assert!(explanation.bonuses.is_empty());
        assert!(explanation.penalties.is_empty());
    }

    #[test]
    fn test_kid_friendly_filter_only_on_weeknights() {
        let household = kid_household();
        let scorer = RecipeScorer::default();
        let spicy = recipe("spicy", 20, &[]);

        let weeknight = scorer.score_recipe(&spicy, &ScoringContext::new(&household, false));
        assert_eq!(weeknight.blocked_by, Some(HardFilter::NotKidFriendly));
        assert_eq!(weeknight.reasons.len(), 1);

        let weekend = scorer.score_recipe(&spicy, &ScoringContext::new(&household, true));
        assert!(!weekend.is_blocked());
        assert!(weekend.score > 0.0);
    }

    #[test]
    fn test_weekend_allows_long_recipes() {
        let household = Household::default();
        let context = ScoringContext::new(&household, true);
        let explanation = RecipeScorer::default().score_recipe(&recipe("roast", 120, &[]), &context);
        assert_eq!(explanation.score, 100.0);
    }

    #[test]
    fn test_favorite_and_recency() {
        let mut household = Household::default();
        household.favorite_recipe_ids.insert("tacos".to_string());

        let context = ScoringContext::new(&household, false).with_recent(["tacos".to_string()]);
        let explanation =
            RecipeScorer::default().score_recipe(&recipe("tacos", 25, &[]), &context);

        assert_eq!(explanation.score, 100.0 + 20.0 - 25.0);
        assert_eq!(explanation.tags, vec![ReasonTag::Favorite, ReasonTag::Quick]);
        assert_eq!(explanation.bonuses.len(), 1);
        assert_eq!(explanation.penalties.len(), 1);
    }

    #[test]
    fn test_protein_repetition_scales_with_uses() {
        let household = Household::default();
        let mut context = ScoringContext::new(&household, true);
        context.protein_usage.insert(mealcart_shared::Protein::Beef, 2);

        let explanation =
            RecipeScorer::default().score_recipe(&recipe("stew", 60, &["beef"]), &context);
        assert_eq!(explanation.score, 70.0);
    }

    #[test]
    fn test_ingredient_and_pack_reuse() {
        let household = Household::default();
        let mut context = ScoringContext::new(&household, true);
        context.ingredient_usage.insert("brown onion".to_string(), 1);
        context.ingredient_usage.insert("garlic".to_string(), 1);

        let mut curry = recipe("curry", 45, &[]);
        curry.ingredients = vec![
            RecipeIngredient::new("brown onion, diced", 1.0, ""),
            RecipeIngredient::new("garlic", 2.0, "cloves"),
            RecipeIngredient::new("coconut milk", 400.0, "ml"),
        ];

        let explanation = RecipeScorer::default().score_recipe(&curry, &context);
        // two matches at +3, one pack bonus at +10
        assert_eq!(explanation.score, 116.0);
        assert!(explanation.tags.contains(&ReasonTag::ReusesIngredients));
    }

    #[test]
    fn test_pack_reuse_within_single_recipe() {
        let household = Household::default();
        let context = ScoringContext::new(&household, true);

        let mut salad = recipe("salad", 15, &[]);
        salad.ingredients = vec![
            RecipeIngredient::new("red onion", 0.5, ""),
            RecipeIngredient::new("red onion, pickled", 0.5, ""),
        ];

        let explanation = RecipeScorer::default().score_recipe(&salad, &context);
        assert_eq!(explanation.score, 110.0);
    }

    #[test]
    fn test_cost_bonus_below_ceiling_only() {
        let household = Household::default();
        let context = ScoringContext::new(&household, true);
        let scorer = RecipeScorer::default();

        let mut cheap = recipe("beans", 50, &[]);
        cheap.cost_per_serve = Some(2.0);
        let explanation = scorer.score_recipe(&cheap, &context);
        assert!((explanation.score - 111.25).abs() < 1e-9);
        assert!(explanation.tags.contains(&ReasonTag::BestValue));

        let mut pricey = recipe("steak", 50, &[]);
        pricey.cost_per_serve = Some(12.0);
        assert_eq!(scorer.score_recipe(&pricey, &context).score, 100.0);
    }

    #[test]
    fn test_preference_source_and_bulk_bonuses() {
        let mut household = Household::default();
        household.dietary.high_protein = true;

        let context = ScoringContext::new(&household, true)
            .with_preferred_source(Some("Family Cookbook".to_string()));

        let mut bake = recipe("bake", 50, &[TAG_BULK_COOK, TAG_HIGH_PROTEIN, TAG_ORGANIC_FRIENDLY]);
        bake.source = Some("family cookbook".to_string());

        // organic tag is ignored without the household preference
        let explanation = RecipeScorer::default().score_recipe(&bake, &context);
        assert_eq!(explanation.score, 115.0);
        assert_eq!(explanation.bonuses.len(), 3);
    }

    #[test]
    fn test_complexity_penalty() {
        let household = Household::default();
        let context = ScoringContext::new(&household, true);

        let mut feast = recipe("feast", 90, &[]);
        feast.ingredients = [
            "rice", "peas", "carrot", "celery", "leek", "butter", "flour", "stock", "thyme",
            "bay leaf", "parsley", "lemon", "pepper",
        ]
        .iter()
        .map(|name| RecipeIngredient::new(*name, 1.0, ""))
        .collect();

        let explanation = RecipeScorer::default().score_recipe(&feast, &context);
        assert_eq!(explanation.score, 94.0);
    }

    #[test]
    fn test_score_never_negative() {
        let household = Household::default();
        let mut context = ScoringContext::new(&household, true).with_recent(["r".to_string()]);
        context.protein_usage.insert(mealcart_shared::Protein::Pork, 10);

        let explanation =
            RecipeScorer::default().score_recipe(&recipe("r", 30, &["pork"]), &context);
        assert_eq!(explanation.score, 0.0);
        assert!(!explanation.is_blocked());
    }

    #[test]
    fn test_rank_sorted_with_stable_ties() {
        let mut household = Household::default();
        household.favorite_recipe_ids.insert("fav".to_string());
        let context = ScoringContext::new(&household, false);

        let candidates = vec![
            recipe("a", 20, &[]),
            recipe("slow", 90, &[]),
            recipe("b", 20, &[]),
            recipe("fav", 20, &[]),
            recipe("c", 20, &[]),
        ];

        let ranked = RecipeScorer::default().score_and_rank(&candidates, &context, 3);
        let ids: Vec<&str> = ranked.iter().map(|r| r.recipe.id.as_str()).collect();
        assert_eq!(ids, vec!["fav", "a", "b"]);
    }

    #[test]
    fn test_rank_borrowed_view_without_copies() {
        let household = Household::default();
        let context = ScoringContext::new(&household, false);
        let candidates = vec![recipe("a", 20, &[]), recipe("b", 20, &[]), recipe("c", 20, &[])];

        let ranked = RecipeScorer::default().rank_iter(
            candidates.iter().filter(|r| r.id != "a"),
            &context,
            5,
        );

        assert_eq!(ranked.len(), 2);
        assert!(std::ptr::eq(ranked[0].recipe, &candidates[1]));
        assert!(std::ptr::eq(ranked[1].recipe, &candidates[2]));
    }
}
