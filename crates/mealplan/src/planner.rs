use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use mealcart_shared::{Household, PlannedDay, Recipe, WeekPlan, is_weekend};

use crate::{RecipeScorer, ScoringContext};

const MAX_SERVINGS: u32 = 50;

/// Inputs for a greedy week plan.
#[derive(Clone, Debug)]
pub struct PlanRequest<'a> {
    pub household: &'a Household,
    pub week_start: NaiveDate,
    pub days: usize,
    pub recent_recipe_ids: HashSet<String>,
    pub preferred_source: Option<String>,
}

/// Fills a week one day at a time with the best-scoring unused recipe.
///
/// Each pick feeds the protein and ingredient counters used for the next
/// day. There is no backtracking: a day with no eligible recipe becomes a
/// leftover day.
pub struct WeekPlanner {
    scorer: RecipeScorer,
}

impl WeekPlanner {
    pub fn new(scorer: RecipeScorer) -> Self {
        Self { scorer }
    }

    pub fn plan_week(&self, candidates: &[Recipe], request: &PlanRequest<'_>) -> WeekPlan {
        let servings = request.household.members().min(MAX_SERVINGS);
        let mut selected = ScoringContext::new(request.household, false)
            .with_recent(request.recent_recipe_ids.iter().cloned())
            .with_preferred_source(request.preferred_source.clone());
        let mut days = Vec::with_capacity(request.days);

        for offset in 0..request.days {
            let Some(date) = request.week_start.checked_add_days(Days::new(offset as u64)) else {
                break;
            };

            let mut context = selected.clone();
            context.is_weekend = is_weekend(date);

            let remaining = candidates
                .iter()
                .filter(|r| !selected.selected_recipe_ids.contains(&r.id));

            let pick = self
                .scorer
                .rank_iter(remaining, &context, 1)
                .into_iter()
                .next()
                .map(|ranked| ranked.recipe);

            match pick {
                Some(recipe) => {
                    tracing::debug!(%date, recipe_id = %recipe.id, "planned dinner");
                    selected.record_selection(recipe);
                    days.push(PlannedDay {
                        date,
                        recipe_id: Some(recipe.id.clone()),
                        servings,
                        leftover: false,
                    });
                }
                None => {
                    tracing::info!(%date, "no eligible recipe, planning leftovers");
                    days.push(PlannedDay {
                        date,
                        recipe_id: None,
                        servings,
                        leftover: true,
                    });
                }
            }
        }

        WeekPlan {
            week_start: request.week_start,
            days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: &str, minutes: u32, tags: &[&str]) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: id.to_string(),
            ingredients: vec![],
            tags: tags.iter().map(|t| t.to_string()).collect(),
            total_time_min: minutes,
            servings: 4,
            cost_per_serve: None,
            source: None,
        }
    }

    fn request(household: &Household, days: usize) -> PlanRequest<'_> {
        PlanRequest {
            household,
            // Friday
            week_start: NaiveDate::from_ymd_opt(2025, 10, 24).unwrap(),
            days,
            recent_recipe_ids: HashSet::new(),
            preferred_source: None,
        }
    }

    #[test]
    fn test_never_repeats_a_recipe() {
        let household = Household::default();
        let candidates = vec![recipe("a", 20, &[]), recipe("b", 20, &[])];
        let plan = WeekPlanner::new(RecipeScorer::default()).plan_week(&candidates, &request(&household, 3));

        let ids: Vec<Option<&str>> = plan.days.iter().map(|d| d.recipe_id.as_deref()).collect();
        assert_eq!(ids, vec![Some("a"), Some("b"), None]);
        assert!(plan.days[2].leftover);
        assert!(plan.days.iter().all(|d| d.servings == 2));
    }

    #[test]
    fn test_long_recipe_lands_on_weekend() {
        let household = Household::default();
        let candidates = vec![recipe("roast", 120, &[]), recipe("quick", 20, &[])];
        let plan = WeekPlanner::new(RecipeScorer::default()).plan_week(&candidates, &request(&household, 2));

        // Friday takes the quick dish, Saturday gets the roast.
        assert_eq!(plan.days[0].recipe_id.as_deref(), Some("quick"));
        assert_eq!(plan.days[1].recipe_id.as_deref(), Some("roast"));
    }

    #[test]
    fn test_protein_variety() {
        let household = Household::default();
        let candidates = vec![
            recipe("beef-1", 20, &["beef"]),
            recipe("beef-2", 20, &["beef"]),
            recipe("fish", 20, &["fish"]),
        ];
        let plan = WeekPlanner::new(RecipeScorer::default()).plan_week(&candidates, &request(&household, 2));

        assert_eq!(plan.days[0].recipe_id.as_deref(), Some("beef-1"));
        assert_eq!(plan.days[1].recipe_id.as_deref(), Some("fish"));
    }
}
