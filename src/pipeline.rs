//! Week plan to priced shopping list.

use chrono::NaiveDate;
use serde::Serialize;

use mealcart_pricing::{LookupOptions, PricingService, PricingTier, TieredEstimate};
use mealcart_shared::{Analytics, RecipeCatalog, WeekPlan};
use mealcart_shopping::{AggregatedIngredient, AggregationOptions, IngredientAggregationService};
use mealcart_units::round_to_places;

#[derive(Clone, Debug, Serialize)]
pub struct PricedItem {
    #[serde(flatten)]
    pub ingredient: AggregatedIngredient,
    /// `None` for pantry staples, which are not bought.
    pub pricing: Option<TieredEstimate>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PricedShoppingList {
    pub week_start: NaiveDate,
    pub items: Vec<PricedItem>,
    pub total: f64,
    pub live_priced: usize,
}

impl PricedShoppingList {
    fn new(week_start: NaiveDate, items: Vec<PricedItem>) -> Self {
        let priced = items.iter().filter_map(|i| i.pricing.as_ref());
        let total = priced.clone().map(|p| p.estimate.price).sum::<f64>();
        let live_priced = priced.filter(|p| p.live_price).count();

        Self {
            week_start,
            items,
            total: round_to_places(total, 2),
            live_priced,
        }
    }

    pub fn ingredients(&self) -> Vec<AggregatedIngredient> {
        self.items.iter().map(|i| i.ingredient.clone()).collect()
    }
}

/// Aggregates a week plan and prices every purchasable line.
pub struct ShoppingPlanner<'a, C: RecipeCatalog + ?Sized> {
    catalog: &'a C,
    pricing: &'a PricingService,
    analytics: Analytics,
}

impl<'a, C: RecipeCatalog + ?Sized> ShoppingPlanner<'a, C> {
    pub fn new(catalog: &'a C, pricing: &'a PricingService) -> Self {
        Self {
            catalog,
            pricing,
            analytics: Analytics::disabled(),
        }
    }

    pub fn with_analytics(mut self, analytics: Analytics) -> Self {
        self.analytics = analytics;
        self
    }

    fn aggregate(
        &self,
        plan: &WeekPlan,
        options: &AggregationOptions,
    ) -> anyhow::Result<Vec<AggregatedIngredient>> {
        let list = IngredientAggregationService::new(self.catalog)
            .with_analytics(self.analytics.clone())
            .aggregate_shopping_list(plan, options)?;

        tracing::info!(items = list.len(), "shopping list aggregated");
        Ok(list)
    }

    /// Prices lines one at a time through the full tier chain.
    pub async fn build(
        &self,
        plan: &WeekPlan,
        options: &AggregationOptions,
        lookup: &LookupOptions,
    ) -> anyhow::Result<PricedShoppingList> {
        let mut items = Vec::new();

        for ingredient in self.aggregate(plan, options)? {
            let pricing = if ingredient.is_pantry_staple {
                None
            } else {
                Some(
                    self.pricing
                        .estimate_ingredient_cost_with_api(
                            &ingredient.name,
                            ingredient.base_qty,
                            &ingredient.base_unit,
                            lookup,
                        )
                        .await,
                )
            };

            items.push(PricedItem {
                ingredient,
                pricing,
            });
        }

        Ok(PricedShoppingList::new(plan.week_start, items))
    }

    /// Static mapping and category rates only, no collaborators involved.
    pub fn build_offline(
        &self,
        plan: &WeekPlan,
        options: &AggregationOptions,
    ) -> anyhow::Result<PricedShoppingList> {
        let items = self
            .aggregate(plan, options)?
            .into_iter()
            .map(|ingredient| {
                let pricing = (!ingredient.is_pantry_staple).then(|| {
                    let estimate = self.pricing.estimate_ingredient_cost(
                        &ingredient.name,
                        ingredient.base_qty,
                        &ingredient.base_unit,
                    );
                    let tier = if estimate.mapped {
                        PricingTier::Static
                    } else {
                        PricingTier::Category
                    };

                    TieredEstimate {
                        estimate,
                        tier,
                        live_price: false,
                    }
                });

                PricedItem {
                    ingredient,
                    pricing,
                }
            })
            .collect();

        Ok(PricedShoppingList::new(plan.week_start, items))
    }
}
