use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use mealcart_shared::{Analytics, AnalyticsEvent, normalize_ingredient_name};
use mealcart_units::is_purchasable_in;

use crate::{
    CachedProduct, CostEstimate, NoProductSearch, PriceCategory, PricingEngine, Product,
    ProductCache, ProductSearch, QuotaGate, select_best_product,
};

#[derive(Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PricingTier {
    /// Cache hit or live search result.
    Api,
    Static,
    Category,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TieredEstimate {
    #[serde(flatten)]
    pub estimate: CostEstimate,
    pub tier: PricingTier,
    pub live_price: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupOptions {
    /// The user allows live product searches for this lookup.
    pub allow_api: bool,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self { allow_api: true }
    }
}

/// Ordered fallback pricing: cache, live search, static mapping, category.
///
/// Tiers run one after another and never concurrently. Collaborator failures
/// are logged and treated as a miss, so a lookup always produces an estimate.
pub struct PricingService {
    engine: PricingEngine,
    cache: Arc<dyn ProductCache>,
    quota: Arc<dyn QuotaGate>,
    search: Arc<dyn ProductSearch>,
    analytics: Analytics,
}

impl PricingService {
    pub fn new(
        engine: PricingEngine,
        cache: Arc<dyn ProductCache>,
        quota: Arc<dyn QuotaGate>,
        search: Arc<dyn ProductSearch>,
    ) -> Self {
        Self {
            engine,
            cache,
            quota,
            search,
            analytics: Analytics::disabled(),
        }
    }

    /// Service that never leaves the process: no live search, empty cache.
    pub fn offline(engine: PricingEngine) -> Self {
        let quota = crate::DailyQuota::new(engine.settings().daily_api_quota);
        Self::new(
            engine,
            Arc::new(crate::MemoryProductCache::new()),
            Arc::new(quota),
            Arc::new(NoProductSearch),
        )
    }

    pub fn with_analytics(mut self, analytics: Analytics) -> Self {
        self.analytics = analytics;
        self
    }

    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    pub fn estimate_ingredient_cost(&self, name: &str, quantity: f64, unit: &str) -> CostEstimate {
        self.engine.estimate_ingredient_cost(name, quantity, unit)
    }

    pub async fn estimate_ingredient_cost_with_api(
        &self,
        name: &str,
        quantity: f64,
        unit: &str,
        options: &LookupOptions,
    ) -> TieredEstimate {
        let ingredient = normalize_ingredient_name(name);

        let (estimate, tier) = if let Some(product) = self.cached_product(&ingredient, unit).await {
            (
                self.engine.product_estimate(&ingredient, quantity, unit, &product),
                PricingTier::Api,
            )
        } else if let Some(product) = self.searched_product(&ingredient, quantity, unit, options).await {
            (
                self.engine.product_estimate(&ingredient, quantity, unit, &product),
                PricingTier::Api,
            )
        } else if let Some(estimate) = self.engine.mapped_estimate(&ingredient, quantity, unit) {
            (estimate, PricingTier::Static)
        } else {
            (
                self.engine.category_estimate(&ingredient, quantity, unit),
                PricingTier::Category,
            )
        };

        let live_price = tier == PricingTier::Api;
        tracing::debug!(%ingredient, %tier, price = estimate.price, "ingredient priced");

        self.analytics.record(AnalyticsEvent::PricingResolved {
            ingredient,
            tier: tier.to_string(),
            live_price,
        });

        TieredEstimate {
            estimate,
            tier,
            live_price,
        }
    }

    async fn cached_product(&self, ingredient: &str, unit: &str) -> Option<Product> {
        let cached = match self.cache.get_cached_product(ingredient).await {
            Ok(Some(cached)) => cached,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(err = %err, ingredient, "product cache lookup failed");
                return None;
            }
        };

        if !self.is_fresh(&cached) {
            tracing::debug!(ingredient, cached_at = %cached.cached_at, "cached product is stale");
            return None;
        }

        if !is_purchasable_in(unit, &cached.product.pack_unit) {
            tracing::debug!(ingredient, unit, "cached product has an incompatible pack unit");
            return None;
        }

        Some(cached.product)
    }

    fn is_fresh(&self, cached: &CachedProduct) -> bool {
        let max_age = Duration::days(self.engine.settings().cache_max_age_days);
        Utc::now().signed_duration_since(cached.cached_at) <= max_age
    }

    async fn searched_product(
        &self,
        ingredient: &str,
        quantity: f64,
        unit: &str,
        options: &LookupOptions,
    ) -> Option<Product> {
        if !options.allow_api || !self.engine.settings().api_enabled {
            return None;
        }

        match self.quota.should_make_api_request().await {
            Ok(decision) if decision.allowed => {}
            Ok(decision) => {
                tracing::debug!(ingredient, reason = ?decision.reason, "product search skipped");
                return None;
            }
            Err(err) => {
                tracing::warn!(err = %err, ingredient, "quota check failed");
                return None;
            }
        }

        let category = PriceCategory::classify(ingredient);
        let results = match self
            .search
            .search(ingredient, self.engine.settings().search_limit, Some(category))
            .await
        {
            Ok(results) => results.results,
            Err(err) => {
                tracing::warn!(err = %err, ingredient, "product search failed");
                return None;
            }
        };

        let product = select_best_product(ingredient, &results, quantity, unit)
            .filter(|p| is_purchasable_in(unit, &p.pack_unit))?
            .clone();

        if let Err(err) = self
            .cache
            .save_product_to_cache(ingredient, &product, quantity, unit)
            .await
        {
            tracing::warn!(err = %err, ingredient, "failed to cache product");
        }

        Some(product)
    }
}
