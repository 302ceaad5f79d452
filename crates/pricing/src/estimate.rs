use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mealcart_shared::normalize_ingredient_name;
use mealcart_units::{calculate_packs_needed_for, round_to_places};

use crate::{
    Confidence, PriceCategory, PriceSource, PricingSettings, Product, ProductCatalog,
    quantity_in_rate_unit, select_best_product,
};

/// The product picked for an ingredient and how many packs of it to buy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductChoice {
    pub product: Product,
    pub packs_needed: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Normalized ingredient name.
    pub ingredient: String,
    pub quantity: f64,
    pub unit: String,
    pub price: f64,
    pub mapped: bool,
    pub confidence: Confidence,
    pub price_source: PriceSource,
    pub category: PriceCategory,
    pub freshness: DateTime<Utc>,
    pub product: Option<ProductChoice>,
    pub requires_user_choice: bool,
}

/// Synchronous pricing over the static mapping table and category rates.
#[derive(Clone, Debug)]
pub struct PricingEngine {
    catalog: ProductCatalog,
    settings: PricingSettings,
}

impl PricingEngine {
    pub fn new(catalog: ProductCatalog, settings: PricingSettings) -> Self {
        Self { catalog, settings }
    }

    pub fn settings(&self) -> &PricingSettings {
        &self.settings
    }

    /// Static mapping when one exists, category estimate otherwise.
    pub fn estimate_ingredient_cost(&self, name: &str, quantity: f64, unit: &str) -> CostEstimate {
        match self.mapped_estimate(name, quantity, unit) {
            Some(estimate) => estimate,
            None => self.category_estimate(name, quantity, unit),
        }
    }

    pub fn mapped_estimate(&self, name: &str, quantity: f64, unit: &str) -> Option<CostEstimate> {
        let mapping = self.catalog.get(name)?;
        let ingredient = normalize_ingredient_name(name);
        let product = select_best_product(&ingredient, &mapping.products, quantity, unit)?;

        let mut estimate = self.product_estimate(name, quantity, unit, product);
        estimate.mapped = true;
        estimate.requires_user_choice = mapping.requires_user_choice;
        Some(estimate)
    }

    /// Prices a quantity against one concrete product.
    pub fn product_estimate(
        &self,
        name: &str,
        quantity: f64,
        unit: &str,
        product: &Product,
    ) -> CostEstimate {
        let ingredient = normalize_ingredient_name(name);
        let packs_needed = calculate_packs_needed_for(
            &ingredient,
            quantity,
            unit,
            product.pack_size,
            &product.pack_unit,
            self.settings.pack_multiplier,
        );

        CostEstimate {
            category: PriceCategory::classify(&ingredient),
            ingredient,
            quantity,
            unit: unit.to_string(),
            price: round_to_places(product.price * f64::from(packs_needed), 2),
            mapped: false,
            confidence: product.confidence,
            price_source: product.source,
            freshness: product.observed_at.unwrap_or_else(Utc::now),
            product: Some(ProductChoice {
                product: product.clone(),
                packs_needed,
            }),
            requires_user_choice: false,
        }
    }

    pub fn category_estimate(&self, name: &str, quantity: f64, unit: &str) -> CostEstimate {
        let ingredient = normalize_ingredient_name(name);
        let category = PriceCategory::classify(&ingredient);
        let (rate, rate_unit) = category.base_rate();
        let amount = quantity_in_rate_unit(&ingredient, quantity, unit, rate_unit);
        let price = round_to_places(rate * amount, 2).max(self.settings.minimum_price);

        tracing::debug!(%ingredient, %category, price, "category price estimate");

        CostEstimate {
            ingredient,
            quantity,
            unit: unit.to_string(),
            price,
            mapped: false,
            confidence: Confidence::Low,
            price_source: PriceSource::Category,
            category,
            freshness: Utc::now(),
            product: None,
            requires_user_choice: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> PricingEngine {
        PricingEngine::new(ProductCatalog::builtin(), PricingSettings::default())
    }

    #[test]
    fn test_unmapped_item_uses_category() {
        let estimate = engine().estimate_ingredient_cost("unmapped-exotic-item", 200.0, "g");

        assert!(!estimate.mapped);
        assert_eq!(estimate.price_source, PriceSource::Category);
        assert_eq!(estimate.confidence, Confidence::Low);
        assert_eq!(estimate.category, PriceCategory::Other);
        assert!(estimate.price >= 0.10);
        assert_eq!(estimate.price, 2.0);
    }

    #[test]
    fn test_tiny_quantities_hit_minimum_price() {
        let estimate = engine().estimate_ingredient_cost("ground cumin", 0.5, "g");
        assert_eq!(estimate.price, 0.10);
    }

    #[test]
    fn test_mapped_single_pack() {
        let estimate = engine().estimate_ingredient_cost("Beef mince", 400.0, "g");

        assert!(estimate.mapped);
        assert_eq!(estimate.price_source, PriceSource::Mapped);
        assert_eq!(estimate.confidence, Confidence::High);
        assert!(estimate.requires_user_choice);

        let choice = estimate.product.unwrap();
        assert_eq!(choice.product.name, "Beef mince 3 star");
        assert_eq!(choice.packs_needed, 1);
        assert_eq!(estimate.price, 7.0);
    }

    #[test]
    fn test_mapped_multiple_packs() {
        let estimate = engine().estimate_ingredient_cost("chicken thigh", 1.2, "kg");
        let choice = estimate.product.as_ref().unwrap();

        assert_eq!(choice.packs_needed, 3);
        assert_eq!(estimate.price, 21.0);
    }

    #[test]
    fn test_count_ingredient_priced_by_item() {
        let estimate = engine().estimate_ingredient_cost("limes", 3.0, "");
        assert!(estimate.mapped);
        assert_eq!(estimate.product.unwrap().packs_needed, 3);
        assert_eq!(estimate.price, 2.7);
    }

    #[test]
    fn test_counted_items_priced_against_weight_pack() {
        let by_count = engine().estimate_ingredient_cost("onion", 20.0, "");
        let by_weight = engine().estimate_ingredient_cost("onion", 3000.0, "g");

        assert!(by_count.mapped);
        assert_eq!(by_count.product.as_ref().unwrap().packs_needed, 3);
        assert_eq!(by_count.price, 10.5);
        assert_eq!(by_count.price, by_weight.price);
        assert_eq!(by_count.unit, "");
    }
}
