use mealcart_units::{
    are_units_compatible, is_purchasable_in, normalize_to_base_unit, quantity_in_pack_unit,
};

use crate::Product;

/// Picks the product to buy for a needed quantity.
///
/// Products whose pack unit is in the same family as `unit` are preferred.
/// Without any, counted items may be bought from weight packs by estimated
/// weight. When several candidates cover the need with a single pack the
/// smallest pack wins, otherwise the lowest price per base unit. With no
/// usable product the first one is returned as a last resort.
pub fn select_best_product<'p>(
    ingredient: &str,
    products: &'p [Product],
    quantity: f64,
    unit: &str,
) -> Option<&'p Product> {
    let first = products.first()?;

    let mut compatible: Vec<&Product> = products
        .iter()
        .filter(|p| are_units_compatible(&p.pack_unit, unit))
        .collect();

    if compatible.is_empty() {
        compatible = products
            .iter()
            .filter(|p| is_purchasable_in(unit, &p.pack_unit))
            .collect();
    }

    if compatible.is_empty() {
        tracing::warn!(
            unit,
            product = %first.name,
            "no product with a compatible pack unit, using the first one"
        );
        return Some(first);
    }

    let fitting: Vec<&Product> = compatible
        .iter()
        .copied()
        .filter(|p| {
            quantity_in_pack_unit(ingredient, quantity, unit, &p.pack_unit)
                .is_some_and(|needed| needed <= p.pack_size)
        })
        .collect();

    if fitting.len() > 1 {
        return fitting
            .into_iter()
            .min_by(|a, b| base_pack_size(a).total_cmp(&base_pack_size(b)));
    }

    compatible
        .into_iter()
        .min_by(|a, b| price_per_base_unit(a).total_cmp(&price_per_base_unit(b)))
}

fn base_pack_size(product: &Product) -> f64 {
    normalize_to_base_unit(product.pack_size, &product.pack_unit).quantity
}

fn price_per_base_unit(product: &Product) -> f64 {
    let size = base_pack_size(product);
    if size > 0.0 {
        product.price / size
    } else {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, size: f64, unit: &str, price: f64) -> Product {
        Product {
            name: name.to_string(),
            pack_size: size,
            pack_unit: unit.to_string(),
            price,
            confidence: Default::default(),
            source: Default::default(),
            store: None,
            observed_at: None,
        }
    }

    #[test]
    fn test_smallest_pack_that_fits() {
        let products = [
            product("big", 2.0, "kg", 5.0),
            product("small", 500.0, "g", 2.0),
            product("medium", 1.0, "kg", 3.0),
        ];
        let best = select_best_product("rice", &products, 400.0, "g").unwrap();
        assert_eq!(best.name, "small");
    }

    #[test]
    fn test_cheapest_per_unit_when_one_or_none_fits() {
        let products = [product("small", 500.0, "g", 2.0), product("big", 2.0, "kg", 5.0)];

        // only "big" holds 1.5 kg
        assert_eq!(select_best_product("rice", &products, 1.5, "kg").unwrap().name, "big");
        // nothing holds 3 kg
        assert_eq!(select_best_product("rice", &products, 3.0, "kg").unwrap().name, "big");
    }

    #[test]
    fn test_incompatible_units_fall_back_to_first() {
        let products = [product("bag", 1.0, "kg", 3.0), product("each", 1.0, "unit", 0.4)];
        let best = select_best_product("rice", &products, 2.0, "cup").unwrap();
        assert_eq!(best.name, "bag");
    }

    #[test]
    fn test_counted_items_from_weight_packs() {
        let products = [
            product("jar", 500.0, "ml", 4.0),
            product("small bag", 500.0, "g", 2.0),
            product("big bag", 2.0, "kg", 5.0),
        ];
        // 3 onions are about 450 g, both bags hold that
        let best = select_best_product("onion", &products, 3.0, "").unwrap();
        assert_eq!(best.name, "small bag");
        // 10 onions are about 1.5 kg, only the big bag holds that
        let best = select_best_product("onion", &products, 10.0, "").unwrap();
        assert_eq!(best.name, "big bag");
    }

    #[test]
    fn test_same_family_preferred_over_weight_packs() {
        let products = [product("bag", 1.0, "kg", 3.0), product("each", 1.0, "unit", 0.5)];
        let best = select_best_product("lime", &products, 3.0, "").unwrap();
        assert_eq!(best.name, "each");
    }

    #[test]
    fn test_filters_incompatible_products() {
        let products = [product("each", 1.0, "unit", 0.2), product("bag", 1.0, "kg", 3.0)];
        let best = select_best_product("rice", &products, 300.0, "g").unwrap();
        assert_eq!(best.name, "bag");
    }

    #[test]
    fn test_empty_products() {
        assert!(select_best_product("rice", &[], 1.0, "g").is_none());
    }
}
