use std::sync::LazyLock;

use mealcart_shared::text::contains_term;

/// Weight assumed for one item of an unrecognized ingredient.
pub const FALLBACK_ITEM_WEIGHT_G: f64 = 100.0;

/// Weight assumed for a bunch of herbs or greens.
pub const BUNCH_WEIGHT_G: f64 = 50.0;

static ITEM_WEIGHTS: LazyLock<Vec<(&'static str, f64)>> = LazyLock::new(|| {
    let mut weights = vec![
        ("onion", 150.0),
        ("red onion", 150.0),
        ("spring onion", 15.0),
        ("shallot", 30.0),
        ("garlic", 5.0),
        ("garlic clove", 5.0),
        ("egg", 50.0),
        ("potato", 200.0),
        ("sweet potato", 250.0),
        ("tomato", 120.0),
        ("cherry tomato", 15.0),
        ("carrot", 80.0),
        ("capsicum", 160.0),
        ("bell pepper", 160.0),
        ("chilli", 10.0),
        ("zucchini", 200.0),
        ("cucumber", 300.0),
        ("eggplant", 350.0),
        ("avocado", 170.0),
        ("lemon", 100.0),
        ("lime", 65.0),
        ("apple", 180.0),
        ("banana", 120.0),
        ("mushroom", 20.0),
        ("celery stalk", 40.0),
        ("broccoli", 350.0),
        ("cauliflower", 600.0),
        ("cabbage", 900.0),
        ("lettuce", 400.0),
        ("chicken breast", 220.0),
        ("chicken thigh", 120.0),
        ("tortilla", 40.0),
        ("bread roll", 60.0),
    ];
    // Longest first so "sweet potato" wins over "potato".
    weights.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    weights
});

/// Approximate weight in grams of one item of the named ingredient.
pub fn average_item_weight(name: &str) -> f64 {
    let name = name.to_lowercase();

    ITEM_WEIGHTS
        .iter()
        .find(|(key, _)| contains_term(&name, key))
        .map(|(_, grams)| *grams)
        .unwrap_or(FALLBACK_ITEM_WEIGHT_G)
}

/// Approximate weight in grams of a counted quantity ("2 onions", "1 bunch").
pub fn count_to_grams(name: &str, count: f64, unit: &str) -> f64 {
    match crate::canonical_unit(unit).as_str() {
        "bunch" | "bunches" => count * BUNCH_WEIGHT_G,
        _ => count * average_item_weight(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_items() {
        assert_eq!(average_item_weight("onion"), 150.0);
        assert_eq!(average_item_weight("Brown onions"), 150.0);
        assert_eq!(average_item_weight("garlic"), 5.0);
        assert_eq!(average_item_weight("sweet potato"), 250.0);
        assert_eq!(average_item_weight("spring onions"), 15.0);
    }

    #[test]
    fn test_unknown_item_uses_fallback() {
        assert_eq!(average_item_weight("dragon fruit"), FALLBACK_ITEM_WEIGHT_G);
    }

    #[test]
    fn test_count_to_grams() {
        assert_eq!(count_to_grams("onion", 2.0, ""), 300.0);
        assert_eq!(count_to_grams("coriander", 1.0, "bunch"), BUNCH_WEIGHT_G);
        assert_eq!(count_to_grams("mystery", 3.0, "pieces"), 300.0);
    }
}
