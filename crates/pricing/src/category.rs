//! Category heuristics, the last pricing tier.
//!
//! Every ingredient lands in exactly one of ten price categories, each with a
//! base rate per kilogram, litre, bunch or item. Patterns are tried in a fixed
//! order so that e.g. "black pepper" is a spice before it could be produce.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use mealcart_units::{
    BUNCH_WEIGHT_G, UnitFamily, average_item_weight, canonical_unit, count_to_grams,
    normalize_to_base_unit, unit_definition,
};

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PriceCategory {
    Spices,
    Herbs,
    Condiments,
    Grains,
    Eggs,
    Seafood,
    Meat,
    Dairy,
    Produce,
    Other,
}

#[derive(Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateUnit {
    #[strum(serialize = "kg")]
    #[serde(rename = "kg")]
    Kilogram,
    #[strum(serialize = "L")]
    #[serde(rename = "L")]
    Litre,
    #[strum(serialize = "bunch")]
    #[serde(rename = "bunch")]
    Bunch,
    #[strum(serialize = "unit")]
    #[serde(rename = "unit")]
    Item,
}

fn pattern(words: &str) -> Regex {
    Regex::new(&format!(r"\b(?:{words})\b")).expect("valid category pattern")
}

static PATTERNS: LazyLock<Vec<(PriceCategory, Regex)>> = LazyLock::new(|| {
    vec![
        (
            PriceCategory::Spices,
            pattern(
                "cumin|paprika|turmeric|cinnamon|nutmeg|cardamom|saffron|garam masala|\
                 (?:chilli|chili|curry) powder|black pepper|white pepper|peppercorns?|\
                 (?:coriander|fennel|mustard|cumin) seeds?|salt|spices?|oregano|chilli flakes",
            ),
        ),
        (
            PriceCategory::Herbs,
            pattern(
                "basil|parsley|coriander|cilantro|mint|dill|chives?|thyme|rosemary|sage|\
                 tarragon|bay lea(?:f|ves)|lemongrass",
            ),
        ),
        (
            PriceCategory::Condiments,
            pattern(
                "sauce|ketchup|mustard|mayonnaise|mayo|vinegar|oil|honey|syrup|stock|broth|\
                 paste|dressing|relish|chutney|jam",
            ),
        ),
        (
            PriceCategory::Grains,
            pattern(
                "rice|pasta|spaghetti|penne|fettuccine|noodles?|flour|oats|quinoa|couscous|\
                 bread|breadcrumbs|tortillas?|barley|polenta|lentils",
            ),
        ),
        (PriceCategory::Eggs, pattern("eggs?")),
        (
            PriceCategory::Seafood,
            pattern(
                "fish|salmon|tuna|cod|prawns?|shrimps?|mussels|squid|crab|barramundi|snapper",
            ),
        ),
        (
            PriceCategory::Meat,
            pattern(
                "chicken|beef|pork|lamb|turkey|veal|mince|bacon|ham|sausages?|steak|chorizo",
            ),
        ),
        (
            PriceCategory::Dairy,
            pattern("milk|cream|butter|cheese|cheddar|parmesan|mozzarella|feta|ricotta|yog(?:h)?urt"),
        ),
        (
            PriceCategory::Produce,
            pattern(
                "onions?|shallots?|garlic|ginger|tomato(?:es)?|potato(?:es)?|carrots?|celery|\
                 capsicums?|peppers?|chill(?:i|ies)|cucumbers?|zucchinis?|eggplants?|broccoli|\
                 cauliflower|cabbage|lettuce|spinach|kale|mushrooms?|peas|beans|corn|pumpkin|\
                 squash|leeks?|avocados?|apples?|bananas?|oranges?|lemons?|limes?|berries|mangoes?",
            ),
        ),
    ]
});

impl PriceCategory {
    pub fn classify(ingredient: &str) -> Self {
        let name = ingredient.to_lowercase();

        PATTERNS
            .iter()
            .find(|(_, regex)| regex.is_match(&name))
            .map(|(category, _)| *category)
            .unwrap_or(PriceCategory::Other)
    }

    /// Base price and the unit it is quoted per.
    pub fn base_rate(&self) -> (f64, RateUnit) {
        match self {
            PriceCategory::Spices => (60.0, RateUnit::Kilogram),
            PriceCategory::Herbs => (3.0, RateUnit::Bunch),
            PriceCategory::Condiments => (8.0, RateUnit::Litre),
            PriceCategory::Grains => (4.0, RateUnit::Kilogram),
            PriceCategory::Eggs => (0.55, RateUnit::Item),
            PriceCategory::Seafood => (32.0, RateUnit::Kilogram),
            PriceCategory::Meat => (18.0, RateUnit::Kilogram),
            PriceCategory::Dairy => (9.0, RateUnit::Kilogram),
            PriceCategory::Produce => (5.0, RateUnit::Kilogram),
            PriceCategory::Other => (10.0, RateUnit::Kilogram),
        }
    }
}

/// Expresses a recipe quantity in a category's rate unit.
///
/// Weight and volume are treated as interchangeable (1 ml ~ 1 g). Counts go
/// through the average item weight table. Unknown units are read as grams.
pub fn quantity_in_rate_unit(ingredient: &str, quantity: f64, unit: &str, rate_unit: RateUnit) -> f64 {
    let definition = unit_definition(unit);
    let is_bunch = matches!(canonical_unit(unit).as_str(), "bunch" | "bunches");

    let grams = || match definition {
        Some(def) if def.family == UnitFamily::Count => count_to_grams(ingredient, quantity, unit),
        Some(_) => normalize_to_base_unit(quantity, unit).quantity,
        None => quantity,
    };

    match rate_unit {
        RateUnit::Kilogram | RateUnit::Litre => grams() / 1000.0,
        RateUnit::Bunch => match definition {
            Some(def) if def.family == UnitFamily::Count => quantity,
            _ => grams() / BUNCH_WEIGHT_G,
        },
        RateUnit::Item => match definition {
            Some(def) if def.family == UnitFamily::Count && !is_bunch => quantity,
            _ => grams() / average_item_weight(ingredient),
        },
    }
}
