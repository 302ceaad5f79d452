use std::sync::LazyLock;

use mealcart_shared::text::contains_term;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Grocery store aisle an ingredient is shelved in.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[strum(serialize = "Meat & Seafood")]
    MeatSeafood,
    Dairy,
    Produce,
    Pantry,
    #[strum(serialize = "Canned & Packaged")]
    CannedPackaged,
    Bakery,
    Frozen,
    Other,
}

// Modifiers that decide the aisle on their own come first so they win ties
// against a same-length food word ("canned" vs "tomato").
const KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Frozen, &["frozen", "ice cream", "puff pastry", "edamame"]),
    (
        Category::CannedPackaged,
        &[
            "canned",
            "tinned",
            "coconut milk",
            "coconut cream",
            "passata",
            "tomato paste",
            "chickpeas",
            "kidney beans",
            "black beans",
            "cannellini beans",
            "baked beans",
            "lentils",
            "tuna",
            "corn kernels",
        ],
    ),
    (
        Category::Pantry,
        &[
            "peanut butter",
            "chicken stock",
            "beef stock",
            "vegetable stock",
            "stock",
            "broth",
            "olive oil",
            "vegetable oil",
            "sesame oil",
            "oil",
            "vinegar",
            "soy sauce",
            "fish sauce",
            "sauce",
            "flour",
            "sugar",
            "salt",
            "pepper",
            "rice",
            "pasta",
            "spaghetti",
            "noodles",
            "oats",
            "honey",
            "cumin",
            "paprika",
            "cinnamon",
            "oregano",
            "curry powder",
            "baking powder",
            "baking soda",
            "breadcrumbs",
            "mustard",
            "ketchup",
            "mayonnaise",
            "quinoa",
            "couscous",
        ],
    ),
    (
        Category::MeatSeafood,
        &[
            "chicken", "beef", "pork", "lamb", "turkey", "mince", "bacon", "ham", "sausage",
            "steak", "salmon", "fish", "prawn", "shrimp", "mussels", "squid", "chorizo",
        ],
    ),
    (
        Category::Dairy,
        &[
            "milk", "cream", "sour cream", "butter", "cheese", "cheddar", "parmesan", "mozzarella",
            "feta", "yoghurt", "yogurt", "egg",
        ],
    ),
    (
        Category::Bakery,
        &["bread", "bread roll", "tortilla", "wrap", "pita", "baguette", "bun", "naan"],
    ),
    (
        Category::Produce,
        &[
            "tomato",
            "onion",
            "spring onion",
            "shallot",
            "garlic",
            "ginger",
            "lettuce",
            "carrot",
            "celery",
            "capsicum",
            "bell pepper",
            "chilli",
            "cucumber",
            "zucchini",
            "broccoli",
            "cauliflower",
            "spinach",
            "kale",
            "cabbage",
            "potato",
            "sweet potato",
            "mushroom",
            "green beans",
            "peas",
            "corn",
            "avocado",
            "eggplant",
            "pumpkin",
            "squash",
            "coriander",
            "cilantro",
            "parsley",
            "basil",
            "mint",
            "thyme",
            "rosemary",
            "apple",
            "banana",
            "orange",
            "lemon",
            "lime",
            "berries",
            "mango",
        ],
    ),
];

static KEYWORD_TABLE: LazyLock<Vec<(&'static str, Category)>> = LazyLock::new(|| {
    let mut table: Vec<(&'static str, Category)> = KEYWORDS
        .iter()
        .flat_map(|(category, words)| words.iter().map(move |w| (*w, *category)))
        .collect();
    table.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    table
});

/// Stateless keyword matcher from ingredient names to grocery categories.
pub struct CategorizationService;

impl CategorizationService {
    /// Longest matching keyword wins, unmatched names are [`Category::Other`].
    pub fn categorize(ingredient_name: &str) -> Category {
        let normalized = ingredient_name.trim().to_lowercase();

        KEYWORD_TABLE
            .iter()
            .find(|(keyword, _)| contains_term(&normalized, keyword))
            .map(|(_, category)| *category)
            .unwrap_or(Category::Other)
    }
}
