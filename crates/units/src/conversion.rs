use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Every accepted unit belongs to exactly one family.
#[derive(
    EnumString, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UnitFamily {
    Weight,
    Volume,
    Count,
}

impl UnitFamily {
    pub fn base_unit(&self) -> &'static str {
        match self {
            UnitFamily::Weight => "g",
            UnitFamily::Volume => "ml",
            UnitFamily::Count => "unit",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitDefinition {
    pub family: UnitFamily,
    /// Multiplier from this unit to the family's base unit.
    pub to_base: f64,
}

/// A quantity paired with the unit it is expressed in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub quantity: f64,
    pub unit: String,
}

impl Measure {
    pub fn new(quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            quantity,
            unit: unit.into(),
        }
    }
}

/// Trimmed, lower-cased form of a unit string, without a trailing period.
pub fn canonical_unit(unit: &str) -> String {
    unit.trim().trim_end_matches('.').to_lowercase()
}

/// Resolves a unit string to its family and base multiplier.
///
/// Base units: grams for weight, millilitres for volume, `unit` for counts.
/// An empty unit is a count ("2 onions").
pub fn unit_definition(unit: &str) -> Option<UnitDefinition> {
    let normalized = canonical_unit(unit);

    let (family, to_base) = match normalized.as_str() {
        // Weight -> grams
        "g" | "gm" | "gms" | "gram" | "grams" | "gramme" | "grammes" => (UnitFamily::Weight, 1.0),
        "kg" | "kgs" | "kilo" | "kilos" | "kilogram" | "kilograms" => (UnitFamily::Weight, 1000.0),
        "mg" | "milligram" | "milligrams" => (UnitFamily::Weight, 0.001),
        "oz" | "ounce" | "ounces" => (UnitFamily::Weight, 28.35),
        "lb" | "lbs" | "pound" | "pounds" => (UnitFamily::Weight, 453.59),

        // Volume -> ml
        "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
            (UnitFamily::Volume, 1.0)
        }
        "l" | "liter" | "liters" | "litre" | "litres" => (UnitFamily::Volume, 1000.0),
        "cup" | "cups" => (UnitFamily::Volume, 240.0),
        "tbsp" | "tbs" | "tablespoon" | "tablespoons" => (UnitFamily::Volume, 15.0),
        "tsp" | "teaspoon" | "teaspoons" => (UnitFamily::Volume, 5.0),
        "fl oz" | "fluid ounce" | "fluid ounces" => (UnitFamily::Volume, 29.57),
        "pint" | "pints" => (UnitFamily::Volume, 473.18),

        // Count -> unit
        "" | "unit" | "units" | "each" | "ea" | "item" | "items" | "piece" | "pieces" | "pc"
        | "pcs" | "whole" | "clove" | "cloves" | "can" | "cans" | "tin" | "tins" | "bunch"
        | "bunches" | "pack" | "packs" | "packet" | "packets" | "slice" | "slices" | "head"
        | "heads" | "fillet" | "fillets" | "stalk" | "stalks" => (UnitFamily::Count, 1.0),

        _ => return None,
    };

    Some(UnitDefinition { family, to_base })
}

pub fn unit_family(unit: &str) -> Option<UnitFamily> {
    unit_definition(unit).map(|d| d.family)
}

/// True when both units resolve to the same family.
pub fn are_units_compatible(a: &str, b: &str) -> bool {
    match (unit_family(a), unit_family(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Converts a quantity to its family's base unit.
///
/// Unrecognized units pass through unchanged.
pub fn normalize_to_base_unit(quantity: f64, unit: &str) -> Measure {
    match unit_definition(unit) {
        Some(def) => Measure::new(quantity * def.to_base, def.family.base_unit()),
        None => {
            tracing::debug!(unit, "unrecognized unit left as-is");
            Measure::new(quantity, unit)
        }
    }
}

/// Converts between two units of the same family.
///
/// Returns `None` when the families differ or either unit is unknown. Two
/// identical unknown units convert as identity.
pub fn try_convert_unit(quantity: f64, from: &str, to: &str) -> Option<f64> {
    if canonical_unit(from) == canonical_unit(to) {
        return Some(quantity);
    }

    let from_def = unit_definition(from)?;
    let to_def = unit_definition(to)?;

    if from_def.family != to_def.family {
        return None;
    }

    Some(quantity * from_def.to_base / to_def.to_base)
}

/// Lenient conversion: returns the original quantity when the units are not
/// convertible. Callers that need to tell the two apart use
/// [`try_convert_unit`] or [`are_units_compatible`] first.
pub fn convert_unit(quantity: f64, from: &str, to: &str) -> f64 {
    match try_convert_unit(quantity, from, to) {
        Some(converted) => converted,
        None => {
            tracing::warn!(from, to, quantity, "incompatible units, quantity left unconverted");
            quantity
        }
    }
}

/// Upgrades large base quantities to a friendlier unit (g -> kg, ml -> L).
///
/// Display only. Aggregation math stays in base units.
pub fn format_for_display(quantity: f64, unit: &str) -> Measure {
    match canonical_unit(unit).as_str() {
        "g" if quantity >= 1000.0 => Measure::new(quantity / 1000.0, "kg"),
        "ml" if quantity >= 1000.0 => Measure::new(quantity / 1000.0, "L"),
        _ => Measure::new(quantity, unit),
    }
}

pub fn round_to_places(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
