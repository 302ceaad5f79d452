use crate::{UnitFamily, count_to_grams, try_convert_unit, unit_family};

/// Above `multiplier × pack size` the shopper buys several packs, below it a
/// single (possibly larger) pack is assumed.
pub const DEFAULT_PACK_MULTIPLIER: f64 = 1.5;

/// True when a quantity in `unit` can be bought in packs sized in `pack_unit`.
///
/// Same-family units always can. Counted items can also be bought by weight.
pub fn is_purchasable_in(unit: &str, pack_unit: &str) -> bool {
    match (unit_family(unit), unit_family(pack_unit)) {
        (Some(a), Some(b)) => a == b || (a == UnitFamily::Count && b == UnitFamily::Weight),
        _ => try_convert_unit(1.0, unit, pack_unit).is_some(),
    }
}

/// Expresses a needed quantity of `name` in a product's pack unit.
///
/// Counted items sold by weight go through the average item weight table
/// ("20 onions" against a 1 kg bag is 3 kg).
pub fn quantity_in_pack_unit(name: &str, quantity: f64, unit: &str, pack_unit: &str) -> Option<f64> {
    if let Some(converted) = try_convert_unit(quantity, unit, pack_unit) {
        return Some(converted);
    }

    match (unit_family(unit)?, unit_family(pack_unit)?) {
        (UnitFamily::Count, UnitFamily::Weight) => {
            try_convert_unit(count_to_grams(name, quantity, unit), "g", pack_unit)
        }
        _ => None,
    }
}

/// Number of retail packs to buy for a needed quantity.
///
/// Never returns less than 1. Degenerate inputs and unit mismatches fall back
/// to a single pack. Counted quantities against weight packs need the item
/// name, see [`calculate_packs_needed_for`].
pub fn calculate_packs_needed(
    quantity_needed: f64,
    quantity_unit: &str,
    pack_size: f64,
    pack_unit: &str,
    multiplier: f64,
) -> u32 {
    let needed = try_convert_unit(quantity_needed, quantity_unit, pack_unit);
    packs_for(needed, quantity_needed, quantity_unit, pack_size, pack_unit, multiplier)
}

/// Like [`calculate_packs_needed`], estimating the weight of counted items.
pub fn calculate_packs_needed_for(
    name: &str,
    quantity_needed: f64,
    quantity_unit: &str,
    pack_size: f64,
    pack_unit: &str,
    multiplier: f64,
) -> u32 {
    let needed = quantity_in_pack_unit(name, quantity_needed, quantity_unit, pack_unit);
    packs_for(needed, quantity_needed, quantity_unit, pack_size, pack_unit, multiplier)
}

fn packs_for(
    needed: Option<f64>,
    quantity_needed: f64,
    quantity_unit: &str,
    pack_size: f64,
    pack_unit: &str,
    multiplier: f64,
) -> u32 {
    if pack_size <= 0.0 || quantity_needed <= 0.0 {
        return 1;
    }

    let Some(needed) = needed else {
        tracing::warn!(
            quantity_unit,
            pack_unit,
            "cannot express needed quantity in pack unit, assuming one pack"
        );
        return 1;
    };

    if needed <= pack_size {
        return 1;
    }

    if needed > multiplier * pack_size {
        return (needed / pack_size).ceil() as u32;
    }

    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_in_one_pack() {
        assert_eq!(calculate_packs_needed(400.0, "g", 500.0, "g", DEFAULT_PACK_MULTIPLIER), 1);
    }

    #[test]
    fn test_above_multiplier_band() {
        assert_eq!(calculate_packs_needed(900.0, "g", 500.0, "g", DEFAULT_PACK_MULTIPLIER), 2);
        assert_eq!(calculate_packs_needed(2.1, "kg", 500.0, "g", DEFAULT_PACK_MULTIPLIER), 5);
    }

    #[test]
    fn test_within_multiplier_band() {
        assert_eq!(calculate_packs_needed(700.0, "g", 500.0, "g", DEFAULT_PACK_MULTIPLIER), 1);
        assert_eq!(calculate_packs_needed(750.0, "g", 500.0, "g", DEFAULT_PACK_MULTIPLIER), 1);
    }

    #[test]
    fn test_converts_into_pack_unit() {
        assert_eq!(calculate_packs_needed(3.0, "cup", 250.0, "ml", DEFAULT_PACK_MULTIPLIER), 3);
        assert_eq!(calculate_packs_needed(1.0, "lb", 1.0, "kg", DEFAULT_PACK_MULTIPLIER), 1);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(calculate_packs_needed(900.0, "g", 0.0, "g", DEFAULT_PACK_MULTIPLIER), 1);
        assert_eq!(calculate_packs_needed(0.0, "g", 500.0, "g", DEFAULT_PACK_MULTIPLIER), 1);
        assert_eq!(calculate_packs_needed(900.0, "g", 500.0, "ml", DEFAULT_PACK_MULTIPLIER), 1);
    }

    #[test]
    fn test_counted_items_against_weight_packs() {
        assert_eq!(
            calculate_packs_needed_for("onion", 20.0, "", 1.0, "kg", DEFAULT_PACK_MULTIPLIER),
            3
        );
        assert_eq!(
            calculate_packs_needed_for("onion", 4.0, "", 1.0, "kg", DEFAULT_PACK_MULTIPLIER),
            1
        );
        // the name-less variant cannot estimate a weight
        assert_eq!(calculate_packs_needed(20.0, "", 1.0, "kg", DEFAULT_PACK_MULTIPLIER), 1);
    }

    #[test]
    fn test_quantity_in_pack_unit() {
        assert_eq!(quantity_in_pack_unit("onion", 2.0, "", "g"), Some(300.0));
        assert_eq!(quantity_in_pack_unit("onion", 2.0, "", "kg"), Some(0.3));
        assert_eq!(quantity_in_pack_unit("rice", 500.0, "g", "kg"), Some(0.5));
        assert_eq!(quantity_in_pack_unit("butter", 100.0, "g", "unit"), None);
        assert_eq!(quantity_in_pack_unit("milk", 2.0, "", "ml"), None);
    }

    #[test]
    fn test_is_purchasable_in() {
        assert!(is_purchasable_in("", "kg"));
        assert!(is_purchasable_in("cup", "ml"));
        assert!(!is_purchasable_in("g", "unit"));
        assert!(!is_purchasable_in("", "ml"));
        assert!(is_purchasable_in("pinch", "pinch"));
    }
}
