use serde::{Deserialize, Serialize};

use mealcart_units::DEFAULT_PACK_MULTIPLIER;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    pub pack_multiplier: f64,
    /// Floor applied to category estimates.
    pub minimum_price: f64,
    pub cache_max_age_days: i64,
    pub daily_api_quota: u32,
    pub search_limit: usize,
    /// Master switch for the external product search tier.
    pub api_enabled: bool,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            pack_multiplier: DEFAULT_PACK_MULTIPLIER,
            minimum_price: 0.10,
            cache_max_age_days: 7,
            daily_api_quota: 100,
            search_limit: 5,
            api_enabled: true,
        }
    }
}

impl PricingSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.pack_multiplier < 1.0 {
            return Err("pack_multiplier must be at least 1.0".to_string());
        }

        if self.minimum_price <= 0.0 {
            return Err("minimum_price must be positive".to_string());
        }

        if self.cache_max_age_days < 0 {
            return Err("cache_max_age_days cannot be negative".to_string());
        }

        if self.search_limit == 0 {
            return Err("search_limit must be at least 1".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PricingSettings::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let low_multiplier = PricingSettings {
            pack_multiplier: 0.5,
            ..Default::default()
        };
        assert!(low_multiplier.validate().is_err());

        let free = PricingSettings {
            minimum_price: 0.0,
            ..Default::default()
        };
        assert!(free.validate().is_err());
    }
}
