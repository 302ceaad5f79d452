//! Narrow interfaces to the services the pricing chain depends on.
//!
//! Every method may fail. [`crate::PricingService`] treats an `Err` from any of
//! them as "no match" and moves on to the next tier.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{PriceCategory, Product};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CachedProduct {
    pub product: Product,
    pub quantity: f64,
    pub unit: String,
    pub cached_at: DateTime<Utc>,
}

#[async_trait]
pub trait ProductCache: Send + Sync {
    async fn get_cached_product(&self, ingredient: &str) -> anyhow::Result<Option<CachedProduct>>;

    async fn save_product_to_cache(
        &self,
        ingredient: &str,
        product: &Product,
        quantity: f64,
        unit: &str,
    ) -> anyhow::Result<()>;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaDecision {
    pub allowed: bool,
    pub reason: Option<String>,
}

impl QuotaDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}

#[async_trait]
pub trait QuotaGate: Send + Sync {
    /// Reserves one request when allowed.
    async fn should_make_api_request(&self) -> anyhow::Result<QuotaDecision>;
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub results: Vec<Product>,
}

#[async_trait]
pub trait ProductSearch: Send + Sync {
    async fn search(
        &self,
        query: &str,
        limit: usize,
        category: Option<PriceCategory>,
    ) -> anyhow::Result<SearchResults>;
}

/// Process-local product cache.
#[derive(Debug, Default)]
pub struct MemoryProductCache {
    entries: RwLock<HashMap<String, CachedProduct>>,
}

impl MemoryProductCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry with an explicit timestamp.
    pub async fn insert(&self, ingredient: impl Into<String>, entry: CachedProduct) {
        self.entries.write().await.insert(ingredient.into(), entry);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ProductCache for MemoryProductCache {
    async fn get_cached_product(&self, ingredient: &str) -> anyhow::Result<Option<CachedProduct>> {
        Ok(self.entries.read().await.get(ingredient).cloned())
    }

    async fn save_product_to_cache(
        &self,
        ingredient: &str,
        product: &Product,
        quantity: f64,
        unit: &str,
    ) -> anyhow::Result<()> {
        let entry = CachedProduct {
            product: product.clone(),
            quantity,
            unit: unit.to_string(),
            cached_at: Utc::now(),
        };
        self.entries.write().await.insert(ingredient.to_string(), entry);
        Ok(())
    }
}

/// Search backend for offline use. Never finds anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProductSearch;

#[async_trait]
impl ProductSearch for NoProductSearch {
    async fn search(
        &self,
        _query: &str,
        _limit: usize,
        _category: Option<PriceCategory>,
    ) -> anyhow::Result<SearchResults> {
        Ok(SearchResults::default())
    }
}
