use std::sync::Arc;

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    /// An ingredient is now bought for two or more planned recipes.
    IngredientReused {
        ingredient: String,
        recipe_count: usize,
        recipe_ids: Vec<String>,
    },
    /// A pricing lookup finished on the given tier.
    PricingResolved {
        ingredient: String,
        tier: String,
        live_price: bool,
    },
}

/// Receiver for analytics events.
///
/// Only reachable through [`Analytics::record`], which swallows failures, so a
/// sink can never block or fail the pipeline that feeds it.
pub trait AnalyticsSink: Send + Sync {
    fn emit(&self, event: &AnalyticsEvent) -> anyhow::Result<()>;
}

/// Sink that writes events to the `mealcart::analytics` tracing target.
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn emit(&self, event: &AnalyticsEvent) -> anyhow::Result<()> {
        let payload = serde_json::to_string(event)?;
        tracing::info!(target: "mealcart::analytics", %payload, "analytics event");
        Ok(())
    }
}

/// Best-effort handle over an optional sink.
#[derive(Clone, Default)]
pub struct Analytics {
    sink: Option<Arc<dyn AnalyticsSink>>,
}

impl Analytics {
    pub fn new(sink: Arc<dyn AnalyticsSink>) -> Self {
        Self { sink: Some(sink) }
    }

    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn tracing() -> Self {
        Self::new(Arc::new(TracingSink))
    }

    pub fn record(&self, event: AnalyticsEvent) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };

        if let Err(err) = sink.emit(&event) {
            tracing::warn!(err = %err, "analytics sink rejected event");
        }
    }
}
