use validator::ValidationErrors;

/// The only failure the aggregator reports. Everything else is a data-quality
/// issue that is logged and skipped.
#[derive(Debug, thiserror::Error)]
pub enum ShoppingListError {
    #[error("invalid week plan: {0}")]
    InvalidWeekPlan(#[from] ValidationErrors),
}
