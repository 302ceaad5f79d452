mod context;
mod planner;
mod scorer;
mod weights;

pub use context::*;
pub use planner::*;
pub use scorer::*;
pub use weights::*;
