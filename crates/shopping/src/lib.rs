mod aggregation;
mod categorization;
mod error;
mod legacy;

pub use aggregation::*;
pub use categorization::*;
pub use error::*;
pub use legacy::*;
