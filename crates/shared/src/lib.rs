mod analytics;
mod catalog;
mod error;
mod household;
mod ingredient;
mod plan;
mod recipe;
pub mod text;

pub use analytics::*;
pub use catalog::*;
pub use error::*;
pub use household::*;
pub use ingredient::*;
pub use plan::*;
pub use recipe::*;
