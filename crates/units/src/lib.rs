mod conversion;
mod item_weight;
mod packs;

pub use conversion::*;
pub use item_weight::*;
pub use packs::*;
