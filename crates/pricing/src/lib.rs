mod catalog;
mod category;
mod collaborators;
mod estimate;
mod quota;
mod selection;
mod service;
mod settings;

pub use catalog::*;
pub use category::*;
pub use collaborators::*;
pub use estimate::*;
pub use quota::*;
pub use selection::*;
pub use service::*;
pub use settings::*;
