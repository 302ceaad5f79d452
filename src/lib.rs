pub mod config;
pub mod files;
pub mod observability;
pub mod pipeline;
