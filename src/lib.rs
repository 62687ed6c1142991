pub mod app;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod icons;
pub mod models;
pub mod paths;
pub mod platform;
pub mod process;

pub use discovery::discover;
pub use icons::{IconCache, IconResolver, IconResource};
pub use models::{AppCatalog, Application};

#[cfg(test)]
pub mod test_utils;
