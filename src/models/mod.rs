mod application;
mod catalog;

pub use application::Application;
pub use catalog::AppCatalog;
