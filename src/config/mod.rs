//! Configuration loading and validation.
//!
//! The config file lives at `~/.config/appfinder/config.toml`. Every field is
//! optional; missing or unparsable files fall back to defaults.

mod service;
mod types;
pub mod validation;

pub use service::{config, config_dir, init_config, read_config_file, set_config};
pub use types::{AppConfig, DEFAULT_ICON_SIZE};
pub use validation::{ValidationWarning, validate_config};
