//! Domain-specific error types for appfinder.
//!
//! None of these escape `discover()` or `resolve_icon()`: discovery drops the
//! offending item and icon resolution moves on to the next stage. They exist so
//! that the internal steps can use `?` and so that every skip is logged with a
//! precise reason.

use std::path::PathBuf;
use thiserror::Error;

/// Shell-link (`.lnk`) decoding errors.
#[derive(Error, Debug)]
pub enum ShortcutError {
    /// The shortcut file could not be read.
    #[error("Failed to read shortcut {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header size or CLSID does not match a shell link.
    #[error("Not a shell link (bad header)")]
    BadHeader,

    /// A structure points past the end of the file.
    #[error("Shell link truncated at offset {0}")]
    Truncated(usize),
}

/// Failure of a single icon resolution stage.
#[derive(Error, Debug)]
pub enum IconError {
    /// The source path was empty.
    #[error("Empty icon path")]
    EmptyPath,

    /// Failed to read or decode an image file.
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Failed to read an image file.
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),

    /// The OS returned no icon for the requested path/index.
    #[error("No icon resource in {path:?} at index {index}")]
    NoResource { path: PathBuf, index: i32 },

    /// An OS handle or drawing surface could not be acquired.
    #[error("{0} failed")]
    Os(&'static str),

    /// The stage needs an OS facility this platform does not have.
    #[error("Not available on this platform")]
    Unsupported,
}

/// Process execution errors.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The exec command string was empty.
    #[error("Empty exec command")]
    EmptyCommand,

    /// Failed to spawn the process.
    #[error("Failed to spawn process: {0}")]
    SpawnFailed(#[source] std::io::Error),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config directory could not be determined.
    #[error("Config directory not found")]
    NoDirFound,

    /// Failed to read the config file.
    #[error("Failed to read config file: {0}")]
    ReadFailed(#[source] std::io::Error),

    /// Failed to parse the config file.
    #[error("Failed to parse config: {0}")]
    ParseFailed(#[source] toml::de::Error),
}
