//! Error types for Trellis.

use std::path::PathBuf;

use thiserror::Error;
use trellis_render::SurfaceError;

use crate::widget::ItemId;

/// The main error type for Trellis operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Item tree usage error.
    #[error("Item error: {0}")]
    Item(#[from] ItemError),
    /// Rendering surface error.
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),
    /// Configuration error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Item tree usage errors.
///
/// These are programmer errors: the operation was rejected and the tree is
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    /// The item has already been destroyed.
    #[error("{0} has been destroyed")]
    Destroyed(ItemId),
    /// The same item was passed more than once in a single call.
    #[error("{0} was passed more than once")]
    DuplicateChild(ItemId),
    /// The reference item is not a child of the receiver.
    #[error("{0} is not a child of the receiving item")]
    NotAChild(ItemId),
    /// The operation would make an item its own ancestor.
    #[error("inserting {0} would create a cycle")]
    CircularParentage(ItemId),
    /// The surface rejected the mirrored operation.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configuration text is not valid.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A specialized Result type for Trellis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A specialized Result type for item tree operations.
pub type ItemResult<T> = std::result::Result<T, ItemError>;

/// A specialized Result type for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
