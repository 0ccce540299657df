//! Run configuration.
mod types;

pub use types::{
    ConfigError,
    SyncSettings,
    ValidationError,
};
