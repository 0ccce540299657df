//! Synchronization driver.
mod orchestrator;

pub use orchestrator::{
    LocaleOutcome,
    RunSummary,
    SyncError,
    run,
};
