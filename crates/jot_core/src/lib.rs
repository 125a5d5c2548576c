//! Core domain library for Jot (config, recovery storage, text helpers).

/// Configuration loading and defaults.
pub mod config;
/// Shared timing and naming constants.
pub mod constants;
/// Host-call error types.
pub mod error;
/// On-disk crash-recovery snapshots.
pub mod recovery;
/// Path and length helpers shared by the session and the host.
pub mod text;
/// Window title formatting.
pub mod title;

pub use config::Config;
pub use error::{HostError, HostResult};
pub use recovery::RecoveryStore;
