//! Host bridge for the editor session.
//!
//! This module exposes the command/event protocol, the async [`Host`]
//! contract, the recovery confirmation chain, and the worker spawn helper
//! used by the egui UI thread.

mod confirm;
pub mod desktop;
mod host;
mod protocol;
#[cfg(test)]
pub(crate) mod test_support;
mod worker;

pub use confirm::{
    ConfirmRequest, ConfirmationChain, ConfirmationProvider, FixedAnswer, HostAskTier,
    LastResortConfirm, RecoveryDialogTier,
};
pub use host::Host;
pub use protocol::{HostCmd, HostEvent, OpenedFile, RequestId};
pub use worker::{spawn_host_worker, HostHandle};
