//! Gate error types.
//!
//! Every variant is a refused operation, never a crash. Controller state is
//! unchanged when an operation returns one of these.

use thiserror::Error;

use crate::{Destination, PendingRequest, Permission};

/// Operation refused by the gate controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// Device has no radio hardware.
    #[error("radio hardware absent")]
    HardwareAbsent,

    /// Adapter is already powered on.
    #[error("adapter already enabled")]
    AlreadyEnabled,

    /// Enable request would be rejected by the host without this permission.
    #[error("permission {0} required to enable the adapter")]
    ConnectPermissionMissing(Permission),

    /// Another host request is still outstanding.
    #[error("{0} request already pending")]
    RequestPending(PendingRequest),

    /// Navigation attempted while downstream actions are disabled.
    ///
    /// The host UI must not expose enabled action controls in this state,
    /// so this indicates a host bug.
    #[error("cannot open {0:?} while the adapter is not enabled")]
    ActionsDisabled(Destination),

    /// Screen was torn down.
    #[error("gate torn down")]
    TornDown,
}
