//! Gate input events.
//!
//! This module defines [`GateEvent`], the inputs that drive the
//! [`crate::GateController`] after activation.
//!
//! Events originate from two distinct sources:
//! - User interactions with the entry screen ([`UserIntent`]).
//! - Host notifications: lifecycle changes and the results of asynchronous
//!   enable/permission requests.

use crate::{Destination, PermissionGrants, RequestId};

/// User interaction with the entry screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserIntent {
    /// Enable button pressed.
    EnableAdapter,
    /// User asked to re-run the permission check.
    RequestPermissions,
    /// Discovery or chat button pressed.
    Navigate(Destination),
}

/// Events processed by the gate controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateEvent {
    /// Screen returned to the foreground.
    Resumed,

    /// Host reported an adapter power change (e.g. toggled in OS settings).
    AdapterStateChanged,

    /// Result of an adapter enable request.
    EnableAdapterResult {
        /// Request this answers.
        id: RequestId,
        /// User accepted the enable dialog.
        accepted: bool,
    },

    /// Result of a batched permission request.
    PermissionResult {
        /// Request this answers.
        id: RequestId,
        /// Per-permission outcome.
        grants: PermissionGrants,
    },

    /// User interaction.
    Intent(UserIntent),

    /// Screen destroyed. Everything after this is ignored.
    TornDown,
}
