//! Gate side-effects and intents.
//!
//! This module defines the [`GateAction`] enum, which represents instructions
//! produced by the [`crate::GateController`] for the runtime to execute.

use crate::{GateView, Notice, NoticeDuration, PermissionSet, RequestId};

/// Downstream screen reachable from the entry screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Device discovery.
    Discovery,
    /// Chat session.
    Chat,
}

/// Actions produced by the gate controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateAction {
    /// Draw the entry screen.
    Render(GateView),

    /// Ask the host to show the adapter enable dialog.
    RequestEnableAdapter {
        /// Echoed back in [`crate::GateEvent::EnableAdapterResult`].
        id: RequestId,
    },

    /// Ask the host for every permission in `set` in one dialog.
    RequestPermissions {
        /// Echoed back in [`crate::GateEvent::PermissionResult`].
        id: RequestId,
        /// Required set.
        set: PermissionSet,
    },

    /// Open a downstream screen.
    Navigate(Destination),

    /// Show a transient notification.
    Notify {
        /// What to say.
        notice: Notice,
        /// How long to show it.
        duration: NoticeDuration,
    },
}
