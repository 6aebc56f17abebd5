//! Transient user notifications.

use std::fmt;

use crate::Permission;

/// How long a notice stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeDuration {
    /// A couple of seconds.
    Short,
    /// Long enough to read a sentence.
    Long,
}

/// Notification surfaced by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// User accepted the enable dialog.
    AdapterEnabled,
    /// User declined or cancelled the enable dialog.
    AdapterNotEnabled,
    /// Some required permissions were refused.
    PermissionsRequired {
        /// Refused permissions, in request order.
        missing: Vec<Permission>,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdapterEnabled => f.write_str("Bluetooth enabled"),
            Self::AdapterNotEnabled => {
                f.write_str("Bluetooth was not enabled. You are leaving the chat setup.")
            },
            Self::PermissionsRequired { missing } => {
                f.write_str("CyberChat cannot work without these permissions: ")?;
                let names: Vec<_> = missing.iter().map(|p| p.name()).collect();
                f.write_str(&names.join(", "))
            },
        }
    }
}
