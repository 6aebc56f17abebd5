//! Observable gate state types.
//!
//! These are the "View Model" of the entry screen: the adapter state the
//! controller last observed, the status derived from it, and the
//! [`GateView`] handed to the renderer.

use std::fmt;

/// Radio adapter state as last observed from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterState {
    /// No radio hardware. Terminal for the session.
    Unsupported,
    /// Hardware present, powered off.
    Disabled,
    /// Hardware present, powered on.
    Enabled,
}

impl AdapterState {
    /// Adapter description line.
    pub fn label(self) -> &'static str {
        match self {
            Self::Unsupported => "Bluetooth not supported",
            Self::Disabled => "Bluetooth disabled",
            Self::Enabled => "Bluetooth enabled",
        }
    }
}

/// UI-facing status derived from [`AdapterState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    /// No radio hardware.
    Error,
    /// Radio disabled.
    Offline,
    /// Radio enabled.
    Online,
}

impl From<AdapterState> for GateStatus {
    fn from(adapter: AdapterState) -> Self {
        match adapter {
            AdapterState::Unsupported => Self::Error,
            AdapterState::Disabled => Self::Offline,
            AdapterState::Enabled => Self::Online,
        }
    }
}

impl fmt::Display for GateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "ERROR",
            Self::Offline => "OFFLINE",
            Self::Online => "ONLINE",
        })
    }
}

/// Label shown on the enable-adapter button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnableLabel {
    /// Adapter can be turned on.
    EnableAdapter,
    /// Adapter is already on.
    AlreadyEnabled,
}

impl fmt::Display for EnableLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EnableAdapter => "ENABLE BLUETOOTH",
            Self::AlreadyEnabled => "BLUETOOTH ENABLED",
        })
    }
}

/// Everything the renderer needs to draw the entry screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateView {
    /// Overall status.
    pub status: GateStatus,
    /// Adapter state behind the status.
    pub adapter: AdapterState,
    /// Discovery and chat buttons enabled.
    pub actions_enabled: bool,
    /// Enable button label.
    pub enable_label: EnableLabel,
    /// Enable button enabled.
    pub enable_button_enabled: bool,
}

/// Asynchronous host request awaiting its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingRequest {
    /// Adapter enable dialog is up.
    EnableAdapter,
    /// Permission dialog is up.
    GrantPermissions,
}

impl fmt::Display for PendingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EnableAdapter => "enable adapter",
            Self::GrantPermissions => "grant permissions",
        })
    }
}

/// Correlates a host request with its result.
///
/// `session` distinguishes controller instances across screen activations,
/// `seq` distinguishes requests within one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId {
    /// Controller session the request was issued from.
    pub session: u64,
    /// Per-session sequence number.
    pub seq: u64,
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.session, self.seq)
    }
}
