//! Read-only queries the controller makes against its host platform.
//!
//! These are the synchronous half of the host contract. The asynchronous
//! half (enable requests, permission requests, rendering, navigation,
//! notifications) flows out of the controller as [`crate::GateAction`]s and
//! back in as [`crate::GateEvent`]s.

use crate::Permission;

/// Radio hardware presence and power state.
pub trait RadioHardwareQuery {
    /// Whether the device has radio hardware at all.
    fn present(&self) -> bool;

    /// Whether the adapter is currently powered on.
    fn powered_on(&self) -> bool;
}

/// OS grant state for runtime permissions.
pub trait PermissionHost {
    /// Whether `permission` is currently granted.
    fn granted(&self, permission: Permission) -> bool;
}

/// Running platform release.
pub trait PlatformVersion {
    /// Whether the platform API level is at least `level`.
    fn at_least(&self, level: u32) -> bool;
}

/// Everything the controller reads from its host.
///
/// Blanket-implemented for any type providing the three query traits.
pub trait HostQuery: RadioHardwareQuery + PermissionHost + PlatformVersion {}

impl<T> HostQuery for T where T: RadioHardwareQuery + PermissionHost + PlatformVersion {}
