//! Runtime permissions required to use the radio.
//!
//! The required identifiers depend on the platform release. Older releases
//! guard the radio behind the basic `BLUETOOTH`/`BLUETOOTH_ADMIN` pair, newer
//! ones split it into explicit connect and scan permissions. Both keep the
//! location permissions needed for discovery.

use std::fmt;

use crate::{GateConfig, PlatformVersion};

/// A single OS permission identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Permission {
    /// Basic radio access (legacy releases).
    Bluetooth,
    /// Radio administration, including enable requests (legacy releases).
    BluetoothAdmin,
    /// Connect to paired devices and toggle the adapter (modern releases).
    BluetoothConnect,
    /// Discover nearby devices (modern releases).
    BluetoothScan,
    /// Approximate location.
    AccessCoarseLocation,
    /// Precise location.
    AccessFineLocation,
}

impl Permission {
    /// Manifest identifier as the platform spells it.
    pub fn id(self) -> &'static str {
        match self {
            Self::Bluetooth => "android.permission.BLUETOOTH",
            Self::BluetoothAdmin => "android.permission.BLUETOOTH_ADMIN",
            Self::BluetoothConnect => "android.permission.BLUETOOTH_CONNECT",
            Self::BluetoothScan => "android.permission.BLUETOOTH_SCAN",
            Self::AccessCoarseLocation => "android.permission.ACCESS_COARSE_LOCATION",
            Self::AccessFineLocation => "android.permission.ACCESS_FINE_LOCATION",
        }
    }

    /// Identifier without the `android.permission.` namespace.
    pub fn name(self) -> &'static str {
        self.id().trim_start_matches("android.permission.")
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

const LEGACY: [Permission; 4] = [
    Permission::Bluetooth,
    Permission::BluetoothAdmin,
    Permission::AccessCoarseLocation,
    Permission::AccessFineLocation,
];

const MODERN: [Permission; 4] = [
    Permission::BluetoothConnect,
    Permission::BluetoothScan,
    Permission::AccessCoarseLocation,
    Permission::AccessFineLocation,
];

/// Permission set required by the running platform release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionSet {
    /// Releases before the connect/scan split.
    Legacy,
    /// Releases with explicit connect and scan permissions.
    Modern,
}

impl PermissionSet {
    /// Resolve the required set for the running platform.
    pub fn for_platform<V: PlatformVersion + ?Sized>(platform: &V, config: &GateConfig) -> Self {
        if platform.at_least(config.modern_permissions_level) { Self::Modern } else { Self::Legacy }
    }

    /// Every permission in this set, in request order.
    pub fn permissions(self) -> &'static [Permission] {
        match self {
            Self::Legacy => &LEGACY,
            Self::Modern => &MODERN,
        }
    }

    /// Permission the host demands before it accepts an adapter enable
    /// request.
    pub fn connect_permission(self) -> Permission {
        match self {
            Self::Legacy => Permission::Bluetooth,
            Self::Modern => Permission::BluetoothConnect,
        }
    }

    /// Whether `permission` belongs to this set.
    pub fn contains(self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }
}

/// Outcome of a batched permission request, one entry per requested
/// permission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PermissionGrants {
    entries: Vec<(Permission, bool)>,
}

impl PermissionGrants {
    /// Build from `(permission, granted)` pairs.
    pub fn new(entries: impl IntoIterator<Item = (Permission, bool)>) -> Self {
        Self { entries: entries.into_iter().collect() }
    }

    /// Every permission in `set` granted.
    pub fn all_granted(set: PermissionSet) -> Self {
        Self::new(set.permissions().iter().map(|p| (*p, true)))
    }

    /// Every permission in `set` granted except those in `denied`.
    pub fn denying(set: PermissionSet, denied: &[Permission]) -> Self {
        Self::new(set.permissions().iter().map(|p| (*p, !denied.contains(p))))
    }

    /// Permissions the user refused, in request order.
    pub fn missing(&self) -> Vec<Permission> {
        self.entries.iter().filter(|(_, granted)| !granted).map(|(p, _)| *p).collect()
    }

    /// Whether `permission` was granted. `None` if it was not part of the
    /// answer.
    pub fn get(&self, permission: Permission) -> Option<bool> {
        self.entries.iter().find(|(p, _)| *p == permission).map(|(_, granted)| *granted)
    }

    /// Number of answered permissions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the host answered nothing (request dismissed).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
