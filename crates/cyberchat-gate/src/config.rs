//! Controller configuration.

use crate::{Notice, NoticeDuration};

/// Tunables for the gate controller.
///
/// Defaults match Android: runtime permissions arrived with API 23 (M) and
/// the connect/scan split with API 31 (S).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Lowest API level with runtime permissions. Below it every permission
    /// is granted at install time and no permission request is issued.
    pub runtime_permissions_level: u32,
    /// Lowest API level requiring the modern permission set.
    pub modern_permissions_level: u32,
    /// Display duration for adapter enable outcomes.
    pub adapter_notice_duration: NoticeDuration,
    /// Display duration for the missing-permissions notice.
    pub permission_notice_duration: NoticeDuration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            runtime_permissions_level: 23,
            modern_permissions_level: 31,
            adapter_notice_duration: NoticeDuration::Short,
            permission_notice_duration: NoticeDuration::Long,
        }
    }
}

impl GateConfig {
    /// Display duration for `notice`.
    pub fn duration_for(&self, notice: &Notice) -> NoticeDuration {
        match notice {
            Notice::AdapterEnabled | Notice::AdapterNotEnabled => self.adapter_notice_duration,
            Notice::PermissionsRequired { .. } => self.permission_notice_duration,
        }
    }
}
