//! Deterministic simulated host.
//!
//! [`SimHost`] stands in for the radio subsystem, the OS permission manager
//! and the screen at once. It answers queries from plain fields, records
//! every action it is asked to perform, and can answer enable/permission
//! dialogs itself the way a scripted user would.

use std::{
    collections::{BTreeSet, VecDeque},
    convert::Infallible,
};

use crate::{
    Destination, Driver, GateEvent, GateView, Notice, NoticeDuration, Permission, PermissionGrants,
    PermissionHost, PermissionSet, PlatformVersion, RadioHardwareQuery, RequestId,
};

/// Every permission any platform release asks for.
const ALL_PERMISSIONS: [Permission; 6] = [
    Permission::Bluetooth,
    Permission::BluetoothAdmin,
    Permission::BluetoothConnect,
    Permission::BluetoothScan,
    Permission::AccessCoarseLocation,
    Permission::AccessFineLocation,
];

/// Scripted host for tests and simulation.
#[derive(Debug, Clone)]
pub struct SimHost {
    /// Radio hardware present.
    pub present: bool,
    /// Adapter powered on.
    pub powered: bool,
    /// Platform API level.
    pub api_level: u32,
    /// Currently granted permissions.
    pub granted: BTreeSet<Permission>,
    /// Answer dialogs automatically by queueing the result event.
    pub auto_answer: bool,
    /// Simulated user accepts the enable dialog.
    pub accept_enable: bool,
    /// Adapter actually powers on after an accepted enable dialog.
    pub power_on_accept: bool,
    /// Permissions the simulated user refuses in the permission dialog.
    pub refuse: BTreeSet<Permission>,

    events: VecDeque<GateEvent>,
    /// Every rendered view, oldest first.
    pub renders: Vec<GateView>,
    /// Every notice shown, oldest first.
    pub notices: Vec<(Notice, NoticeDuration)>,
    /// Every navigation performed.
    pub navigations: Vec<Destination>,
    /// Every enable request issued.
    pub enable_requests: Vec<RequestId>,
    /// Every permission request issued.
    pub permission_requests: Vec<(RequestId, PermissionSet)>,
}

impl Default for SimHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SimHost {
    /// Modern platform with hardware present, adapter off and nothing
    /// granted. The simulated user accepts every dialog.
    pub fn new() -> Self {
        Self {
            present: true,
            powered: false,
            api_level: 34,
            granted: BTreeSet::new(),
            auto_answer: true,
            accept_enable: true,
            power_on_accept: true,
            refuse: BTreeSet::new(),
            events: VecDeque::new(),
            renders: Vec::new(),
            notices: Vec::new(),
            navigations: Vec::new(),
            enable_requests: Vec::new(),
            permission_requests: Vec::new(),
        }
    }

    /// Device without radio hardware.
    pub fn without_hardware(mut self) -> Self {
        self.present = false;
        self
    }

    /// Adapter already powered on.
    pub fn with_adapter_on(mut self) -> Self {
        self.powered = true;
        self
    }

    /// Platform at `level`.
    pub fn with_api_level(mut self, level: u32) -> Self {
        self.api_level = level;
        self
    }

    /// Grant `permissions` up front.
    pub fn granting(mut self, permissions: &[Permission]) -> Self {
        self.granted.extend(permissions.iter().copied());
        self
    }

    /// Grant every permission any release asks for.
    pub fn with_all_granted(self) -> Self {
        self.granting(&ALL_PERMISSIONS)
    }

    /// Simulated user declines the enable dialog.
    pub fn declining_enable(mut self) -> Self {
        self.accept_enable = false;
        self
    }

    /// Simulated user refuses `permissions` in the permission dialog.
    pub fn refusing(mut self, permissions: &[Permission]) -> Self {
        self.refuse.extend(permissions.iter().copied());
        self
    }

    /// Leave dialogs unanswered.
    pub fn manual(mut self) -> Self {
        self.auto_answer = false;
        self
    }

    /// Queue events for [`Driver::poll_event`].
    pub fn with_events(mut self, events: impl IntoIterator<Item = GateEvent>) -> Self {
        self.events.extend(events);
        self
    }

    /// Queue one event.
    pub fn push_event(&mut self, event: GateEvent) {
        self.events.push_back(event);
    }

    /// Most recent view. `None` before the first render.
    pub fn last_render(&self) -> Option<&GateView> {
        self.renders.last()
    }

    /// The user's answer to a permission dialog for `set`, applied to the
    /// grant state.
    pub fn answer_permissions(&mut self, set: PermissionSet) -> PermissionGrants {
        let refused: Vec<_> = self.refuse.iter().copied().collect();
        let grants = PermissionGrants::denying(set, &refused);
        for p in set.permissions() {
            if grants.get(*p) == Some(true) {
                self.granted.insert(*p);
            }
        }
        grants
    }

    /// The user's answer to an enable dialog, applied to the power state.
    pub fn answer_enable(&mut self) -> bool {
        if self.accept_enable && self.power_on_accept {
            self.powered = true;
        }
        self.accept_enable
    }
}

impl RadioHardwareQuery for SimHost {
    fn present(&self) -> bool {
        self.present
    }

    fn powered_on(&self) -> bool {
        self.present && self.powered
    }
}

impl PermissionHost for SimHost {
    fn granted(&self, permission: Permission) -> bool {
        self.granted.contains(&permission)
    }
}

impl PlatformVersion for SimHost {
    fn at_least(&self, level: u32) -> bool {
        self.api_level >= level
    }
}

impl Driver for SimHost {
    type Error = Infallible;

    async fn poll_event(&mut self) -> Result<Option<GateEvent>, Self::Error> {
        Ok(self.events.pop_front())
    }

    fn render(&mut self, view: &GateView) -> Result<(), Self::Error> {
        self.renders.push(*view);
        Ok(())
    }

    fn request_enable_adapter(&mut self, id: RequestId) -> Result<(), Self::Error> {
        self.enable_requests.push(id);
        if self.auto_answer {
            let accepted = self.answer_enable();
            self.events.push_front(GateEvent::EnableAdapterResult { id, accepted });
        }
        Ok(())
    }

    fn request_permissions(
        &mut self,
        id: RequestId,
        set: PermissionSet,
    ) -> Result<(), Self::Error> {
        self.permission_requests.push((id, set));
        if self.auto_answer {
            let grants = self.answer_permissions(set);
            self.events.push_front(GateEvent::PermissionResult { id, grants });
        }
        Ok(())
    }

    fn navigate(&mut self, target: Destination) -> Result<(), Self::Error> {
        self.navigations.push(target);
        Ok(())
    }

    fn notify(&mut self, notice: &Notice, duration: NoticeDuration) -> Result<(), Self::Error> {
        self.notices.push((notice.clone(), duration));
        Ok(())
    }
}
