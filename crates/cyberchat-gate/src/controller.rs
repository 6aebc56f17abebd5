//! Entry screen gate state machine.
//!
//! This module defines the [`GateController`], the single source of truth for
//! whether the user may proceed past the entry screen to device discovery or
//! a chat session.
//!
//! It consumes [`crate::GateEvent`]s and user intents and produces
//! [`crate::GateAction`]s for the runtime to execute. The only I/O it performs
//! is reading the host through the [`HostQuery`] traits, which keeps it fully
//! testable against fakes.
//!
//! # Responsibilities
//!
//! - Tracks the adapter state last read from the host and derives the
//!   [`GateStatus`] from it.
//! - Selects the permission set for the running platform and requests it in
//!   one batch when anything is missing.
//! - Correlates asynchronous host results with the request that caused them,
//!   allowing a single outstanding request at a time.

use crate::{
    AdapterState, Destination, EnableLabel, GateAction, GateConfig, GateError, GateEvent,
    GateStatus, GateView, HostQuery, Notice, PendingRequest, PermissionGrants, PermissionSet,
    RequestId, UserIntent,
};

/// Adapter and permission gate for the entry screen.
///
/// Built fresh on each screen activation; nothing carries over between
/// sessions. After [`GateController::teardown`] every input is ignored.
#[derive(Debug, Clone)]
pub struct GateController {
    config: GateConfig,
    /// Distinguishes this instance's requests from earlier activations.
    session: u64,
    /// Last issued request sequence number.
    seq: u64,
    adapter: AdapterState,
    /// Outstanding host request. `None` if nothing is pending.
    pending: Option<(PendingRequest, RequestId)>,
    initialized: bool,
    torn_down: bool,
}

impl GateController {
    /// Create a controller for one screen session.
    pub fn new(config: GateConfig, session: u64) -> Self {
        Self {
            config,
            session,
            seq: 0,
            adapter: AdapterState::Disabled,
            pending: None,
            initialized: false,
            torn_down: false,
        }
    }

    /// Screen activated: probe hardware, read power state, check permissions.
    ///
    /// Without radio hardware the gate settles on [`GateStatus::Error`] and
    /// performs no further checks for the rest of the session. Runs once per
    /// session; later calls only re-read the power state.
    pub fn initialize<H: HostQuery + ?Sized>(&mut self, host: &H) -> Vec<GateAction> {
        if self.torn_down {
            return vec![];
        }
        if self.initialized {
            tracing::debug!(session = self.session, "already initialized, refreshing only");
            return self.refresh_status(host);
        }
        self.initialized = true;

        if !host.present() {
            tracing::info!(session = self.session, "no radio hardware, gate closed");
            self.adapter = AdapterState::Unsupported;
            return vec![GateAction::Render(self.view(host))];
        }

        let mut actions = self.refresh_status(host);
        actions.extend(self.issue_permission_request(host));
        actions
    }

    /// Re-read adapter power state and re-render.
    pub fn refresh_status<H: HostQuery + ?Sized>(&mut self, host: &H) -> Vec<GateAction> {
        if self.torn_down {
            return vec![];
        }

        if self.adapter != AdapterState::Unsupported {
            let observed =
                if host.powered_on() { AdapterState::Enabled } else { AdapterState::Disabled };
            if observed != self.adapter {
                tracing::debug!("adapter {:?} -> {:?}", self.adapter, observed);
            }
            self.adapter = observed;
        }

        vec![GateAction::Render(self.view(host))]
    }

    /// Request the platform's required permissions if any are missing.
    ///
    /// Returns no actions when everything is already granted.
    pub fn check_permissions<H: HostQuery + ?Sized>(
        &mut self,
        host: &H,
    ) -> Result<Vec<GateAction>, GateError> {
        self.ensure_live()?;
        if self.adapter == AdapterState::Unsupported {
            return Err(GateError::HardwareAbsent);
        }
        self.ensure_idle()?;

        Ok(self.issue_permission_request(host))
    }

    /// Ask the host to power on the adapter.
    ///
    /// The adapter state does not change until the result event arrives.
    pub fn request_enable_adapter<H: HostQuery + ?Sized>(
        &mut self,
        host: &H,
    ) -> Result<Vec<GateAction>, GateError> {
        self.ensure_live()?;
        match self.adapter {
            AdapterState::Unsupported => return Err(GateError::HardwareAbsent),
            AdapterState::Enabled => return Err(GateError::AlreadyEnabled),
            AdapterState::Disabled => {},
        }
        self.ensure_idle()?;

        let set = PermissionSet::for_platform(host, &self.config);
        if !self.connect_granted(host, set) {
            return Err(GateError::ConnectPermissionMissing(set.connect_permission()));
        }

        let id = self.issue(PendingRequest::EnableAdapter);
        Ok(vec![GateAction::RequestEnableAdapter { id }, GateAction::Render(self.view(host))])
    }

    /// Adapter enable dialog answered.
    ///
    /// Always re-reads the power state, since an accepted request may not be
    /// reflected by the adapter yet. Permissions are not re-checked.
    pub fn on_enable_adapter_result<H: HostQuery + ?Sized>(
        &mut self,
        host: &H,
        id: RequestId,
        accepted: bool,
    ) -> Vec<GateAction> {
        if !self.take_pending(PendingRequest::EnableAdapter, id) {
            return vec![];
        }

        let notice = if accepted { Notice::AdapterEnabled } else { Notice::AdapterNotEnabled };
        let duration = self.config.duration_for(&notice);
        let mut actions = vec![GateAction::Notify { notice, duration }];
        actions.extend(self.refresh_status(host));
        actions
    }

    /// Permission dialog answered.
    ///
    /// Refusals are reported once and not retried. Adapter state is left
    /// alone.
    pub fn on_permission_result<H: HostQuery + ?Sized>(
        &mut self,
        host: &H,
        id: RequestId,
        grants: &PermissionGrants,
    ) -> Vec<GateAction> {
        if !self.take_pending(PendingRequest::GrantPermissions, id) {
            return vec![];
        }

        let mut actions = Vec::new();
        let missing = grants.missing();
        if !missing.is_empty() {
            tracing::debug!("permissions refused: {:?}", missing);
            let notice = Notice::PermissionsRequired { missing };
            let duration = self.config.duration_for(&notice);
            actions.push(GateAction::Notify { notice, duration });
        }
        actions.push(GateAction::Render(self.view(host)));
        actions
    }

    /// Open a downstream screen.
    ///
    /// Fails if downstream actions are disabled. The host must not expose
    /// enabled action controls in that state.
    pub fn request_navigate(&self, target: Destination) -> Result<Vec<GateAction>, GateError> {
        self.ensure_live()?;
        if !self.actions_enabled() {
            return Err(GateError::ActionsDisabled(target));
        }
        Ok(vec![GateAction::Navigate(target)])
    }

    /// Screen destroyed. Drops any pending request; late results are ignored.
    pub fn teardown(&mut self) {
        if let Some((kind, id)) = self.pending.take() {
            tracing::debug!("abandoning pending {kind} request {id}");
        }
        self.torn_down = true;
        tracing::info!(session = self.session, "gate torn down");
    }

    /// Process an event and return actions.
    ///
    /// Refused user intents are logged and produce no actions.
    pub fn handle<H: HostQuery + ?Sized>(&mut self, host: &H, event: GateEvent) -> Vec<GateAction> {
        if self.torn_down {
            tracing::debug!("ignoring {:?} after teardown", event);
            return vec![];
        }

        let result = match event {
            GateEvent::Resumed | GateEvent::AdapterStateChanged => Ok(self.refresh_status(host)),
            GateEvent::EnableAdapterResult { id, accepted } => {
                Ok(self.on_enable_adapter_result(host, id, accepted))
            },
            GateEvent::PermissionResult { id, grants } => {
                Ok(self.on_permission_result(host, id, &grants))
            },
            GateEvent::Intent(UserIntent::EnableAdapter) => self.request_enable_adapter(host),
            GateEvent::Intent(UserIntent::RequestPermissions) => self.check_permissions(host),
            GateEvent::Intent(UserIntent::Navigate(target)) => self.request_navigate(target),
            GateEvent::TornDown => {
                self.teardown();
                Ok(vec![])
            },
        };

        result.unwrap_or_else(|e| {
            tracing::warn!("refused: {e}");
            vec![]
        })
    }

    /// Render model for the current state.
    pub fn view<H: HostQuery + ?Sized>(&self, host: &H) -> GateView {
        let enabled = self.adapter == AdapterState::Enabled;
        let enable_label =
            if enabled { EnableLabel::AlreadyEnabled } else { EnableLabel::EnableAdapter };
        let enable_button_enabled = self.adapter == AdapterState::Disabled
            && self.pending.is_none()
            && self.connect_granted(host, PermissionSet::for_platform(host, &self.config));

        GateView {
            status: self.status(),
            adapter: self.adapter,
            actions_enabled: enabled,
            enable_label,
            enable_button_enabled,
        }
    }

    /// Adapter state as last read from the host.
    pub fn adapter_state(&self) -> AdapterState {
        self.adapter
    }

    /// Status derived from the adapter state.
    pub fn status(&self) -> GateStatus {
        GateStatus::from(self.adapter)
    }

    /// Discovery and chat allowed.
    pub fn actions_enabled(&self) -> bool {
        self.adapter == AdapterState::Enabled
    }

    /// Outstanding host request. `None` if nothing is pending.
    pub fn pending(&self) -> Option<(PendingRequest, RequestId)> {
        self.pending
    }

    /// Session number this controller was created with.
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Whether the screen has been torn down.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Controller configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    fn issue_permission_request<H: HostQuery + ?Sized>(&mut self, host: &H) -> Vec<GateAction> {
        if !host.at_least(self.config.runtime_permissions_level) {
            tracing::debug!("install-time permissions, nothing to request");
            return vec![];
        }

        let set = PermissionSet::for_platform(host, &self.config);
        if set.permissions().iter().all(|p| host.granted(*p)) {
            return vec![];
        }

        let id = self.issue(PendingRequest::GrantPermissions);
        vec![GateAction::RequestPermissions { id, set }, GateAction::Render(self.view(host))]
    }

    fn connect_granted<H: HostQuery + ?Sized>(&self, host: &H, set: PermissionSet) -> bool {
        !host.at_least(self.config.runtime_permissions_level)
            || host.granted(set.connect_permission())
    }

    fn issue(&mut self, kind: PendingRequest) -> RequestId {
        self.seq += 1;
        let id = RequestId { session: self.session, seq: self.seq };
        tracing::debug!("issuing {kind} request {id}");
        self.pending = Some((kind, id));
        id
    }

    /// Clear the pending request if `id` answers it.
    fn take_pending(&mut self, kind: PendingRequest, id: RequestId) -> bool {
        if self.torn_down {
            tracing::debug!("ignoring {kind} result {id} after teardown");
            return false;
        }
        if self.pending != Some((kind, id)) {
            tracing::warn!("ignoring stale {kind} result {id}, pending {:?}", self.pending);
            return false;
        }
        self.pending = None;
        true
    }

    fn ensure_live(&self) -> Result<(), GateError> {
        if self.torn_down { Err(GateError::TornDown) } else { Ok(()) }
    }

    fn ensure_idle(&self) -> Result<(), GateError> {
        match self.pending {
            Some((kind, _)) => Err(GateError::RequestPending(kind)),
            None => Ok(()),
        }
    }
}
