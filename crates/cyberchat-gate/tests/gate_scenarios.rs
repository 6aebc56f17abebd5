//! Scenario tests for the entry gate driven through the Runtime.
//!
//! # Oracle Pattern
//!
//! Tests end with oracle checks against what the simulated host recorded:
//! - Rendered views reflect the adapter state
//! - Requests are issued once, for the right permission set
//! - Notices match the dialog outcomes

use cyberchat_gate::{
    AdapterState, Destination, EnableLabel, GateConfig, GateController, GateEvent, GateStatus,
    Notice, NoticeDuration, Permission, PermissionGrants, PermissionSet, RequestId, Runtime,
    SimHost, UserIntent,
};

/// Run one session against `host` and return the runtime for inspection.
async fn run(host: SimHost) -> Runtime<SimHost> {
    let mut runtime = Runtime::new(host, GateConfig::default());
    let Ok(()) = runtime.run().await;
    runtime
}

#[tokio::test]
async fn disabled_adapter_without_permissions() {
    let runtime = run(SimHost::new().with_api_level(33).manual()).await;
    let host = runtime.driver();

    let view = host.renders.first().copied();
    assert!(matches!(view, Some(v) if v.status == GateStatus::Offline && !v.actions_enabled));

    assert_eq!(host.permission_requests.len(), 1);
    assert_eq!(host.permission_requests[0].1, PermissionSet::Modern);
    assert!(host.enable_requests.is_empty());
}

#[tokio::test]
async fn legacy_platform_requests_legacy_set() {
    let runtime = run(SimHost::new().with_api_level(28).manual()).await;
    let host = runtime.driver();

    assert_eq!(host.permission_requests.len(), 1);
    assert_eq!(host.permission_requests[0].1, PermissionSet::Legacy);
}

#[tokio::test]
async fn pre_runtime_permission_platform_requests_nothing() {
    let runtime = run(SimHost::new().with_api_level(21).manual()).await;
    let host = runtime.driver();

    assert!(host.permission_requests.is_empty());
    assert!(host.last_render().is_some_and(|v| v.enable_button_enabled));
}

#[tokio::test]
async fn enabled_adapter_with_permissions_is_online() {
    let runtime = run(SimHost::new().with_adapter_on().with_all_granted()).await;
    let host = runtime.driver();

    let view = host.last_render().copied();
    assert!(matches!(view, Some(v)
        if v.status == GateStatus::Online
            && v.actions_enabled
            && v.enable_label == EnableLabel::AlreadyEnabled
            && !v.enable_button_enabled));
    assert!(host.permission_requests.is_empty());
}

#[tokio::test]
async fn rejected_enable_stays_offline() {
    let host = SimHost::new().with_all_granted().declining_enable().with_events([
        GateEvent::Intent(UserIntent::EnableAdapter),
        GateEvent::Intent(UserIntent::EnableAdapter),
    ]);
    let runtime = run(host).await;
    let host = runtime.driver();

    // The rejection cleared the pending request, so the retry went out
    assert_eq!(host.enable_requests.len(), 2);
    assert_eq!(host.notices, vec![(Notice::AdapterNotEnabled, NoticeDuration::Short); 2]);
    assert!(host.last_render().is_some_and(|v| v.status == GateStatus::Offline));
    assert!(host.last_render().is_some_and(|v| v.enable_button_enabled));

    // Declining does not trigger a permission re-check
    assert!(host.permission_requests.is_empty());
}

#[tokio::test]
async fn partial_grant_notifies_without_touching_adapter() {
    let host = SimHost::new().with_api_level(34).refusing(&[Permission::BluetoothScan]);
    let runtime = run(host).await;
    let host = runtime.driver();

    assert_eq!(host.permission_requests.len(), 1);
    assert_eq!(host.notices, vec![(
        Notice::PermissionsRequired { missing: vec![Permission::BluetoothScan] },
        NoticeDuration::Long
    )]);
    assert!(host.last_render().is_some_and(|v| !v.actions_enabled));
    assert_eq!(
        runtime.controller().map(GateController::adapter_state),
        Some(AdapterState::Disabled)
    );
}

#[tokio::test]
async fn partial_grant_leaves_enabled_adapter_usable() {
    let host = SimHost::new().with_adapter_on().refusing(&[Permission::AccessFineLocation]);
    let runtime = run(host).await;
    let host = runtime.driver();

    assert_eq!(host.notices.len(), 1);
    assert!(host.last_render().is_some_and(|v| v.actions_enabled));
}

#[tokio::test]
async fn full_flow_reaches_chat() {
    let host = SimHost::new().with_events([
        GateEvent::Intent(UserIntent::EnableAdapter),
        GateEvent::Intent(UserIntent::Navigate(Destination::Chat)),
    ]);
    let runtime = run(host).await;
    let host = runtime.driver();

    assert_eq!(host.permission_requests.len(), 1);
    assert_eq!(host.enable_requests.len(), 1);
    assert_eq!(host.notices, vec![(Notice::AdapterEnabled, NoticeDuration::Short)]);
    assert_eq!(host.navigations, vec![Destination::Chat]);
    assert!(host.last_render().is_some_and(|v| v.status == GateStatus::Online));
}

#[tokio::test]
async fn navigation_blocked_while_offline() {
    let host = SimHost::new()
        .with_all_granted()
        .with_events([GateEvent::Intent(UserIntent::Navigate(Destination::Discovery))]);
    let runtime = run(host).await;

    assert!(runtime.driver().navigations.is_empty());
}

#[tokio::test]
async fn teardown_ends_session_and_drops_late_results() {
    let host = SimHost::new().with_all_granted().manual().with_events([
        GateEvent::Intent(UserIntent::EnableAdapter),
        GateEvent::TornDown,
        GateEvent::EnableAdapterResult { id: RequestId { session: 1, seq: 1 }, accepted: true },
    ]);
    let runtime = run(host).await;
    let host = runtime.driver();

    assert_eq!(host.enable_requests, vec![RequestId { session: 1, seq: 1 }]);
    assert!(host.notices.is_empty());
    assert!(runtime.controller().is_some_and(GateController::is_torn_down));
}

#[test]
fn controller_absent_before_first_session() {
    let runtime = Runtime::new(SimHost::new(), GateConfig::default());
    assert!(runtime.controller().is_none());
    assert!(runtime.driver().renders.is_empty());
}

#[tokio::test]
async fn new_session_ignores_results_from_previous_one() {
    let mut runtime = Runtime::new(SimHost::new().manual(), GateConfig::default());
    let Ok(()) = runtime.run().await;

    let (stale, set) = runtime.driver().permission_requests[0];
    let grants = PermissionGrants::denying(set, set.permissions());
    runtime.driver_mut().push_event(GateEvent::PermissionResult { id: stale, grants });

    let Ok(()) = runtime.run().await;
    let host = runtime.driver();

    assert_eq!(runtime.controller().map(GateController::session), Some(2));
    assert_eq!(host.permission_requests.len(), 2);
    assert_ne!(host.permission_requests[1].0, stale);
    assert!(host.notices.is_empty());
}

#[test]
fn external_power_toggle_updates_status() {
    let mut host = SimHost::new().with_adapter_on().with_all_granted();
    let mut gate = GateController::new(GateConfig::default(), 1);
    let _ = gate.initialize(&host);
    assert!(gate.actions_enabled());

    host.powered = false;
    let _ = gate.handle(&host, GateEvent::AdapterStateChanged);
    assert_eq!(gate.status(), GateStatus::Offline);
    assert!(!gate.actions_enabled());

    host.powered = true;
    let _ = gate.handle(&host, GateEvent::Resumed);
    assert_eq!(gate.status(), GateStatus::Online);
}

#[test]
fn enable_refused_when_already_enabled() {
    let host = SimHost::new().with_adapter_on().with_all_granted();
    let mut gate = GateController::new(GateConfig::default(), 1);
    let _ = gate.initialize(&host);

    assert_eq!(gate.request_enable_adapter(&host), Err(cyberchat_gate::GateError::AlreadyEnabled));
    assert!(gate.pending().is_none());
}
