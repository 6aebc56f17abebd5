//! Property-based tests for the gate state machine.
//!
//! Tests verify that invariants hold under arbitrary interleavings of user
//! intents, host results and external adapter changes.

use cyberchat_gate::{
    AdapterState, Destination, GateAction, GateConfig, GateController, GateEvent, GateStatus,
    PendingRequest, Permission, PermissionGrants, PermissionSet, RequestId, SimHost, UserIntent,
};
use proptest::prelude::*;

/// One step of the simulated world.
#[derive(Debug, Clone)]
enum Op {
    Resume,
    /// Adapter toggled outside the app, followed by the change notification.
    TogglePower,
    EnableIntent,
    PermissionIntent,
    Navigate(Destination),
    /// Answer the pending enable dialog, if any.
    AnswerEnable(bool),
    /// Answer the pending permission dialog, refusing the masked entries.
    AnswerPermissions(u8),
    /// Deliver a result nobody asked for.
    Stale(u64),
    TearDown,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => Just(Op::Resume),
        2 => Just(Op::TogglePower),
        3 => Just(Op::EnableIntent),
        1 => Just(Op::PermissionIntent),
        2 => prop_oneof![Just(Destination::Discovery), Just(Destination::Chat)]
            .prop_map(Op::Navigate),
        3 => any::<bool>().prop_map(Op::AnswerEnable),
        3 => (0u8..16).prop_map(Op::AnswerPermissions),
        1 => (100u64..200).prop_map(Op::Stale),
        1 => Just(Op::TearDown),
    ]
}

fn host_strategy() -> impl Strategy<Value = SimHost> {
    (any::<bool>(), any::<bool>(), prop_oneof![Just(21u32), Just(28), Just(31), Just(34)], 0u8..64)
        .prop_map(|(present, powered, api_level, mask)| {
            let all = [
                Permission::Bluetooth,
                Permission::BluetoothAdmin,
                Permission::BluetoothConnect,
                Permission::BluetoothScan,
                Permission::AccessCoarseLocation,
                Permission::AccessFineLocation,
            ];
            let granted: Vec<_> = all
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, p)| *p)
                .collect();

            let mut host = SimHost::new().with_api_level(api_level).granting(&granted).manual();
            host.present = present;
            host.powered = powered;
            host
        })
}

/// Translate an op into an event, mutating the host the way the OS would.
fn event_for(op: &Op, gate: &GateController, host: &mut SimHost) -> GateEvent {
    match op {
        Op::Resume => GateEvent::Resumed,
        Op::TogglePower => {
            host.powered = !host.powered;
            GateEvent::AdapterStateChanged
        },
        Op::EnableIntent => GateEvent::Intent(UserIntent::EnableAdapter),
        Op::PermissionIntent => GateEvent::Intent(UserIntent::RequestPermissions),
        Op::Navigate(target) => GateEvent::Intent(UserIntent::Navigate(*target)),
        Op::AnswerEnable(accepted) => match gate.pending() {
            Some((PendingRequest::EnableAdapter, id)) => {
                host.accept_enable = *accepted;
                let accepted = host.answer_enable();
                GateEvent::EnableAdapterResult { id, accepted }
            },
            _ => GateEvent::Resumed,
        },
        Op::AnswerPermissions(mask) => match gate.pending() {
            Some((PendingRequest::GrantPermissions, id)) => {
                let set = PermissionSet::for_platform(host, gate.config());
                host.refuse = set
                    .permissions()
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, p)| *p)
                    .collect();
                GateEvent::PermissionResult { id, grants: host.answer_permissions(set) }
            },
            _ => GateEvent::Resumed,
        },
        Op::Stale(seq) => GateEvent::EnableAdapterResult {
            id: RequestId { session: gate.session(), seq: *seq },
            accepted: true,
        },
        Op::TearDown => GateEvent::TornDown,
    }
}

/// Check invariants after one step.
fn check_step(
    gate: &GateController,
    host: &SimHost,
    pending_before: Option<(PendingRequest, RequestId)>,
    actions: &[GateAction],
) -> Result<(), TestCaseError> {
    prop_assert_eq!(gate.actions_enabled(), gate.adapter_state() == AdapterState::Enabled);
    prop_assert_eq!(gate.status(), GateStatus::from(gate.adapter_state()));

    if !host.present {
        prop_assert_eq!(gate.status(), GateStatus::Error);
    }

    let requests = actions
        .iter()
        .filter(|a| {
            matches!(
                a,
                GateAction::RequestEnableAdapter { .. } | GateAction::RequestPermissions { .. }
            )
        })
        .count();
    prop_assert!(requests <= 1, "more than one request in one step: {:?}", actions);
    if requests == 1 {
        prop_assert!(pending_before.is_none(), "request issued while {:?} pending", pending_before);
        prop_assert!(gate.pending().is_some());
    }

    for action in actions {
        match action {
            GateAction::Render(view) => {
                prop_assert_eq!(view.actions_enabled, view.adapter == AdapterState::Enabled);
                prop_assert_eq!(view.status, GateStatus::from(view.adapter));
                if view.enable_button_enabled {
                    prop_assert_eq!(view.adapter, AdapterState::Disabled);
                }
            },
            GateAction::Navigate(_) => prop_assert!(gate.actions_enabled()),
            GateAction::RequestPermissions { set, .. } => {
                prop_assert_eq!(*set, PermissionSet::for_platform(host, gate.config()));
            },
            GateAction::RequestEnableAdapter { .. } | GateAction::Notify { .. } => {},
        }
    }

    if gate.is_torn_down() {
        prop_assert!(actions.is_empty());
        prop_assert!(gate.pending().is_none());
    }

    Ok(())
}

proptest! {
    #[test]
    fn prop_gate_invariants_hold(
        mut host in host_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..60),
    ) {
        let mut gate = GateController::new(GateConfig::default(), 1);
        let actions = gate.initialize(&host);
        check_step(&gate, &host, None, &actions)?;

        for op in &ops {
            let pending_before = gate.pending();
            let event = event_for(op, &gate, &mut host);
            let actions = gate.handle(&host, event);
            check_step(&gate, &host, pending_before, &actions)?;
        }
    }

    #[test]
    fn prop_refresh_tracks_live_power(
        mut host in host_strategy(),
        toggles in prop::collection::vec(any::<bool>(), 1..20),
    ) {
        let mut gate = GateController::new(GateConfig::default(), 1);
        let _ = gate.initialize(&host);

        for powered in toggles {
            host.powered = powered;
            let _ = gate.refresh_status(&host);

            let expected = match (host.present, powered) {
                (false, _) => AdapterState::Unsupported,
                (true, true) => AdapterState::Enabled,
                (true, false) => AdapterState::Disabled,
            };
            prop_assert_eq!(gate.adapter_state(), expected);
            prop_assert_eq!(gate.actions_enabled(), expected == AdapterState::Enabled);
        }
    }

    #[test]
    fn prop_permission_check_selects_set_by_level(api_level in 1u32..40) {
        let host = SimHost::new().with_api_level(api_level).manual();
        let mut gate = GateController::new(GateConfig::default(), 1);
        let _ = gate.refresh_status(&host);

        let actions = gate.check_permissions(&host);
        let sets: Vec<_> = actions
            .iter()
            .flatten()
            .filter_map(|a| match a {
                GateAction::RequestPermissions { set, .. } => Some(*set),
                _ => None,
            })
            .collect();

        if api_level < 23 {
            prop_assert!(sets.is_empty());
        } else if api_level < 31 {
            prop_assert_eq!(sets, vec![PermissionSet::Legacy]);
        } else {
            prop_assert_eq!(sets, vec![PermissionSet::Modern]);
        }
    }
}

#[test]
fn partial_grant_leaves_actions_to_adapter_state() {
    let host = SimHost::new().with_api_level(34).manual();
    let mut gate = GateController::new(GateConfig::default(), 1);
    let _ = gate.initialize(&host);

    let pending = gate.pending();
    assert!(matches!(pending, Some((PendingRequest::GrantPermissions, _))));
    let id = pending.map_or(RequestId { session: 0, seq: 0 }, |(_, id)| id);

    let grants = PermissionGrants::denying(PermissionSet::Modern, &[Permission::BluetoothScan]);
    let actions = gate.on_permission_result(&host, id, &grants);

    assert!(matches!(actions.as_slice(), [GateAction::Notify { .. }, GateAction::Render(view)]
        if !view.actions_enabled));
    assert!(gate.pending().is_none());
    assert!(!gate.actions_enabled());
}
