use multistep_dialog::core::guard::{SingleGate, StepOrder, StrictLinear, ValidatedSoFar};
use multistep_dialog::state::affordance::step_items;
use multistep_dialog::{
    DialogError, DialogHandle, DialogProps, MultiStepDialog, Navigator, StayReason, Step,
    StepRegistry, Transition,
};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

fn registry(ids: &[&str]) -> StepRegistry<()> {
    StepRegistry::new(ids.iter().map(|id| Step::new(*id, *id, ())).collect())
}

#[test]
fn initializes_to_first_step_without_override() {
    let nav = Navigator::new(registry(&["a", "b", "c"]), None);
    assert_eq!(nav.active_step_id(), Some("a"));
    assert_eq!((nav.index(), nav.total()), (Some(0), 3));
}

#[test]
fn initial_override_must_be_a_member() {
    let nav = Navigator::new(registry(&["a", "b"]), Some("b".into()));
    assert_eq!(nav.active_step_id(), Some("b"));

    let nav = Navigator::new(registry(&["a", "b"]), Some("zzz".into()));
    assert_eq!(nav.active_step_id(), Some("a"));
}

#[test]
fn empty_registry_has_no_active_step() {
    let mut nav = Navigator::new(StepRegistry::<()>::empty(), Some("a".into()));
    assert_eq!(nav.active_step_id(), None);
    assert_eq!(nav.total(), 0);
    assert_eq!(nav.next(), Transition::Stayed(StayReason::EmptyRegistry));
    assert_eq!(nav.go_to("a"), Transition::Stayed(StayReason::EmptyRegistry));
}

#[test]
fn guard_is_the_sole_authority_for_go_to() {
    let ids = ["a", "b", "c"];
    let allowed: HashSet<(&str, &str)> = [("b", "a"), ("c", "b"), ("a", "c")].into();

    for current in ids {
        for target in ids.iter().copied().chain(["missing"]) {
            let table: Vec<(&'static str, &'static str)> = allowed.iter().copied().collect();
            let mut nav = Navigator::new(registry(&ids), Some(current.into())).with_guard(
                move |t: &str, c: &str| table.iter().any(|&(at, ac)| at == t && ac == c),
            );
            let moved = nav.go_to(target).moved();
            let expected = target != current && allowed.contains(&(target, current));
            assert_eq!(moved, expected, "go_to({target}) from {current}");
            let active = if expected { target } else { current };
            assert_eq!(nav.active_step_id(), Some(active));
        }
    }
}

#[test]
fn next_and_prev_stop_at_the_ends() {
    let mut nav = Navigator::new(registry(&["a", "b"]), None);
    assert_eq!(nav.prev(), Transition::Stayed(StayReason::AtFirstStep));
    assert!(nav.next().moved());
    assert_eq!(nav.next(), Transition::Stayed(StayReason::AtLastStep));
    assert_eq!(nav.active_step_id(), Some("b"));
}

#[test]
fn prev_is_also_subject_to_the_guard() {
    let mut nav = Navigator::new(registry(&["a", "b"]), Some("b".into()))
        .with_guard(|_: &str, _: &str| false);
    assert_eq!(nav.prev(), Transition::Stayed(StayReason::GuardRejected));
    assert_eq!(nav.active_step_id(), Some("b"));
}

#[test]
fn strict_linear_forbids_skipping_ahead() {
    let steps = registry(&["a", "b", "c"]);
    let order = StepOrder::from_registry(&steps);
    let mut nav = Navigator::new(steps, None).with_guard(StrictLinear::new(order, |_: &str| true));

    assert!(!nav.go_to("c").moved());
    assert_eq!(nav.active_step_id(), Some("a"));
    assert!(nav.next().moved());
    assert!(nav.go_to("c").moved());
    assert!(nav.go_to("a").moved());
}

#[test]
fn all_validated_so_far_scenario() {
    let steps = registry(&["names", "amounts", "directions"]);
    let order = StepOrder::from_registry(&steps);
    let names_valid = Rc::new(Cell::new(false));
    let flag = Rc::clone(&names_valid);
    let mut nav = Navigator::new(steps, None).with_guard(ValidatedSoFar::new(order, move |id: &str| {
        id != "names" || flag.get()
    }));

    assert!(!nav.go_to("amounts").moved());
    assert_eq!(nav.active_step_id(), Some("names"));

    names_valid.set(true);
    assert!(nav.next().moved());
    assert_eq!(nav.active_step_id(), Some("amounts"));

    names_valid.set(false);
    assert!(nav.prev().moved());
    assert_eq!(nav.active_step_id(), Some("names"));
}

#[test]
fn single_gate_scenario() {
    let steps = registry(&["general", "confirm"]);
    let order = StepOrder::from_registry(&steps);
    let project_name = Rc::new(RefCell::new(String::new()));
    let name = Rc::clone(&project_name);
    let mut nav = Navigator::new(steps, None).with_guard(SingleGate::new(order, move || {
        !name.borrow().trim().is_empty()
    }));

    assert!(!nav.next().moved());
    project_name.borrow_mut().push_str("  ");
    assert!(!nav.next().moved());

    project_name.borrow_mut().push_str("Acme");
    assert!(nav.next().moved());
    assert_eq!(nav.active_step_id(), Some("confirm"));

    project_name.borrow_mut().clear();
    assert!(nav.prev().moved());
    assert_eq!(nav.active_step_id(), Some("general"));
}

#[test]
fn shrinking_registry_resets_to_first_step() {
    let mut dialog = MultiStepDialog::new(DialogProps::new(registry(&["a", "b", "c"])).initial_step("c"));
    assert!(dialog.set_steps(registry(&["x", "y"])).expect("not busy"));

    let ctx = dialog.context().expect("attached");
    assert_eq!(ctx.active_step_id.as_deref(), Some("x"));
    assert_eq!((ctx.index, ctx.total), (Some(0), 2));
}

#[test]
fn reconciliation_keeps_a_surviving_active_step() {
    let mut nav = Navigator::new(registry(&["a", "b", "c"]), Some("b".into()));
    assert!(!nav.reconcile(registry(&["b", "c"])));
    assert_eq!(nav.active_step_id(), Some("b"));
    assert_eq!(nav.index(), Some(0));
}

#[test]
fn same_registry_is_not_reconciled() {
    let steps = registry(&["a", "b"]);
    let mut nav = Navigator::new(steps.clone(), None);
    assert!(nav.next().moved());
    assert!(!nav.reconcile(steps));
    assert_eq!(nav.active_step_id(), Some("b"));
}

#[test]
fn backward_sidebar_items_stay_enabled_under_a_rejecting_guard() {
    let dialog = MultiStepDialog::new(
        DialogProps::new(registry(&["a", "b", "c"]))
            .initial_step("b")
            .can_navigate_to_step(|_: &str, _: &str| false),
    );
    let items = step_items(&dialog.context().expect("attached"));
    let disabled: Vec<bool> = items.iter().map(|item| item.disabled).collect();
    assert_eq!(disabled, vec![false, false, true]);
}

#[test]
fn surfaces_outside_a_dialog_fail_loudly() {
    let handle = DialogHandle::<()>::detached();
    assert_eq!(handle.context().err(), Some(DialogError::OutsideDialog));
    assert_eq!(handle.next().err(), Some(DialogError::OutsideDialog));

    let dialog = MultiStepDialog::new(DialogProps::new(registry(&["a"])));
    let handle = dialog.handle();
    drop(dialog);
    assert_eq!(handle.prev().err(), Some(DialogError::OutsideDialog));
}

#[test]
fn closing_does_not_touch_the_active_step() {
    let requested = Rc::new(Cell::new(true));
    let sink = Rc::clone(&requested);
    let mut dialog = MultiStepDialog::new(
        DialogProps::new(registry(&["a", "b"]))
            .open(true)
            .on_open_change(move |open| sink.set(open)),
    );
    dialog.handle().next().expect("attached");

    dialog.request_open_change(false);
    assert!(!requested.get());
    dialog.set_open(requested.get()).expect("not busy");
    dialog.set_open(true).expect("not busy");
    assert_eq!(
        dialog.context().expect("attached").active_step_id.as_deref(),
        Some("b")
    );
}
