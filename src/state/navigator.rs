use crate::core::guard::{NavigationGuard, SharedGuard};
use crate::core::registry::StepRegistry;
use crate::core::step::{Step, StepId};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StayReason {
    EmptyRegistry,
    UnknownTarget,
    AtFirstStep,
    AtLastStep,
    GuardRejected,
    AlreadyActive,
}

/// Outcome of a navigation request. Rejections are reported here for callers
/// that care and are otherwise silent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Moved { from: StepId, to: StepId },
    Stayed(StayReason),
}

impl Transition {
    pub fn moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Owns the active step. The registry is only ever replaced wholesale and
/// the active id is only written by the operations below.
pub struct Navigator<C> {
    steps: StepRegistry<C>,
    guard: Option<SharedGuard>,
    initial_step: Option<StepId>,
    active: Option<StepId>,
}

impl<C> Navigator<C> {
    pub fn new(steps: StepRegistry<C>, initial_step: Option<StepId>) -> Self {
        let mut navigator = Self {
            steps,
            guard: None,
            initial_step,
            active: None,
        };
        navigator.active = navigator.resolve_initial();
        navigator
    }

    pub fn with_guard(mut self, guard: impl NavigationGuard + 'static) -> Self {
        self.guard = Some(Rc::new(guard));
        self
    }

    pub fn with_shared_guard(mut self, guard: Option<SharedGuard>) -> Self {
        self.guard = guard;
        self
    }

    pub fn set_guard(&mut self, guard: Option<SharedGuard>) {
        self.guard = guard;
    }

    pub fn guard(&self) -> Option<&SharedGuard> {
        self.guard.as_ref()
    }

    pub fn steps(&self) -> &StepRegistry<C> {
        &self.steps
    }

    pub fn active_step_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_step(&self) -> Option<&Step<C>> {
        self.active.as_deref().and_then(|id| self.steps.get(id))
    }

    pub fn index(&self) -> Option<usize> {
        self.active
            .as_deref()
            .and_then(|id| self.steps.position(id))
    }

    pub fn total(&self) -> usize {
        self.steps.len()
    }

    pub fn percent(&self) -> f32 {
        match self.index() {
            Some(index) if self.total() > 0 => (index + 1) as f32 / self.total() as f32 * 100.0,
            _ => 0.0,
        }
    }

    pub fn is_first(&self) -> bool {
        self.index() == Some(0)
    }

    pub fn is_last(&self) -> bool {
        self.index()
            .is_some_and(|index| index + 1 == self.total())
    }

    /// Adopts a host-supplied registry. Nothing happens unless the registry
    /// identity changed. Returns true when the active step had to be reset.
    pub fn reconcile(&mut self, steps: StepRegistry<C>) -> bool {
        if self.steps.same_registry(&steps) {
            return false;
        }
        self.steps = steps;

        let still_present = self
            .active
            .as_deref()
            .is_some_and(|id| self.steps.contains(id));
        if still_present {
            return false;
        }

        let previous = self.active.take();
        self.active = self.steps.first_id().map(ToOwned::to_owned);
        tracing::debug!(
            previous = previous.as_deref().unwrap_or("<none>"),
            reset_to = self.active.as_deref().unwrap_or("<none>"),
            "active step missing from new registry"
        );
        true
    }

    /// Follows a change of the host's initial-step input. Jumps straight to
    /// the new id when it is a member, without consulting the guard.
    pub fn retarget_initial(&mut self, initial_step: Option<StepId>) -> bool {
        if self.initial_step == initial_step {
            return false;
        }
        self.initial_step = initial_step;

        let Some(target) = self.initial_step.as_deref() else {
            return false;
        };
        if self.active.as_deref() == Some(target) || !self.steps.contains(target) {
            return false;
        }
        self.active = Some(target.to_owned());
        true
    }

    pub fn reset(&mut self) {
        self.active = self.resolve_initial();
    }

    pub fn go_to(&mut self, target: &str) -> Transition {
        if self.active.is_none() {
            return Transition::Stayed(StayReason::EmptyRegistry);
        }
        if !self.steps.contains(target) {
            tracing::trace!(requested = target, "ignoring navigation to unknown step");
            return Transition::Stayed(StayReason::UnknownTarget);
        }
        self.attempt(target.to_owned())
    }

    pub fn next(&mut self) -> Transition {
        let Some(index) = self.index() else {
            return Transition::Stayed(StayReason::EmptyRegistry);
        };
        match self.steps.at(index + 1).map(|step| step.id.clone()) {
            Some(target) => self.attempt(target),
            None => Transition::Stayed(StayReason::AtLastStep),
        }
    }

    pub fn prev(&mut self) -> Transition {
        let Some(index) = self.index() else {
            return Transition::Stayed(StayReason::EmptyRegistry);
        };
        let Some(target) = index
            .checked_sub(1)
            .and_then(|idx| self.steps.at(idx))
            .map(|step| step.id.clone())
        else {
            return Transition::Stayed(StayReason::AtFirstStep);
        };
        self.attempt(target)
    }

    pub fn can_navigate(&self, target: &str) -> bool {
        match (self.guard.as_ref(), self.active.as_deref()) {
            (Some(guard), Some(current)) => guard.can_navigate(target, current),
            _ => true,
        }
    }

    fn attempt(&mut self, target: StepId) -> Transition {
        let Some(current) = self.active.clone() else {
            return Transition::Stayed(StayReason::EmptyRegistry);
        };

        if !self.can_navigate(&target) {
            tracing::trace!(
                requested = target.as_str(),
                current = current.as_str(),
                "guard rejected navigation"
            );
            return Transition::Stayed(StayReason::GuardRejected);
        }
        if target == current {
            return Transition::Stayed(StayReason::AlreadyActive);
        }

        tracing::debug!(from = current.as_str(), to = target.as_str(), "step changed");
        self.active = Some(target.clone());
        Transition::Moved {
            from: current,
            to: target,
        }
    }

    fn resolve_initial(&self) -> Option<StepId> {
        self.initial_step
            .as_deref()
            .filter(|id| self.steps.contains(id))
            .or_else(|| self.steps.first_id())
            .map(ToOwned::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::{Navigator, StayReason, Transition};
    use crate::core::guard::{SharedGuard, StepOrder, StrictLinear};
    use crate::core::registry::StepRegistry;
    use crate::core::step::Step;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn registry(ids: &[&str]) -> StepRegistry<()> {
        StepRegistry::new(ids.iter().map(|id| Step::new(*id, *id, ())).collect())
    }

    #[test]
    fn starts_on_first_step_without_override() {
        let nav = Navigator::new(registry(&["a", "b", "c"]), None);
        assert_eq!(nav.active_step_id(), Some("a"));
        assert_eq!(nav.index(), Some(0));
        assert_eq!(nav.total(), 3);
    }

    #[test]
    fn initial_step_override_must_be_a_member() {
        let nav = Navigator::new(registry(&["a", "b"]), Some("b".into()));
        assert_eq!(nav.active_step_id(), Some("b"));

        let nav = Navigator::new(registry(&["a", "b"]), Some("zzz".into()));
        assert_eq!(nav.active_step_id(), Some("a"));
    }

    #[test]
    fn empty_registry_has_no_active_step_and_ignores_requests() {
        let mut nav = Navigator::new(StepRegistry::<()>::empty(), Some("a".into()));
        assert_eq!(nav.active_step_id(), None);
        assert_eq!(nav.index(), None);
        assert_eq!(nav.percent(), 0.0);
        assert_eq!(nav.next(), Transition::Stayed(StayReason::EmptyRegistry));
        assert_eq!(nav.prev(), Transition::Stayed(StayReason::EmptyRegistry));
        assert_eq!(nav.go_to("a"), Transition::Stayed(StayReason::EmptyRegistry));
    }

    #[test]
    fn go_to_unknown_target_is_a_no_op() {
        let mut nav = Navigator::new(registry(&["a", "b"]), None);
        assert_eq!(nav.go_to("nope"), Transition::Stayed(StayReason::UnknownTarget));
        assert_eq!(nav.active_step_id(), Some("a"));
    }

    #[test]
    fn go_to_without_guard_jumps_anywhere() {
        let mut nav = Navigator::new(registry(&["a", "b", "c"]), None);
        assert_eq!(
            nav.go_to("c"),
            Transition::Moved {
                from: "a".into(),
                to: "c".into()
            }
        );
        assert!(nav.is_last());
    }

    #[test]
    fn guard_is_consulted_with_target_then_current() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&calls);
        let mut nav = Navigator::new(registry(&["a", "b", "c"]), None).with_guard(
            move |target: &str, current: &str| {
                seen.borrow_mut().push((target.to_owned(), current.to_owned()));
                target != "c"
            },
        );

        assert!(nav.next().moved());
        assert!(!nav.next().moved());
        assert_eq!(nav.active_step_id(), Some("b"));
        assert!(nav.prev().moved());
        assert_eq!(
            calls.borrow().as_slice(),
            &[
                ("b".to_owned(), "a".to_owned()),
                ("c".to_owned(), "b".to_owned()),
                ("a".to_owned(), "b".to_owned()),
            ]
        );
    }

    #[test]
    fn prev_is_also_subject_to_the_guard() {
        let mut nav = Navigator::new(registry(&["a", "b"]), Some("b".into()))
            .with_guard(|_: &str, _: &str| false);
        assert_eq!(nav.prev(), Transition::Stayed(StayReason::GuardRejected));
        assert_eq!(nav.active_step_id(), Some("b"));
    }

    #[test]
    fn bounds_are_no_ops() {
        let mut nav = Navigator::new(registry(&["a", "b"]), None);
        assert_eq!(nav.prev(), Transition::Stayed(StayReason::AtFirstStep));
        nav.next();
        assert_eq!(nav.next(), Transition::Stayed(StayReason::AtLastStep));
        assert_eq!(nav.active_step_id(), Some("b"));
    }

    #[test]
    fn go_to_active_step_reports_already_active() {
        let mut nav = Navigator::new(registry(&["a", "b"]), None);
        assert_eq!(nav.go_to("a"), Transition::Stayed(StayReason::AlreadyActive));
    }

    #[test]
    fn strict_linear_blocks_skip_ahead() {
        let steps = registry(&["a", "b", "c"]);
        let order = StepOrder::from_registry(&steps);
        let mut nav = Navigator::new(steps, None).with_guard(StrictLinear::new(order, |_: &str| true));

        assert_eq!(nav.go_to("c"), Transition::Stayed(StayReason::GuardRejected));
        assert_eq!(nav.active_step_id(), Some("a"));
        assert!(nav.next().moved());
        assert!(nav.next().moved());
    }

    #[test]
    fn reconcile_keeps_active_step_when_still_present() {
        let mut nav = Navigator::new(registry(&["a", "b", "c"]), Some("b".into()));
        assert!(!nav.reconcile(registry(&["b", "c"])));
        assert_eq!(nav.active_step_id(), Some("b"));
        assert_eq!(nav.index(), Some(0));
    }

    #[test]
    fn reconcile_resets_to_first_step_when_active_vanishes() {
        let mut nav = Navigator::new(registry(&["a", "b", "c"]), None);
        nav.go_to("c");
        assert!(nav.reconcile(registry(&["x", "y"])));
        assert_eq!(nav.active_step_id(), Some("x"));
        assert_eq!(nav.index(), Some(0));
    }

    #[test]
    fn reconcile_ignores_the_same_registry() {
        let steps = registry(&["a", "b"]);
        let mut nav = Navigator::new(steps.clone(), None);
        nav.next();
        assert!(!nav.reconcile(steps));
        assert_eq!(nav.active_step_id(), Some("b"));
    }

    #[test]
    fn reconcile_to_empty_and_back() {
        let mut nav = Navigator::new(registry(&["a"]), None);
        assert!(nav.reconcile(StepRegistry::empty()));
        assert_eq!(nav.active_step_id(), None);
        assert!(nav.reconcile(registry(&["z"])));
        assert_eq!(nav.active_step_id(), Some("z"));
    }

    #[test]
    fn retarget_initial_bypasses_the_guard() {
        let mut nav = Navigator::new(registry(&["a", "b", "c"]), None)
            .with_guard(|_: &str, _: &str| false);
        assert!(nav.retarget_initial(Some("c".into())));
        assert_eq!(nav.active_step_id(), Some("c"));
        assert!(!nav.retarget_initial(Some("c".into())));
        assert!(!nav.retarget_initial(Some("missing".into())));
        assert_eq!(nav.active_step_id(), Some("c"));
    }

    #[test]
    fn reset_returns_to_initial_step() {
        let mut nav = Navigator::new(registry(&["a", "b", "c"]), Some("b".into()));
        nav.go_to("c");
        nav.reset();
        assert_eq!(nav.active_step_id(), Some("b"));
    }

    #[test]
    fn percent_tracks_position() {
        let mut nav = Navigator::new(registry(&["a", "b", "c", "d"]), None);
        assert_eq!(nav.percent(), 25.0);
        nav.go_to("d");
        assert_eq!(nav.percent(), 100.0);
    }

    #[test]
    fn replacing_the_guard_takes_effect_immediately() {
        let open = Rc::new(Cell::new(false));
        let flag = Rc::clone(&open);
        let guard: SharedGuard = Rc::new(move |_: &str, _: &str| flag.get());
        let mut nav = Navigator::new(registry(&["a", "b"]), None).with_shared_guard(Some(guard));

        assert!(!nav.next().moved());
        nav.set_guard(None);
        assert!(nav.next().moved());
    }
}
