//! Navigation guards.
//!
//! A guard is a pure `(target, current) -> bool` decision. The navigator calls
//! it before every transition and treats the answer as final. The policies in
//! this module are the shapes hosts commonly need; they are ordinary guard
//! values and the navigator has no knowledge of them.

use crate::core::registry::StepRegistry;
use crate::core::step::StepId;
use indexmap::IndexSet;
use std::rc::Rc;

pub trait NavigationGuard {
    fn can_navigate(&self, target: &str, current: &str) -> bool;
}

impl<F> NavigationGuard for F
where
    F: Fn(&str, &str) -> bool,
{
    fn can_navigate(&self, target: &str, current: &str) -> bool {
        self(target, current)
    }
}

pub type SharedGuard = Rc<dyn NavigationGuard>;

pub fn shared(guard: impl NavigationGuard + 'static) -> SharedGuard {
    Rc::new(guard)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Stay,
    Forward { distance: usize },
}

/// Snapshot of a registry's ordering, owned by a guard so the guard does not
/// need to borrow the registry it is judging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOrder {
    ids: IndexSet<StepId>,
}

impl StepOrder {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StepId>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_registry<C>(registry: &StepRegistry<C>) -> Self {
        Self::new(registry.ids())
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids.get_index_of(id)
    }

    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.ids.get_index(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn direction(&self, target: &str, current: &str) -> Option<Direction> {
        let target = self.position(target)?;
        let current = self.position(current)?;
        Some(if target < current {
            Direction::Backward
        } else if target == current {
            Direction::Stay
        } else {
            Direction::Forward {
                distance: target - current,
            }
        })
    }
}

/// Backward moves are free. A forward move must be exactly one step and the
/// step it leaves must be valid.
pub struct StrictLinear<V> {
    order: StepOrder,
    is_valid: V,
}

impl<V> StrictLinear<V>
where
    V: Fn(&str) -> bool,
{
    pub fn new(order: StepOrder, is_valid: V) -> Self {
        Self { order, is_valid }
    }
}

impl<V> NavigationGuard for StrictLinear<V>
where
    V: Fn(&str) -> bool,
{
    fn can_navigate(&self, target: &str, current: &str) -> bool {
        match self.order.direction(target, current) {
            None => false,
            Some(Direction::Backward | Direction::Stay) => true,
            Some(Direction::Forward { distance }) if distance > 1 => false,
            Some(Direction::Forward { .. }) => self
                .order
                .position(target)
                .and_then(|idx| idx.checked_sub(1))
                .and_then(|idx| self.order.id_at(idx))
                .is_some_and(|predecessor| (self.is_valid)(predecessor)),
        }
    }
}

/// Backward moves are free. Forward moves of any distance need the current
/// step to be valid.
pub struct ValidatedSoFar<V> {
    order: StepOrder,
    is_valid: V,
}

impl<V> ValidatedSoFar<V>
where
    V: Fn(&str) -> bool,
{
    pub fn new(order: StepOrder, is_valid: V) -> Self {
        Self { order, is_valid }
    }
}

impl<V> NavigationGuard for ValidatedSoFar<V>
where
    V: Fn(&str) -> bool,
{
    fn can_navigate(&self, target: &str, current: &str) -> bool {
        match self.order.direction(target, current) {
            None => false,
            Some(Direction::Backward | Direction::Stay) => true,
            Some(Direction::Forward { .. }) => (self.is_valid)(current),
        }
    }
}

/// One boolean gate for every forward move.
pub struct SingleGate<G> {
    order: StepOrder,
    gate: G,
}

impl<G> SingleGate<G>
where
    G: Fn() -> bool,
{
    pub fn new(order: StepOrder, gate: G) -> Self {
        Self { order, gate }
    }
}

impl<G> NavigationGuard for SingleGate<G>
where
    G: Fn() -> bool,
{
    fn can_navigate(&self, target: &str, current: &str) -> bool {
        match self.order.direction(target, current) {
            None => false,
            Some(Direction::Backward | Direction::Stay) => true,
            Some(Direction::Forward { .. }) => (self.gate)(),
        }
    }
}
