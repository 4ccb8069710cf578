use crate::core::step::{Step, StepId};
use indexmap::IndexSet;
use std::rc::Rc;

/// Ordered, immutable list of steps. Clones share storage, so identity
/// survives a clone and only a freshly built registry counts as a change.
#[derive(Debug)]
pub struct StepRegistry<C> {
    steps: Rc<[Step<C>]>,
}

impl<C> Clone for StepRegistry<C> {
    fn clone(&self) -> Self {
        Self {
            steps: Rc::clone(&self.steps),
        }
    }
}

impl<C> StepRegistry<C> {
    pub fn new(steps: Vec<Step<C>>) -> Self {
        let mut seen = IndexSet::with_capacity(steps.len());
        for step in &steps {
            if !seen.insert(step.id()) {
                tracing::warn!(step_id = step.id(), "duplicate step id in registry");
            }
        }
        Self {
            steps: Rc::from(steps),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn same_registry(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.steps, &other.steps)
    }

    pub fn steps(&self) -> &[Step<C>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step<C>> {
        self.steps.iter()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|step| step.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Step<C>> {
        self.steps.iter().find(|step| step.id() == id)
    }

    pub fn at(&self, index: usize) -> Option<&Step<C>> {
        self.steps.get(index)
    }

    pub fn first_id(&self) -> Option<&str> {
        self.steps.first().map(Step::id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(Step::id)
    }

    pub fn id_list(&self) -> Vec<StepId> {
        self.ids().map(ToOwned::to_owned).collect()
    }
}

impl<C> From<Vec<Step<C>>> for StepRegistry<C> {
    fn from(steps: Vec<Step<C>>) -> Self {
        Self::new(steps)
    }
}

impl<'a, C> IntoIterator for &'a StepRegistry<C> {
    type Item = &'a Step<C>;
    type IntoIter = std::slice::Iter<'a, Step<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
