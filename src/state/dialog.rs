use crate::core::guard::{NavigationGuard, SharedGuard};
use crate::core::registry::StepRegistry;
use crate::core::step::{Step, StepId};
use crate::error::DialogError;
use crate::state::navigator::{Navigator, Transition};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub type OpenChangeCallback = Box<dyn FnMut(bool)>;

/// Everything a host page hands to the dialog.
pub struct DialogProps<C> {
    pub steps: StepRegistry<C>,
    pub open: bool,
    pub on_open_change: Option<OpenChangeCallback>,
    pub initial_step: Option<StepId>,
    pub can_navigate_to_step: Option<SharedGuard>,
    pub reset_on_reopen: bool,
}

impl<C> DialogProps<C> {
    pub fn new(steps: StepRegistry<C>) -> Self {
        Self {
            steps,
            open: false,
            on_open_change: None,
            initial_step: None,
            can_navigate_to_step: None,
            reset_on_reopen: false,
        }
    }

    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    pub fn on_open_change(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.on_open_change = Some(Box::new(callback));
        self
    }

    pub fn initial_step(mut self, id: impl Into<StepId>) -> Self {
        self.initial_step = Some(id.into());
        self
    }

    pub fn can_navigate_to_step(mut self, guard: impl NavigationGuard + 'static) -> Self {
        self.can_navigate_to_step = Some(Rc::new(guard));
        self
    }

    pub fn shared_guard(mut self, guard: Option<SharedGuard>) -> Self {
        self.can_navigate_to_step = guard;
        self
    }

    pub fn reset_on_reopen(mut self, reset: bool) -> Self {
        self.reset_on_reopen = reset;
        self
    }
}

/// The dialog instance. It owns the navigator; presentation surfaces only
/// ever see it through a [`DialogHandle`].
pub struct MultiStepDialog<C> {
    navigator: Rc<RefCell<Navigator<C>>>,
    open: bool,
    on_open_change: Option<OpenChangeCallback>,
    reset_on_reopen: bool,
}

impl<C> MultiStepDialog<C> {
    pub fn new(props: DialogProps<C>) -> Self {
        let navigator = Navigator::new(props.steps, props.initial_step)
            .with_shared_guard(props.can_navigate_to_step);
        Self {
            navigator: Rc::new(RefCell::new(navigator)),
            open: props.open,
            on_open_change: props.on_open_change,
            reset_on_reopen: props.reset_on_reopen,
        }
    }

    pub fn handle(&self) -> DialogHandle<C> {
        DialogHandle {
            inner: Rc::downgrade(&self.navigator),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Records the host's open state. The active step survives a close;
    /// it is re-initialized on reopen only when the host asked for that.
    pub fn set_open(&mut self, open: bool) -> Result<(), DialogError> {
        let reopened = open && !self.open;
        self.open = open;
        if reopened && self.reset_on_reopen {
            self.update(Navigator::reset)?;
        }
        Ok(())
    }

    /// Asks the host to change the open state. The dialog does not change
    /// `open` itself; the host answers through [`Self::set_open`].
    pub fn request_open_change(&mut self, open: bool) {
        tracing::debug!(open, "dialog open change requested");
        if let Some(callback) = self.on_open_change.as_mut() {
            callback(open);
        }
    }

    pub fn set_steps(&mut self, steps: StepRegistry<C>) -> Result<bool, DialogError> {
        self.update(|nav| nav.reconcile(steps))
    }

    pub fn set_guard(&mut self, guard: Option<SharedGuard>) -> Result<(), DialogError> {
        self.update(|nav| nav.set_guard(guard))
    }

    pub fn set_initial_step(&mut self, initial_step: Option<StepId>) -> Result<bool, DialogError> {
        self.update(|nav| nav.retarget_initial(initial_step))
    }

    pub fn context(&self) -> Result<DialogContext<C>, DialogError> {
        let nav = self.navigator.try_borrow().map_err(|_| DialogError::Busy)?;
        Ok(DialogContext::capture(&nav))
    }

    fn update<R>(&self, f: impl FnOnce(&mut Navigator<C>) -> R) -> Result<R, DialogError> {
        let mut nav = self
            .navigator
            .try_borrow_mut()
            .map_err(|_| DialogError::Busy)?;
        Ok(f(&mut nav))
    }
}

/// Read/command access to one dialog instance. A handle outlives nothing:
/// once the dialog is dropped every call fails with `OutsideDialog`.
pub struct DialogHandle<C> {
    inner: Weak<RefCell<Navigator<C>>>,
}

impl<C> Clone for DialogHandle<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<C> DialogHandle<C> {
    /// A handle that was never attached to a dialog.
    pub fn detached() -> Self {
        Self { inner: Weak::new() }
    }

    pub fn is_attached(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn context(&self) -> Result<DialogContext<C>, DialogError> {
        let navigator = self.upgrade()?;
        let nav = navigator.try_borrow().map_err(|_| DialogError::Busy)?;
        Ok(DialogContext::capture(&nav))
    }

    pub fn go_to(&self, id: &str) -> Result<Transition, DialogError> {
        self.update(|nav| nav.go_to(id))
    }

    pub fn next(&self) -> Result<Transition, DialogError> {
        self.update(Navigator::next)
    }

    pub fn prev(&self) -> Result<Transition, DialogError> {
        self.update(Navigator::prev)
    }

    fn upgrade(&self) -> Result<Rc<RefCell<Navigator<C>>>, DialogError> {
        self.inner.upgrade().ok_or(DialogError::OutsideDialog)
    }

    fn update<R>(&self, f: impl FnOnce(&mut Navigator<C>) -> R) -> Result<R, DialogError> {
        let navigator = self.upgrade()?;
        let mut nav = navigator
            .try_borrow_mut()
            .map_err(|_| DialogError::Busy)?;
        let result = f(&mut nav);
        Ok(result)
    }
}

/// What every presentation surface reads. Derived positions are captured at
/// the time of the read and never stored back.
pub struct DialogContext<C> {
    pub steps: StepRegistry<C>,
    pub active_step_id: Option<StepId>,
    pub index: Option<usize>,
    pub total: usize,
    pub guard: Option<SharedGuard>,
}

impl<C> Clone for DialogContext<C> {
    fn clone(&self) -> Self {
        Self {
            steps: self.steps.clone(),
            active_step_id: self.active_step_id.clone(),
            index: self.index,
            total: self.total,
            guard: self.guard.clone(),
        }
    }
}

impl<C> DialogContext<C> {
    fn capture(nav: &Navigator<C>) -> Self {
        Self {
            steps: nav.steps().clone(),
            active_step_id: nav.active_step_id().map(ToOwned::to_owned),
            index: nav.index(),
            total: nav.total(),
            guard: nav.guard().cloned(),
        }
    }

    pub fn active_step(&self) -> Option<&Step<C>> {
        self.active_step_id
            .as_deref()
            .and_then(|id| self.steps.get(id))
    }

    pub fn percent(&self) -> f32 {
        match self.index {
            Some(index) if self.total > 0 => (index + 1) as f32 / self.total as f32 * 100.0,
            _ => 0.0,
        }
    }

    pub fn is_last(&self) -> bool {
        self.index.is_some_and(|index| index + 1 == self.total)
    }

    pub fn guard_permits(&self, target: &str) -> bool {
        match (self.guard.as_ref(), self.active_step_id.as_deref()) {
            (Some(guard), Some(current)) => guard.can_navigate(target, current),
            _ => true,
        }
    }
}
