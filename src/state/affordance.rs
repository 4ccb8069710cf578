use crate::core::step::{StepId, StepState};
use crate::state::dialog::DialogContext;
use serde::Serialize;

/// One row of a step list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepItemView {
    pub id: StepId,
    pub label: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub state: StepState,
    pub active: bool,
    pub disabled: bool,
}

/// A step control is disabled only when the guard refuses it *and* the step
/// lies ahead of the active one. Backward controls always stay clickable.
pub fn step_items<C>(ctx: &DialogContext<C>) -> Vec<StepItemView> {
    let current_index = ctx.index;
    ctx.steps
        .iter()
        .enumerate()
        .map(|(target_index, step)| {
            let active = ctx.active_step_id.as_deref() == Some(step.id());
            let ahead = match current_index {
                Some(current) => target_index > current,
                None => true,
            };
            let disabled = ctx.guard.is_some() && !ctx.guard_permits(step.id()) && ahead;
            StepItemView {
                id: step.id.clone(),
                label: step.label.clone(),
                description: step.description.clone(),
                icon: step.icon.clone(),
                state: step.state_or_idle(),
                active,
                disabled,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressInfo {
    pub index: Option<usize>,
    pub total: usize,
    pub percent: f32,
}

impl ProgressInfo {
    pub fn from_context<C>(ctx: &DialogContext<C>) -> Self {
        Self {
            index: ctx.index,
            total: ctx.total,
            percent: ctx.percent(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryAction {
    Next,
    Finish,
}

impl PrimaryAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Next => "Next",
            Self::Finish => "Finish",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterInfo {
    pub index: Option<usize>,
    pub total: usize,
    pub active_step_id: Option<StepId>,
}

impl FooterInfo {
    pub fn from_context<C>(ctx: &DialogContext<C>) -> Self {
        Self {
            index: ctx.index,
            total: ctx.total,
            active_step_id: ctx.active_step_id.clone(),
        }
    }

    pub fn is_first(&self) -> bool {
        self.index.is_none_or(|index| index == 0)
    }

    pub fn is_last(&self) -> bool {
        self.index.is_none_or(|index| index + 1 >= self.total)
    }

    pub fn primary_action(&self) -> PrimaryAction {
        if self.index.is_some() && self.is_last() {
            PrimaryAction::Finish
        } else {
            PrimaryAction::Next
        }
    }

    /// "Step 2 of 3"
    pub fn position_label(&self) -> String {
        match self.index {
            Some(index) => format!("Step {} of {}", index + 1, self.total),
            None => format!("Step - of {}", self.total),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FooterButtons {
    pub back_disabled: bool,
    pub primary_disabled: bool,
    pub primary: PrimaryAction,
}

/// Host-side footer rule. It is evaluated independently of the navigation
/// guard; the host keeps the two consistent.
pub trait FooterPolicy {
    fn buttons(&self, info: &FooterInfo) -> FooterButtons;
}

impl<F> FooterPolicy for F
where
    F: Fn(&FooterInfo) -> FooterButtons,
{
    fn buttons(&self, info: &FooterInfo) -> FooterButtons {
        self(info)
    }
}

/// Back disabled on the first step, Next disabled on the last.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFooter;

impl FooterPolicy for StandardFooter {
    fn buttons(&self, info: &FooterInfo) -> FooterButtons {
        FooterButtons {
            back_disabled: info.is_first(),
            primary_disabled: info.is_last(),
            primary: PrimaryAction::Next,
        }
    }
}

/// Back disabled on the first step; the primary button becomes Finish on the
/// last step and is disabled whenever `blocked` says so.
pub struct GatedFooter<B> {
    blocked: B,
}

impl<B> GatedFooter<B>
where
    B: Fn(&FooterInfo) -> bool,
{
    pub fn new(blocked: B) -> Self {
        Self { blocked }
    }
}

impl<B> FooterPolicy for GatedFooter<B>
where
    B: Fn(&FooterInfo) -> bool,
{
    fn buttons(&self, info: &FooterInfo) -> FooterButtons {
        FooterButtons {
            back_disabled: info.is_first(),
            primary_disabled: (self.blocked)(info),
            primary: info.primary_action(),
        }
    }
}

/// Serializable view of the whole dialog, used by headless runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogSnapshot {
    pub open: bool,
    pub active_step_id: Option<StepId>,
    pub progress: ProgressInfo,
    pub steps: Vec<StepItemView>,
    pub footer: FooterButtons,
}

impl DialogSnapshot {
    pub fn capture<C>(ctx: &DialogContext<C>, open: bool, footer: &dyn FooterPolicy) -> Self {
        Self {
            open,
            active_step_id: ctx.active_step_id.clone(),
            progress: ProgressInfo::from_context(ctx),
            steps: step_items(ctx),
            footer: footer.buttons(&FooterInfo::from_context(ctx)),
        }
    }
}
