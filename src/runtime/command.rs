use crate::core::step::StepId;
use crate::terminal::KeyEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Open,
    Close,
    Next,
    Back,
    GoTo(StepId),
    FocusSwap,
    SidebarUp,
    SidebarDown,
    Activate,
    InputKey(KeyEvent),
    Noop,
}
