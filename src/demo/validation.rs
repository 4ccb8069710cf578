use crate::core::guard::{SharedGuard, SingleGate, StepOrder, shared};
use crate::core::registry::StepRegistry;
use crate::core::step::{Step, StepState};
use crate::demo::field::TextField;
use crate::demo::validators::{self, required};
use crate::demo::{error_line, page_intro};
use crate::error::DialogError;
use crate::runtime::host::{DialogHost, OpenState};
use crate::state::affordance::{FooterButtons, FooterInfo, FooterPolicy, GatedFooter};
use crate::state::dialog::{DialogProps, MultiStepDialog};
use crate::terminal::KeyEvent;
use crate::ui::span::{Span, SpanLine};
use crate::ui::surfaces::DialogChrome;
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationPage {
    General,
    Confirm,
}

/// Two steps; moving forward needs a non-blank project name.
pub struct ValidationHost {
    open: OpenState,
    project_name: TextField,
    touched: bool,
    finished: bool,
}

impl Default for ValidationHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationHost {
    pub fn new() -> Self {
        Self {
            open: OpenState::new(false),
            project_name: TextField::new("Project name"),
            touched: false,
            finished: false,
        }
    }

    pub fn can_proceed(&self) -> bool {
        validators::is_valid(required, self.project_name.value())
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    fn steps(&self) -> StepRegistry<ValidationPage> {
        let general_state = match (self.can_proceed(), self.touched) {
            (true, _) => StepState::Valid,
            (false, true) => StepState::Error,
            (false, false) => StepState::Idle,
        };
        StepRegistry::new(vec![
            Step::new("general", "General", ValidationPage::General)
                .with_description("Enter project details")
                .with_icon("⚙")
                .with_state(general_state),
            Step::new("confirm", "Confirm", ValidationPage::Confirm)
                .with_description("Finish setup")
                .with_icon("✔"),
        ])
    }

    /// The gate captures the current answer; a new guard is installed on
    /// every sync.
    fn guard(&self, steps: &StepRegistry<ValidationPage>) -> SharedGuard {
        let can_proceed = self.can_proceed();
        shared(SingleGate::new(StepOrder::from_registry(steps), move || can_proceed))
    }
}

impl DialogHost for ValidationHost {
    type Content = ValidationPage;

    fn chrome(&self) -> DialogChrome {
        DialogChrome::new("New Project").with_description("Fill out details before continuing.")
    }

    fn props(&mut self) -> DialogProps<ValidationPage> {
        let steps = self.steps();
        let guard = self.guard(&steps);
        DialogProps::new(steps)
            .open(self.open.get())
            .on_open_change(self.open.callback())
            .shared_guard(Some(guard))
    }

    fn render_content(&self, page: &ValidationPage, theme: &Theme, width: usize) -> Vec<SpanLine> {
        match page {
            ValidationPage::General => {
                let mut lines = page_intro(
                    "General Info",
                    "Please enter your project name to continue.",
                    theme,
                    width,
                );
                lines.push(self.project_name.render(theme, width, true));
                if self.touched
                    && let Err(message) = required(self.project_name.value())
                {
                    lines.push(error_line(&message, theme));
                }
                lines
            }
            ValidationPage::Confirm => vec![
                vec![Span::styled("Confirmation", theme.title)],
                vec![
                    Span::styled("Your project ", theme.muted),
                    Span::styled(self.project_name.value().to_owned(), theme.title),
                    Span::styled(" has been set up!", theme.muted),
                ],
            ],
        }
    }

    fn handle_key(&mut self, page: &ValidationPage, key: KeyEvent) -> bool {
        if *page != ValidationPage::General {
            return false;
        }
        let changed = self.project_name.handle_key(key);
        self.touched |= changed;
        changed
    }

    fn footer(&self, info: &FooterInfo) -> FooterButtons {
        let can_proceed = self.can_proceed();
        GatedFooter::new(|at: &FooterInfo| at.index == Some(0) && !can_proceed).buttons(info)
    }

    fn sync(&mut self, dialog: &mut MultiStepDialog<ValidationPage>) -> Result<(), DialogError> {
        let steps = self.steps();
        let guard = self.guard(&steps);
        dialog.set_steps(steps)?;
        dialog.set_guard(Some(guard))?;
        dialog.set_open(self.open.get())
    }

    fn on_finish(&mut self, dialog: &mut MultiStepDialog<ValidationPage>) {
        tracing::info!(project = self.project_name.value(), "project setup finished");
        self.finished = true;
        dialog.request_open_change(false);
    }
}

#[cfg(test)]
mod tests {
    use super::ValidationHost;
    use crate::runtime::command::Command;
    use crate::runtime::runner::Runtime;
    use crate::state::affordance::PrimaryAction;
    use crate::terminal::{KeyCode, KeyEvent};

    fn active(runtime: &Runtime<ValidationHost>) -> Option<String> {
        runtime.dialog().context().expect("attached").active_step_id
    }

    fn type_text(runtime: &mut Runtime<ValidationHost>, text: &str) {
        for ch in text.chars() {
            runtime
                .handle_key(KeyEvent::plain(KeyCode::Char(ch)))
                .expect("attached");
        }
    }

    #[test]
    fn blank_name_blocks_forward_moves() {
        let mut runtime = Runtime::new(ValidationHost::new());
        runtime.apply(Command::Open).expect("attached");
        assert!(runtime.footer_buttons().expect("attached").primary_disabled);

        runtime.apply(Command::Next).expect("attached");
        runtime.apply(Command::GoTo("confirm".into())).expect("attached");
        assert_eq!(active(&runtime).as_deref(), Some("general"));

        type_text(&mut runtime, "   ");
        runtime.apply(Command::GoTo("confirm".into())).expect("attached");
        assert_eq!(active(&runtime).as_deref(), Some("general"));
    }

    #[test]
    fn named_project_can_finish() {
        let mut runtime = Runtime::new(ValidationHost::new());
        runtime.apply(Command::Open).expect("attached");
        type_text(&mut runtime, "Acme");

        runtime.apply(Command::Next).expect("attached");
        assert_eq!(active(&runtime).as_deref(), Some("confirm"));
        let buttons = runtime.footer_buttons().expect("attached");
        assert_eq!(buttons.primary, PrimaryAction::Finish);
        assert!(!buttons.primary_disabled);

        runtime.apply(Command::Next).expect("attached");
        assert!(runtime.host().finished());
        assert!(!runtime.dialog().is_open());
    }

    #[test]
    fn clearing_the_name_closes_the_gate_again() {
        let mut runtime = Runtime::new(ValidationHost::new());
        runtime.apply(Command::Open).expect("attached");
        type_text(&mut runtime, "A");
        runtime.apply(Command::Next).expect("attached");
        assert_eq!(active(&runtime).as_deref(), Some("confirm"));

        runtime.apply(Command::Back).expect("attached");
        assert_eq!(active(&runtime).as_deref(), Some("general"));
        runtime
            .handle_key(KeyEvent::plain(KeyCode::Backspace))
            .expect("attached");
        assert!(!runtime.host().can_proceed());

        runtime.apply(Command::GoTo("confirm".into())).expect("attached");
        assert_eq!(active(&runtime).as_deref(), Some("general"));
        let snapshot = runtime.snapshot().expect("attached");
        assert!(snapshot.steps[1].disabled);
    }
}
