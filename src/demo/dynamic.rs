use crate::core::guard::{StepOrder, ValidatedSoFar};
use crate::core::registry::StepRegistry;
use crate::core::step::{Step, StepState};
use crate::demo::field::TextField;
use crate::demo::validators::{self, positive_amount, required};
use crate::demo::{error_line, page_intro};
use crate::error::DialogError;
use crate::runtime::host::{DialogHost, OpenState};
use crate::state::affordance::{FooterButtons, FooterInfo, FooterPolicy, GatedFooter};
use crate::state::dialog::{DialogProps, MultiStepDialog};
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::layout::fit_line;
use crate::ui::span::{Span, SpanLine};
use crate::ui::surfaces::DialogChrome;
use crate::ui::theme::Theme;
use std::cell::RefCell;
use std::rc::Rc;

const NAME_COLUMN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicPage {
    Names,
    Amounts,
    Directions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Incoming,
    Outgoing,
}

impl Flow {
    fn cycle(current: Option<Self>, forward: bool) -> Option<Self> {
        match (current, forward) {
            (None, true) | (Some(Self::Outgoing), false) => Some(Self::Incoming),
            (Some(Self::Incoming), true) | (None, false) => Some(Self::Outgoing),
            (Some(Self::Outgoing), true) | (Some(Self::Incoming), false) => None,
        }
    }

    fn label(current: Option<Self>) -> &'static str {
        match current {
            None => "Select...",
            Some(Self::Incoming) => "Incoming",
            Some(Self::Outgoing) => "Outgoing",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: u32,
    pub category: &'static str,
    pub name: TextField,
    pub amount: TextField,
    pub flow: Option<Flow>,
}

impl Transaction {
    fn new(id: u32, category: &'static str) -> Self {
        Self {
            id,
            category,
            name: TextField::new(format!("Transaction {id} name")),
            amount: TextField::new("Amount for transaction"),
            flow: None,
        }
    }

    fn display_name(&self) -> String {
        let name = self.name.value().trim();
        if name.is_empty() {
            format!("Transaction {}", self.id)
        } else {
            name.to_owned()
        }
    }
}

/// The host's data. The guard reads it through a shared cell, so edits take
/// effect without reinstalling the guard.
#[derive(Debug, Clone)]
pub struct Ledger {
    pub transactions: Vec<Transaction>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            transactions: vec![
                Transaction::new(1, "Groceries"),
                Transaction::new(2, "Dining"),
                Transaction::new(3, "Travel"),
            ],
        }
    }
}

impl Ledger {
    pub fn all_named(&self) -> bool {
        self.transactions
            .iter()
            .all(|t| validators::is_valid(required, t.name.value()))
    }

    pub fn all_amounts(&self) -> bool {
        self.transactions
            .iter()
            .all(|t| validators::is_valid(positive_amount, t.amount.value()))
    }

    pub fn all_directions(&self) -> bool {
        self.transactions.iter().all(|t| t.flow.is_some())
    }

    /// Whether the host lets the user leave `step` going forward.
    pub fn step_valid(&self, step: &str) -> bool {
        match step {
            "names" => self.all_named(),
            "amounts" => self.all_amounts(),
            _ => true,
        }
    }
}

pub struct DynamicHost {
    open: OpenState,
    ledger: Rc<RefCell<Ledger>>,
    row: usize,
    finished: bool,
}

impl Default for DynamicHost {
    fn default() -> Self {
        Self::new()
    }
}

impl DynamicHost {
    pub fn new() -> Self {
        Self {
            open: OpenState::new(false),
            ledger: Rc::new(RefCell::new(Ledger::default())),
            row: 0,
            finished: false,
        }
    }

    pub fn ledger(&self) -> Rc<RefCell<Ledger>> {
        Rc::clone(&self.ledger)
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    fn steps(&self) -> StepRegistry<DynamicPage> {
        let ledger = self.ledger.borrow();
        let state = |done: bool| if done { StepState::Valid } else { StepState::Idle };
        StepRegistry::new(vec![
            Step::new("names", "Names", DynamicPage::Names)
                .with_description("Assign names to transactions")
                .with_icon("✎")
                .with_state(state(ledger.all_named())),
            Step::new("amounts", "Amounts", DynamicPage::Amounts)
                .with_description("Enter the amounts")
                .with_icon("$")
                .with_state(state(ledger.all_amounts())),
            Step::new("directions", "Directions", DynamicPage::Directions)
                .with_description("Set incoming or outgoing")
                .with_icon("⇄")
                .with_state(state(ledger.all_directions())),
        ])
    }

    fn render_names(&self, ledger: &Ledger, theme: &Theme, width: usize) -> Vec<SpanLine> {
        let mut lines = page_intro(
            "Step 1: Assign Names",
            "Give each transaction a name.",
            theme,
            width,
        );
        let field_width = width.saturating_sub(NAME_COLUMN);
        for (idx, t) in ledger.transactions.iter().enumerate() {
            let mut line = fit_line(&t.name.render(theme, field_width, idx == self.row), field_width);
            line.push(Span::styled(format!(" {}", t.category), theme.muted));
            lines.push(line);
        }
        lines
    }

    fn render_amounts(&self, ledger: &Ledger, theme: &Theme, width: usize) -> Vec<SpanLine> {
        let mut lines = page_intro(
            "Step 2: Enter Amounts",
            "Enter an amount for each transaction.",
            theme,
            width,
        );
        let field_width = width.saturating_sub(NAME_COLUMN);
        for (idx, t) in ledger.transactions.iter().enumerate() {
            let mut line =
                fit_line(&t.amount.render(theme, field_width, idx == self.row), field_width);
            line.push(Span::styled(format!(" {}", t.category), theme.muted));
            lines.push(line);
            if !t.amount.value().is_empty()
                && let Err(message) = positive_amount(t.amount.value())
            {
                lines.push(error_line(&message, theme));
            }
        }
        lines
    }

    fn render_directions(&self, ledger: &Ledger, theme: &Theme, width: usize) -> Vec<SpanLine> {
        let mut lines = page_intro(
            "Step 3: Direction",
            "Mark each transaction as incoming or outgoing.",
            theme,
            width,
        );
        for (idx, t) in ledger.transactions.iter().enumerate() {
            let name = fit_line(&vec![Span::styled(t.display_name(), theme.item)], NAME_COLUMN);
            let style = if idx == self.row { theme.cursor } else { theme.item };
            let mut line = name;
            line.push(Span::styled(format!("< {} >", Flow::label(t.flow)), style));
            lines.push(line);
        }
        lines.push(vec![Span::styled("Left/Right choose a direction", theme.muted)]);
        lines
    }
}

impl DialogHost for DynamicHost {
    type Content = DynamicPage;

    fn chrome(&self) -> DialogChrome {
        DialogChrome::new("Transaction Setup")
            .with_description("Review and confirm your transaction details.")
            .with_action("Space flips direction")
    }

    fn props(&mut self) -> DialogProps<DynamicPage> {
        let steps = self.steps();
        let ledger = Rc::clone(&self.ledger);
        let guard = ValidatedSoFar::new(StepOrder::from_registry(&steps), move |current: &str| {
            ledger
                .try_borrow()
                .is_ok_and(|ledger| ledger.step_valid(current))
        });
        DialogProps::new(steps)
            .open(self.open.get())
            .on_open_change(self.open.callback())
            .can_navigate_to_step(guard)
    }

    fn render_content(&self, page: &DynamicPage, theme: &Theme, width: usize) -> Vec<SpanLine> {
        let Ok(ledger) = self.ledger.try_borrow() else {
            return Vec::new();
        };
        match page {
            DynamicPage::Names => self.render_names(&ledger, theme, width),
            DynamicPage::Amounts => self.render_amounts(&ledger, theme, width),
            DynamicPage::Directions => self.render_directions(&ledger, theme, width),
        }
    }

    fn handle_key(&mut self, page: &DynamicPage, key: KeyEvent) -> bool {
        let mut ledger = self.ledger.borrow_mut();
        let rows = ledger.transactions.len();
        match key.code {
            KeyCode::Up => {
                self.row = self.row.saturating_sub(1);
                return false;
            }
            KeyCode::Down | KeyCode::Enter => {
                self.row = (self.row + 1).min(rows.saturating_sub(1));
                return false;
            }
            _ => {}
        }
        let Some(t) = ledger.transactions.get_mut(self.row) else {
            return false;
        };
        match page {
            DynamicPage::Names => {
                let changed = t.name.handle_key(key);
                if changed {
                    let label = match t.name.value().trim() {
                        "" => "transaction".to_owned(),
                        name => name.to_owned(),
                    };
                    t.amount.set_placeholder(format!("Amount for {label}"));
                }
                changed
            }
            DynamicPage::Amounts => t.amount.handle_key(key),
            DynamicPage::Directions => {
                let forward = match key.code {
                    KeyCode::Right | KeyCode::Char(' ') => true,
                    KeyCode::Left => false,
                    _ => return false,
                };
                t.flow = Flow::cycle(t.flow, forward);
                true
            }
        }
    }

    fn footer(&self, info: &FooterInfo) -> FooterButtons {
        let Ok(ledger) = self.ledger.try_borrow() else {
            return GatedFooter::new(|_: &FooterInfo| true).buttons(info);
        };
        GatedFooter::new(|at: &FooterInfo| match at.index {
            Some(0) => !ledger.all_named(),
            Some(1) => !ledger.all_amounts(),
            _ if at.is_last() => !ledger.all_directions(),
            _ => false,
        })
        .buttons(info)
    }

    fn sync(&mut self, dialog: &mut MultiStepDialog<DynamicPage>) -> Result<(), DialogError> {
        dialog.set_steps(self.steps())?;
        dialog.set_open(self.open.get())
    }

    fn on_finish(&mut self, dialog: &mut MultiStepDialog<DynamicPage>) {
        if let Ok(ledger) = self.ledger.try_borrow() {
            for t in &ledger.transactions {
                tracing::info!(
                    id = t.id,
                    name = %t.display_name(),
                    amount = t.amount.value(),
                    direction = Flow::label(t.flow),
                    "transaction recorded"
                );
            }
        }
        self.finished = true;
        dialog.request_open_change(false);
    }
}

#[cfg(test)]
mod tests {
    use super::{DynamicHost, Flow};
    use crate::runtime::command::Command;
    use crate::runtime::runner::Runtime;
    use crate::terminal::{KeyCode, KeyEvent};

    fn active(runtime: &Runtime<DynamicHost>) -> Option<String> {
        runtime.dialog().context().expect("attached").active_step_id
    }

    fn press(runtime: &mut Runtime<DynamicHost>, code: KeyCode) {
        runtime.handle_key(KeyEvent::plain(code)).expect("attached");
    }

    fn type_row(runtime: &mut Runtime<DynamicHost>, text: &str) {
        for ch in text.chars() {
            press(runtime, KeyCode::Char(ch));
        }
        press(runtime, KeyCode::Down);
    }

    #[test]
    fn flow_cycles_through_unset() {
        assert_eq!(Flow::cycle(None, true), Some(Flow::Incoming));
        assert_eq!(Flow::cycle(Some(Flow::Incoming), true), Some(Flow::Outgoing));
        assert_eq!(Flow::cycle(Some(Flow::Outgoing), true), None);
        assert_eq!(Flow::cycle(None, false), Some(Flow::Outgoing));
    }

    #[test]
    fn each_step_gates_the_next() {
        let mut runtime = Runtime::new(DynamicHost::new());
        runtime.apply(Command::Open).expect("attached");

        type_row(&mut runtime, "Milk");
        type_row(&mut runtime, "Pizza");
        runtime.apply(Command::Next).expect("attached");
        assert_eq!(active(&runtime).as_deref(), Some("names"));
        runtime.apply(Command::GoTo("directions".into())).expect("attached");
        assert_eq!(active(&runtime).as_deref(), Some("names"));

        type_row(&mut runtime, "Train");
        runtime.apply(Command::Next).expect("attached");
        assert_eq!(active(&runtime).as_deref(), Some("amounts"));

        press(&mut runtime, KeyCode::Up);
        press(&mut runtime, KeyCode::Up);
        type_row(&mut runtime, "4.50");
        type_row(&mut runtime, "0");
        type_row(&mut runtime, "120");
        runtime.apply(Command::Next).expect("attached");
        assert_eq!(active(&runtime).as_deref(), Some("amounts"));

        press(&mut runtime, KeyCode::Up);
        press(&mut runtime, KeyCode::Backspace);
        press(&mut runtime, KeyCode::Char('9'));
        runtime.apply(Command::Next).expect("attached");
        assert_eq!(active(&runtime).as_deref(), Some("directions"));

        runtime.apply(Command::GoTo("names".into())).expect("attached");
        assert_eq!(active(&runtime).as_deref(), Some("names"));
    }

    #[test]
    fn finish_needs_every_direction() {
        let host = DynamicHost::new();
        {
            let ledger = host.ledger();
            let mut ledger = ledger.borrow_mut();
            for t in &mut ledger.transactions {
                t.name = t.name.clone().with_value("x");
                t.amount = t.amount.clone().with_value("1");
            }
        }
        let mut runtime = Runtime::new(host);
        runtime.apply(Command::Open).expect("attached");
        runtime.apply(Command::GoTo("directions".into())).expect("attached");
        assert_eq!(active(&runtime).as_deref(), Some("directions"));

        runtime.apply(Command::Next).expect("attached");
        assert!(runtime.dialog().is_open());

        for _ in 0..3 {
            press(&mut runtime, KeyCode::Right);
            press(&mut runtime, KeyCode::Down);
        }
        runtime.apply(Command::Next).expect("attached");
        assert!(runtime.host().finished());
        assert!(!runtime.dialog().is_open());
    }
}
