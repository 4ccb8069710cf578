use crate::error::DialogError;
use crate::state::affordance::{FooterButtons, FooterInfo, FooterPolicy, StandardFooter};
use crate::state::dialog::{DialogProps, MultiStepDialog};
use crate::terminal::KeyEvent;
use crate::ui::span::SpanLine;
use crate::ui::surfaces::DialogChrome;
use crate::ui::theme::Theme;
use std::cell::Cell;
use std::rc::Rc;

/// The page that embeds a dialog. It owns the open flag, the step contents,
/// and whatever state its guard reads.
pub trait DialogHost {
    type Content;

    fn chrome(&self) -> DialogChrome;

    /// Called once, when the runtime creates the dialog.
    fn props(&mut self) -> DialogProps<Self::Content>;

    fn render_content(&self, content: &Self::Content, theme: &Theme, width: usize)
    -> Vec<SpanLine>;

    /// Feeds an unbound key to the active step's content. Returns `true`
    /// when host state changed and the dialog should be re-synced.
    fn handle_key(&mut self, _content: &Self::Content, _key: KeyEvent) -> bool {
        false
    }

    fn footer(&self, info: &FooterInfo) -> FooterButtons {
        StandardFooter.buttons(info)
    }

    /// Pushes the host's current open flag, steps and guard into the dialog.
    fn sync(&mut self, dialog: &mut MultiStepDialog<Self::Content>) -> Result<(), DialogError>;

    fn on_finish(&mut self, dialog: &mut MultiStepDialog<Self::Content>) {
        dialog.request_open_change(false);
    }
}

/// Host-owned open flag shared with the dialog's open-change callback.
#[derive(Debug, Clone, Default)]
pub struct OpenState(Rc<Cell<bool>>);

impl OpenState {
    pub fn new(open: bool) -> Self {
        Self(Rc::new(Cell::new(open)))
    }

    pub fn get(&self) -> bool {
        self.0.get()
    }

    pub fn set(&self, open: bool) {
        self.0.set(open);
    }

    pub fn callback(&self) -> impl FnMut(bool) + 'static {
        let cell = Rc::clone(&self.0);
        move |open| cell.set(open)
    }
}
