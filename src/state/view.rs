/// Which half of the dialog receives Up/Down/Enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Sidebar,
    #[default]
    Body,
}

/// Terminal-only view state. It never feeds back into navigation; the
/// sidebar cursor is just a highlighted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub focus: Focus,
    pub sidebar_cursor: usize,
}

impl ViewState {
    pub fn toggle_focus(&mut self, active_index: Option<usize>) {
        self.focus = match self.focus {
            Focus::Sidebar => Focus::Body,
            Focus::Body => {
                self.sidebar_cursor = active_index.unwrap_or(0);
                Focus::Sidebar
            }
        };
    }

    pub fn cursor_up(&mut self) {
        self.sidebar_cursor = self.sidebar_cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self, total: usize) {
        if self.sidebar_cursor + 1 < total {
            self.sidebar_cursor += 1;
        }
    }

    /// Keeps the cursor inside a registry that may have shrunk.
    pub fn clamp(&mut self, total: usize) {
        self.sidebar_cursor = self.sidebar_cursor.min(total.saturating_sub(1));
    }

    pub fn sidebar_focused(&self) -> bool {
        self.focus == Focus::Sidebar
    }
}
