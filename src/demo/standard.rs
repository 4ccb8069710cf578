use crate::core::registry::StepRegistry;
use crate::core::step::Step;
use crate::demo::field::TextField;
use crate::demo::{checkbox, page_intro};
use crate::error::DialogError;
use crate::runtime::host::{DialogHost, OpenState};
use crate::state::dialog::{DialogProps, MultiStepDialog};
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::{Span, SpanLine};
use crate::ui::surfaces::DialogChrome;
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardPage {
    General,
    Database,
    Auth,
}

pub fn steps() -> StepRegistry<StandardPage> {
    StepRegistry::new(vec![
        Step::new("general", "General", StandardPage::General)
            .with_description("Configure project basics")
            .with_icon("⚙"),
        Step::new("database", "Database", StandardPage::Database)
            .with_description("Setup and manage database")
            .with_icon("⛁"),
        Step::new("auth", "Auth", StandardPage::Auth)
            .with_description("Manage authentication and roles")
            .with_icon("⛨"),
    ])
}

/// Project setup with no guard: every step is reachable from every other.
pub struct StandardHost {
    open: OpenState,
    project_name: TextField,
    database_url: TextField,
    magic_link: bool,
    oauth: bool,
    auth_row: usize,
}

impl Default for StandardHost {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardHost {
    pub fn new() -> Self {
        Self {
            open: OpenState::new(false),
            project_name: TextField::new("Project name"),
            database_url: TextField::new("Database URL"),
            magic_link: false,
            oauth: false,
            auth_row: 0,
        }
    }

    pub fn project_name(&self) -> &str {
        self.project_name.value()
    }

    pub fn database_url(&self) -> &str {
        self.database_url.value()
    }

    pub fn auth_methods(&self) -> (bool, bool) {
        (self.magic_link, self.oauth)
    }

    fn handle_auth_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => {
                self.auth_row = 0;
                false
            }
            KeyCode::Down => {
                self.auth_row = 1;
                false
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                let flag = if self.auth_row == 0 {
                    &mut self.magic_link
                } else {
                    &mut self.oauth
                };
                *flag = !*flag;
                true
            }
            _ => false,
        }
    }
}

impl DialogHost for StandardHost {
    type Content = StandardPage;

    fn chrome(&self) -> DialogChrome {
        DialogChrome::new("Project Setup").with_description("Configure your project settings")
    }

    fn props(&mut self) -> DialogProps<StandardPage> {
        DialogProps::new(steps())
            .open(self.open.get())
            .on_open_change(self.open.callback())
    }

    fn render_content(&self, page: &StandardPage, theme: &Theme, width: usize) -> Vec<SpanLine> {
        match page {
            StandardPage::General => {
                let mut lines = page_intro(
                    "General Settings",
                    "Configure general information about your project here.",
                    theme,
                    width,
                );
                lines.push(self.project_name.render(theme, width, true));
                lines
            }
            StandardPage::Database => {
                let mut lines = page_intro(
                    "Database Configuration",
                    "Setup your database connection and credentials.",
                    theme,
                    width,
                );
                lines.push(self.database_url.render(theme, width, true));
                lines
            }
            StandardPage::Auth => {
                let mut lines = page_intro(
                    "Authentication",
                    "Manage authentication methods and user roles.",
                    theme,
                    width,
                );
                lines.push(checkbox(
                    "Enable magic link sign-in",
                    self.magic_link,
                    self.auth_row == 0,
                    theme,
                ));
                lines.push(checkbox(
                    "Enable OAuth providers",
                    self.oauth,
                    self.auth_row == 1,
                    theme,
                ));
                lines.push(vec![Span::styled("Space toggles", theme.muted)]);
                lines
            }
        }
    }

    fn handle_key(&mut self, page: &StandardPage, key: KeyEvent) -> bool {
        match page {
            StandardPage::General => self.project_name.handle_key(key),
            StandardPage::Database => self.database_url.handle_key(key),
            StandardPage::Auth => self.handle_auth_key(key),
        }
    }

    fn sync(&mut self, dialog: &mut MultiStepDialog<StandardPage>) -> Result<(), DialogError> {
        dialog.set_open(self.open.get())
    }
}
