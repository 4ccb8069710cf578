use crate::core::step::StepState;
use crate::ui::style::{Color, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub description: Style,
    pub muted: Style,
    pub active_item: Style,
    pub item: Style,
    pub disabled_item: Style,
    pub cursor: Style,
    pub progress_fill: Style,
    pub progress_empty: Style,
    pub button: Style,
    pub button_primary: Style,
    pub button_disabled: Style,
    pub border: Style,
    pub error: Style,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            title: Style::new().bold(),
            description: Style::new().color(Color::DarkGrey),
            muted: Style::new().color(Color::DarkGrey),
            active_item: Style::new().bold().background(Color::DarkGrey),
            item: Style::new(),
            disabled_item: Style::new().color(Color::DarkGrey).dim(),
            cursor: Style::new().color(Color::Cyan).bold(),
            progress_fill: Style::new().color(Color::Cyan),
            progress_empty: Style::new().color(Color::DarkGrey),
            button: Style::new().bold(),
            button_primary: Style::new().color(Color::Cyan).bold(),
            button_disabled: Style::new().color(Color::DarkGrey).dim(),
            border: Style::new().color(Color::DarkGrey),
            error: Style::new().color(Color::Red),
        }
    }

    pub fn state_marker(&self, state: StepState) -> (&'static str, Style) {
        match state {
            StepState::Idle => ("○", self.muted),
            StepState::Valid => ("●", Style::new().color(Color::Cyan)),
            StepState::Error => ("✗", self.error),
            StepState::Complete => ("✓", Style::new().color(Color::Green)),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
