use crate::ui::layout::wrap_styled;
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogChrome {
    pub title: String,
    pub description: Option<String>,
    pub action: Option<String>,
}

impl DialogChrome {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            action: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

pub fn render(chrome: &DialogChrome, theme: &Theme, width: usize) -> Vec<SpanLine> {
    let mut title = vec![Span::styled(chrome.title.clone(), theme.title)];
    if let Some(action) = &chrome.action {
        title.push(Span::styled(format!("  [{action}]"), theme.muted));
    }
    let mut lines = vec![title];
    if let Some(description) = &chrome.description {
        lines.extend(wrap_styled(description, width, theme.description));
    }
    lines
}
