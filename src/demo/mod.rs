//! Host pages that embed the dialog: a plain project setup, a single
//! validation gate, a ledger whose steps validate one another, and a flow
//! read from a YAML file.

pub mod configured;
pub mod dynamic;
pub mod field;
pub mod standard;
pub mod validation;
pub mod validators;

use crate::ui::layout::wrap_styled;
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme::Theme;

/// Heading plus wrapped description, followed by a blank row.
pub(crate) fn page_intro(title: &str, text: &str, theme: &Theme, width: usize) -> Vec<SpanLine> {
    let mut lines = vec![vec![Span::styled(title, theme.title)]];
    lines.extend(wrap_styled(text, width, theme.muted));
    lines.push(SpanLine::new());
    lines
}

pub(crate) fn checkbox(label: &str, checked: bool, focused: bool, theme: &Theme) -> SpanLine {
    let mark = if checked { "[x] " } else { "[ ] " };
    let style = if focused { theme.cursor } else { theme.item };
    vec![Span::styled(mark, style), Span::styled(label, theme.item)]
}

pub(crate) fn error_line(message: &str, theme: &Theme) -> SpanLine {
    vec![Span::styled(format!("  ! {message}"), theme.error)]
}
