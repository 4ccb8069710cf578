use crate::error::DialogError;
use crate::state::dialog::DialogHandle;
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme::Theme;

pub const EMPTY_STEP_TEXT: &str = "No content for this step.";

/// Renders the active step's content through the host's renderer, or the
/// placeholder when there is no active step.
pub fn render<C>(
    handle: &DialogHandle<C>,
    theme: &Theme,
    render_content: impl FnOnce(&C) -> Vec<SpanLine>,
) -> Result<Vec<SpanLine>, DialogError> {
    let ctx = handle.context()?;
    Ok(match ctx.active_step() {
        Some(step) => render_content(&step.content),
        None => placeholder(theme),
    })
}

pub fn placeholder(theme: &Theme) -> Vec<SpanLine> {
    vec![vec![Span::styled(EMPTY_STEP_TEXT, theme.muted)]]
}
