use crate::error::DialogError;
use crate::state::affordance::ProgressInfo;
use crate::state::dialog::DialogHandle;
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme::Theme;

pub fn render<C>(
    handle: &DialogHandle<C>,
    theme: &Theme,
    width: usize,
) -> Result<SpanLine, DialogError> {
    let info = ProgressInfo::from_context(&handle.context()?);
    Ok(bar(&info, theme, width))
}

pub fn bar(info: &ProgressInfo, theme: &Theme, width: usize) -> SpanLine {
    let filled = ((info.percent / 100.0) * width as f32).round() as usize;
    let filled = filled.min(width);
    vec![
        Span::styled("━".repeat(filled), theme.progress_fill),
        Span::styled("─".repeat(width - filled), theme.progress_empty),
    ]
}
