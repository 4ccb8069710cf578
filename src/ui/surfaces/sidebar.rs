use crate::error::DialogError;
use crate::state::affordance::{StepItemView, step_items};
use crate::state::dialog::DialogHandle;
use crate::ui::layout::wrap_text;
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme::Theme;

const DESCRIPTION_INDENT: &str = "    ";

pub fn render<C>(
    handle: &DialogHandle<C>,
    theme: &Theme,
    width: usize,
    cursor: Option<usize>,
) -> Result<Vec<SpanLine>, DialogError> {
    let items = step_items(&handle.context()?);
    let mut lines = Vec::with_capacity(items.len() * 3);
    for (idx, item) in items.iter().enumerate() {
        lines.extend(render_item(item, theme, width, cursor == Some(idx)));
    }
    Ok(lines)
}

fn render_item(item: &StepItemView, theme: &Theme, width: usize, under_cursor: bool) -> Vec<SpanLine> {
    let label_style = if item.disabled {
        theme.disabled_item
    } else if item.active {
        theme.active_item
    } else {
        theme.item
    };
    let (marker, marker_style) = theme.state_marker(item.state);

    let mut heading = vec![
        if under_cursor {
            Span::styled("› ", theme.cursor)
        } else {
            Span::new("  ")
        },
        Span::styled(format!("{marker} "), marker_style),
    ];
    if let Some(icon) = &item.icon {
        heading.push(Span::styled(format!("{icon} "), label_style));
    }
    heading.push(Span::styled(item.label.clone(), label_style));

    let mut lines = vec![heading];
    if let Some(description) = &item.description {
        lines.extend(
            wrap_text(description, width.saturating_sub(DESCRIPTION_INDENT.len()))
                .into_iter()
                .map(|row| vec![Span::new(DESCRIPTION_INDENT), Span::styled(row, theme.muted)]),
        );
    }
    lines.push(vec![Span::styled("─".repeat(width), theme.border)]);
    lines
}
