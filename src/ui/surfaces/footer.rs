use crate::error::DialogError;
use crate::state::affordance::{FooterButtons, FooterInfo, FooterPolicy};
use crate::state::dialog::DialogHandle;
use crate::ui::span::{Span, SpanLine, line_width};
use crate::ui::theme::Theme;

pub fn render<C>(
    handle: &DialogHandle<C>,
    theme: &Theme,
    width: usize,
    policy: &dyn FooterPolicy,
) -> Result<(SpanLine, FooterButtons), DialogError> {
    let info = FooterInfo::from_context(&handle.context()?);
    let buttons = policy.buttons(&info);
    Ok((line(&info, &buttons, theme, width), buttons))
}

pub fn line(info: &FooterInfo, buttons: &FooterButtons, theme: &Theme, width: usize) -> SpanLine {
    let left = vec![Span::styled(info.position_label(), theme.muted)];
    let back_style = if buttons.back_disabled {
        theme.button_disabled
    } else {
        theme.button
    };
    let primary_style = if buttons.primary_disabled {
        theme.button_disabled
    } else {
        theme.button_primary
    };
    let right = vec![
        Span::styled("[ Back ]", back_style),
        Span::new(" "),
        Span::styled(format!("[ {} ]", buttons.primary.label()), primary_style),
    ];

    let gap = width
        .saturating_sub(line_width(&left) + line_width(&right))
        .max(1);
    let mut out = left;
    out.push(Span::new(" ".repeat(gap)));
    out.extend(right);
    out
}
