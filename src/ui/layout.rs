use crate::ui::span::{Span, SpanLine};
use crate::ui::style::Style;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn clip_to_width(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let mut used = 0usize;
    let mut out = String::new();
    for ch in text.chars().filter(|ch| !matches!(ch, '\n' | '\r')) {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used.saturating_add(ch_width) > max_width {
            break;
        }
        out.push(ch);
        used = used.saturating_add(ch_width);
    }
    out
}

/// Clips a line to `width` columns without padding.
pub fn clip_line(line: &SpanLine, width: usize) -> SpanLine {
    let mut out = SpanLine::new();
    let mut used = 0usize;
    for span in line {
        if used >= width {
            break;
        }
        let clipped = clip_to_width(&span.text, width - used);
        if clipped.is_empty() {
            continue;
        }
        used += UnicodeWidthStr::width(clipped.as_str());
        out.push(Span::styled(clipped, span.style));
    }
    out
}

/// Clips a line to `width` columns and pads it with spaces so columns placed
/// after it line up.
pub fn fit_line(line: &SpanLine, width: usize) -> SpanLine {
    let mut out = clip_line(line, width);
    let used = out.iter().map(|span| UnicodeWidthStr::width(span.text.as_str())).sum::<usize>();
    if used < width {
        out.push(Span::new(" ".repeat(width - used)));
    }
    out
}

/// Greedy word wrap. Words longer than `width` are hard-split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0usize;
        for word in paragraph.split_whitespace() {
            let mut word = word.to_owned();
            loop {
                let word_width = UnicodeWidthStr::width(word.as_str());
                let needed = if current.is_empty() {
                    word_width
                } else {
                    current_width + 1 + word_width
                };
                if needed <= width {
                    if !current.is_empty() {
                        current.push(' ');
                        current_width += 1;
                    }
                    current.push_str(&word);
                    current_width += word_width;
                    break;
                }
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                    continue;
                }
                let mut head = clip_to_width(&word, width);
                if head.is_empty()
                    && let Some(ch) = word.chars().next()
                {
                    head.push(ch);
                }
                let rest = word[head.len()..].to_owned();
                lines.push(head);
                if rest.is_empty() {
                    break;
                }
                word = rest;
            }
        }
        lines.push(current);
    }
    lines
}

pub fn wrap_styled(text: &str, width: usize, style: Style) -> Vec<SpanLine> {
    wrap_text(text, width)
        .into_iter()
        .map(|line| vec![Span::styled(line, style)])
        .collect()
}

/// Places two columns side by side, padding the shorter one.
pub fn join_columns(
    left: &[SpanLine],
    left_width: usize,
    separator: &Span,
    right: &[SpanLine],
    right_width: usize,
) -> Vec<SpanLine> {
    let rows = left.len().max(right.len());
    let empty = SpanLine::new();
    (0..rows)
        .map(|row| {
            let mut line = fit_line(left.get(row).unwrap_or(&empty), left_width);
            line.push(separator.clone());
            line.extend(fit_line(right.get(row).unwrap_or(&empty), right_width));
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{clip_line, clip_to_width, fit_line, join_columns, wrap_text};
    use crate::ui::span::{Span, line_width, plain_text};

    #[test]
    fn clip_respects_wide_chars() {
        assert_eq!(clip_to_width("日本語", 4), "日本");
        assert_eq!(clip_to_width("abc", 0), "");
    }

    #[test]
    fn fit_line_pads_and_clips() {
        let line = vec![Span::new("Hello"), Span::new(" world")];
        assert_eq!(plain_text(&fit_line(&line, 8)), "Hello wo");
        assert_eq!(line_width(&fit_line(&line, 14)), 14);
    }

    #[test]
    fn clip_line_never_pads() {
        let line = vec![Span::new("Hello"), Span::new(" world")];
        assert_eq!(plain_text(&clip_line(&line, 7)), "Hello w");
        assert_eq!(plain_text(&clip_line(&line, 40)), "Hello world");
        assert!(clip_line(&line, 0).is_empty());
    }

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(
            wrap_text("Give each transaction a name.", 12),
            vec!["Give each", "transaction", "a name."]
        );
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap_text("one\n\ntwo", 10), vec!["one", "", "two"]);
    }

    #[test]
    fn columns_are_padded_to_the_taller_side() {
        let left = vec![vec![Span::new("a")], vec![Span::new("b")]];
        let right = vec![vec![Span::new("body")]];
        let rows = join_columns(&left, 3, &Span::new("|"), &right, 5);
        assert_eq!(rows.len(), 2);
        assert_eq!(plain_text(&rows[0]), "a  |body ");
        assert_eq!(plain_text(&rows[1]), "b  |     ");
    }
}
