use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::ui::layout::clip_to_width;
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme::Theme;

/// Single-line text input used by the demo pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    placeholder: String,
    value: String,
    cursor_pos: usize,
}

impl TextField {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            value: String::new(),
            cursor_pos: 0,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.cursor_pos = self.value.chars().count();
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    /// Returns `true` when the value changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT) {
            return false;
        }
        match key.code {
            KeyCode::Char(ch) => {
                self.insert(ch);
                true
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                self.cursor_pos = (self.cursor_pos + 1).min(self.value.chars().count());
                false
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
                false
            }
            KeyCode::End => {
                self.cursor_pos = self.value.chars().count();
                false
            }
            _ => false,
        }
    }

    fn byte_pos(&self, char_pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_pos)
            .map_or(self.value.len(), |(idx, _)| idx)
    }

    fn insert(&mut self, ch: char) {
        let at = self.byte_pos(self.cursor_pos);
        self.value.insert(at, ch);
        self.cursor_pos += 1;
    }

    fn backspace(&mut self) -> bool {
        if self.cursor_pos == 0 {
            return false;
        }
        let at = self.byte_pos(self.cursor_pos - 1);
        self.value.remove(at);
        self.cursor_pos -= 1;
        true
    }

    fn delete(&mut self) -> bool {
        if self.cursor_pos >= self.value.chars().count() {
            return false;
        }
        let at = self.byte_pos(self.cursor_pos);
        self.value.remove(at);
        true
    }

    /// `[ value▏ ]` when focused, the placeholder in muted text when empty.
    pub fn render(&self, theme: &Theme, width: usize, focused: bool) -> SpanLine {
        let inner = width.saturating_sub(4);
        let mut line = vec![Span::styled("[ ", theme.border)];
        if self.value.is_empty() && !focused {
            line.push(Span::styled(clip_to_width(&self.placeholder, inner), theme.muted));
        } else {
            let before: String = self.value.chars().take(self.cursor_pos).collect();
            let after: String = self.value.chars().skip(self.cursor_pos).collect();
            line.push(Span::new(clip_to_width(&before, inner)));
            if focused {
                line.push(Span::styled("▏", theme.cursor));
            }
            line.push(Span::new(after));
        }
        line.push(Span::styled(" ]", theme.border));
        line
    }
}

#[cfg(test)]
mod tests {
    use super::TextField;
    use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};

    fn press(field: &mut TextField, code: KeyCode) -> bool {
        field.handle_key(KeyEvent::plain(code))
    }

    #[test]
    fn edits_at_the_cursor() {
        let mut field = TextField::new("Project name");
        for ch in "Acme".chars() {
            assert!(press(&mut field, KeyCode::Char(ch)));
        }
        press(&mut field, KeyCode::Left);
        press(&mut field, KeyCode::Left);
        assert!(press(&mut field, KeyCode::Backspace));
        assert_eq!(field.value(), "Ame");

        press(&mut field, KeyCode::Home);
        assert!(press(&mut field, KeyCode::Delete));
        assert_eq!(field.value(), "me");
        assert!(!press(&mut field, KeyCode::Home));
        assert!(!press(&mut field, KeyCode::Backspace));
    }

    #[test]
    fn ignores_chords() {
        let mut field = TextField::new("x");
        let chord = KeyEvent::with_modifiers(KeyCode::Char('n'), KeyModifiers::ALT);
        assert!(!field.handle_key(chord));
        assert_eq!(field.value(), "");
    }

    #[test]
    fn multibyte_input() {
        let mut field = TextField::new("x").with_value("日本");
        press(&mut field, KeyCode::Char('語'));
        press(&mut field, KeyCode::Left);
        press(&mut field, KeyCode::Backspace);
        assert_eq!(field.value(), "日語");
    }
}
