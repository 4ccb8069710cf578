use crate::runtime::command::Command;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn alt(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::ALT)
    }

    pub fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Key maps for the two dialog states. While closed only the launcher keys
/// exist; while open, unbound keys fall through to the step content.
#[derive(Default)]
pub struct KeyBindings {
    open: HashMap<KeyBinding, Command>,
    closed: HashMap<KeyBinding, Command>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut manager = Self::default();
        manager.install_defaults();
        manager
    }

    pub fn bind_open(&mut self, key: KeyBinding, command: Command) {
        self.open.insert(key, command);
    }

    pub fn bind_closed(&mut self, key: KeyBinding, command: Command) {
        self.closed.insert(key, command);
    }

    pub fn unbind(&mut self, key: &KeyBinding) {
        self.open.remove(key);
        self.closed.remove(key);
    }

    pub fn resolve(&self, event: KeyEvent, dialog_open: bool) -> Option<Command> {
        let map = if dialog_open { &self.open } else { &self.closed };
        map.get(&KeyBinding::from_event(event)).cloned()
    }

    fn install_defaults(&mut self) {
        self.bind_open(KeyBinding::ctrl(KeyCode::Char('c')), Command::Exit);
        self.bind_closed(KeyBinding::ctrl(KeyCode::Char('c')), Command::Exit);

        self.bind_closed(KeyBinding::key(KeyCode::Char('o')), Command::Open);
        self.bind_closed(KeyBinding::key(KeyCode::Enter), Command::Open);
        self.bind_closed(KeyBinding::key(KeyCode::Char('q')), Command::Exit);
        self.bind_closed(KeyBinding::key(KeyCode::Esc), Command::Exit);

        self.bind_open(KeyBinding::key(KeyCode::Esc), Command::Close);
        self.bind_open(KeyBinding::ctrl(KeyCode::Right), Command::Next);
        self.bind_open(KeyBinding::ctrl(KeyCode::Left), Command::Back);
        self.bind_open(KeyBinding::alt(KeyCode::Char('n')), Command::Next);
        self.bind_open(KeyBinding::alt(KeyCode::Char('b')), Command::Back);
        self.bind_open(KeyBinding::key(KeyCode::Tab), Command::FocusSwap);
        self.bind_open(
            KeyBinding::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            Command::FocusSwap,
        );
        self.bind_open(KeyBinding::key(KeyCode::Up), Command::SidebarUp);
        self.bind_open(KeyBinding::key(KeyCode::Down), Command::SidebarDown);
        self.bind_open(KeyBinding::key(KeyCode::Enter), Command::Activate);
    }
}
