//! Comma-separated command scripts for headless runs, e.g.
//! `open,type:Acme,next,goto:auth`.

use crate::error::Error;
use crate::runtime::command::Command;
use crate::terminal::{KeyCode, KeyEvent};

pub fn parse(raw: &str) -> Result<Vec<Command>, Error> {
    let mut commands = Vec::new();
    for token in raw.split(',').map(str::trim).filter(|token| !token.is_empty()) {
        if let Some(text) = token.strip_prefix("type:") {
            commands.extend(
                text.chars()
                    .map(|ch| Command::InputKey(KeyEvent::plain(KeyCode::Char(ch)))),
            );
            continue;
        }
        if let Some(id) = token.strip_prefix("goto:") {
            if id.is_empty() {
                return Err(Error::Script("goto needs a step id".into()));
            }
            commands.push(Command::GoTo(id.to_owned()));
            continue;
        }
        commands.push(match token {
            "open" => Command::Open,
            "close" => Command::Close,
            "next" => Command::Next,
            "back" => Command::Back,
            "tab" => Command::FocusSwap,
            "up" => Command::SidebarUp,
            "down" => Command::SidebarDown,
            "enter" => Command::Activate,
            "left" => Command::InputKey(KeyEvent::plain(KeyCode::Left)),
            "right" => Command::InputKey(KeyEvent::plain(KeyCode::Right)),
            "backspace" => Command::InputKey(KeyEvent::plain(KeyCode::Backspace)),
            other => return Err(Error::Script(format!("unknown command `{other}`"))),
        });
    }
    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::runtime::command::Command;
    use crate::terminal::{KeyCode, KeyEvent};

    #[test]
    fn parses_commands_and_typed_text() {
        let commands = parse("open, type:ab ,next,goto:auth").expect("valid script");
        assert_eq!(
            commands,
            vec![
                Command::Open,
                Command::InputKey(KeyEvent::plain(KeyCode::Char('a'))),
                Command::InputKey(KeyEvent::plain(KeyCode::Char('b'))),
                Command::Next,
                Command::GoTo("auth".into()),
            ]
        );
    }

    #[test]
    fn rejects_unknown_commands() {
        let err = parse("open,jump").expect_err("unknown");
        assert!(err.to_string().contains("jump"));
        assert!(parse("goto:").is_err());
    }
}
