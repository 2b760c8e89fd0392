use std::{
    sync::mpsc::{self, Receiver},
    thread,
};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use derive_more::Deref;
use engine::InputAction;
use util::IndexMap;

/// Key bindings.
#[derive(Clone, Debug, Deref, Eq, PartialEq)]
pub struct InputMap(IndexMap<KeyCode, InputAction>);

impl Default for InputMap {
    fn default() -> Self {
        use InputAction::*;

        let mut ret: IndexMap<KeyCode, InputAction> = Default::default();

        for (k, act) in [
            (KeyCode::Char('w'), North),
            (KeyCode::Char('e'), NorthEast),
            (KeyCode::Char('d'), East),
            (KeyCode::Char('c'), SouthEast),
            (KeyCode::Char('x'), South),
            (KeyCode::Char('z'), SouthWest),
            (KeyCode::Char('a'), West),
            (KeyCode::Char('q'), NorthWest),
            (KeyCode::Up, North),
            (KeyCode::Right, East),
            (KeyCode::Down, South),
            (KeyCode::Left, West),
            (KeyCode::Char('s'), Wait),
            (KeyCode::Char(' '), Wait),
            (KeyCode::Char('1'), Listen),
            (KeyCode::Char('2'), Hide),
            (KeyCode::Char('3'), Scout),
            (KeyCode::Char('4'), Aim),
            (KeyCode::Char('5'), Fire),
            (KeyCode::Char('0'), Help),
            (KeyCode::Enter, Confirm),
            (KeyCode::Esc, Cancel),
        ] {
            ret.insert(k, act);
        }

        InputMap(ret)
    }
}

impl InputMap {
    pub fn map(&self, key: &KeyEvent) -> Option<InputAction> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return (key.code == KeyCode::Char('c'))
                .then_some(InputAction::Quit);
        }

        let code = match key.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            code => code,
        };
        self.0.get(&code).copied()
    }
}

/// Read terminal key events in a background thread and send the mapped
/// actions over a channel.
///
/// The thread exits when the receiver is dropped or reading fails.
pub fn spawn_input_thread(map: InputMap) -> Receiver<InputAction> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                let Some(action) = map.map(&key) else {
                    continue;
                };
                if tx.send(action).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => {
                log::error!("Reading terminal input failed: {e}");
                break;
            }
        }
    });
    rx
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bindings() {
        let map = InputMap::default();
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);

        let nw = Some(InputAction::NorthWest);
        assert_eq!(map.map(&key(KeyCode::Char('q'))), nw);
        assert_eq!(map.map(&key(KeyCode::Char('Q'))), nw);
        assert_eq!(map.map(&key(KeyCode::Left)), Some(InputAction::West));
        assert_eq!(map.map(&key(KeyCode::Char('y'))), None);
        assert_eq!(
            map.map(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputAction::Quit)
        );
    }
}
