use std::sync::mpsc::Receiver;

/// Abstract input events produced by the frontend.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum InputAction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    Wait,
    Listen,
    Hide,
    Scout,
    Aim,
    Fire,
    Help,
    /// Toggle zoom in play, pick the selected item in menus.
    Confirm,
    Cancel,
    Quit,
}

impl InputAction {
    /// Step direction of a movement input.
    pub fn dir(self) -> Option<glam::IVec2> {
        use InputAction::*;
        let i = match self {
            North => 0,
            NorthEast => 1,
            East => 2,
            SouthEast => 3,
            South => 4,
            SouthWest => 5,
            West => 6,
            NorthWest => 7,
            _ => return None,
        };
        Some(util::DIR_8[i])
    }
}

/// Block until an input the predicate accepts arrives.
///
/// Inputs the predicate rejects are dropped. Returns `None` when the input
/// channel has disconnected.
pub fn wait_for<T>(
    rx: &Receiver<InputAction>,
    mut pred: impl FnMut(InputAction) -> Option<T>,
) -> Option<T> {
    rx.iter().find_map(|a| pred(a))
}

#[cfg(test)]
mod test {
    use std::sync::mpsc;

    use glam::ivec2;

    use super::*;

    #[test]
    fn filtered_wait() {
        let (tx, rx) = mpsc::channel();
        tx.send(InputAction::Help).unwrap();
        tx.send(InputAction::East).unwrap();
        tx.send(InputAction::Quit).unwrap();
        drop(tx);

        assert_eq!(wait_for(&rx, InputAction::dir), Some(ivec2(1, 0)));
        assert_eq!(
            wait_for(&rx, |a| (a == InputAction::Quit).then_some(a)),
            Some(InputAction::Quit)
        );
        assert_eq!(wait_for(&rx, Some), None);
    }
}
