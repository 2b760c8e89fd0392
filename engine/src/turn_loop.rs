use std::sync::mpsc::Receiver;

use anyhow::Result;
use gfx::Display;

use crate::{wait_for, InputAction, PlayerAction, Runtime};

/// Whether an input means anything in the current mode.
fn accepts(in_menu: bool, input: InputAction) -> bool {
    use InputAction::*;
    match input {
        Quit => true,
        North | South | Confirm | Cancel if in_menu => true,
        _ if in_menu => false,
        _ => PlayerAction::try_from(input).is_ok(),
    }
}

/// Run the game until the player quits or the input source goes away.
pub fn run(
    r: &mut Runtime,
    input: &Receiver<InputAction>,
    display: &mut dyn Display,
) -> Result<()> {
    loop {
        r.draw(display);
        display.present()?;

        let in_menu = r.menu().is_some();
        let Some(action) = wait_for(input, |a| accepts(in_menu, a).then_some(a))
        else {
            log::info!("Input closed, exiting");
            return Ok(());
        };

        if action == InputAction::Quit {
            log::info!("Quit on turn {}", r.now().turn());
            return Ok(());
        }

        if in_menu {
            r.menu_input(action);
        } else if let Ok(act) = PlayerAction::try_from(action) {
            r.play(act);
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::mpsc;

    use gfx::Buffer;
    use glam::ivec2;
    use rand::rngs::mock::StepRng;
    use world::{BiomeKind, BiomeMap, WorldMap};

    use super::*;
    use crate::{SCREEN_SIZE, VIEW_SIZE};

    #[test]
    fn scripted_session() {
        let map = WorldMap::new(
            BiomeMap::uniform(ivec2(100, 100), BiomeKind::Plains),
            VIEW_SIZE,
        );
        let mut r = Runtime::scenario(map, ivec2(50, 50), StepRng::new(0, 0));
        let start = r.player().pos;
        let mut buf = Buffer::new(SCREEN_SIZE.x as u32, SCREEN_SIZE.y as u32);

        let (tx, rx) = mpsc::channel();
        for a in [
            InputAction::West,
            // Ignored outside menus.
            InputAction::Cancel,
            InputAction::Wait,
        ] {
            tx.send(a).unwrap();
        }
        drop(tx);

        run(&mut r, &rx, &mut buf).unwrap();
        assert_eq!(r.player().pos, start + ivec2(-1, 0));
        assert_eq!(r.now().turn(), 3);
    }

    #[test]
    fn menu_mode_filters_input() {
        assert!(accepts(true, InputAction::Confirm));
        assert!(!accepts(true, InputAction::Fire));
        assert!(accepts(true, InputAction::Quit));
        assert!(accepts(false, InputAction::Fire));
        assert!(!accepts(false, InputAction::Cancel));
    }
}
