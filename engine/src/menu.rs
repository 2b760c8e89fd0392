//! Modal menus and the commands they produce.

use crate::{prelude::*, InputAction};

/// What picking a menu item does.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum MenuCommand {
    Close,
    /// Back to the town's main menu.
    Town,
    Quests,
    HandInQuest,
    Missions,
    ClaimMission,
    Trade,
    SellLoot,
    BuyArrows,
    BuyUpgrade,
    /// Rest at the camp with the given index.
    Rest(usize),
    Revive,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct MenuItem {
    pub label: String,
    pub command: MenuCommand,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Menu {
    pub title: String,
    /// Descriptive lines shown above the items.
    pub text: Vec<String>,
    pub items: Vec<MenuItem>,
    /// Index of the selected item.
    pub current: usize,
    /// Whether cancel closes the menu.
    pub closable: bool,
}

impl Menu {
    pub fn new(title: impl Into<String>) -> Self {
        Menu {
            title: title.into(),
            text: Vec::new(),
            items: Vec::new(),
            current: 0,
            closable: true,
        }
    }

    pub fn line(mut self, text: impl Into<String>) -> Self {
        self.text.push(text.into());
        self
    }

    pub fn item(
        mut self,
        label: impl Into<String>,
        command: MenuCommand,
    ) -> Self {
        self.items.push(MenuItem {
            label: label.into(),
            command,
        });
        self
    }

    /// Make the menu ignore cancel.
    pub fn permanent(mut self) -> Self {
        self.closable = false;
        self
    }

    pub fn up(&mut self) {
        let n = self.items.len();
        if n > 0 {
            self.current = (self.current + n - 1) % n;
        }
    }

    pub fn down(&mut self) {
        if !self.items.is_empty() {
            self.current = (self.current + 1) % self.items.len();
        }
    }

    pub fn selected(&self) -> Option<MenuCommand> {
        self.items.get(self.current).map(|i| i.command)
    }

    pub(crate) fn death(starved: bool) -> Self {
        let cause = if starved {
            "You ran out of food in the wilds."
        } else {
            "The wilds got the better of you."
        };
        Menu::new("You died")
            .line(cause)
            .item("Revive", MenuCommand::Revive)
            .permanent()
    }
}

impl Runtime {
    /// Feed an input to the open menu.
    pub fn menu_input(&mut self, input: InputAction) {
        let Some(menu) = self.menu.as_mut() else {
            log::warn!("Runtime::menu_input: no menu open");
            return;
        };

        let cmd = match input {
            InputAction::North => {
                menu.up();
                None
            }
            InputAction::South => {
                menu.down();
                None
            }
            InputAction::Confirm => menu.selected(),
            InputAction::Cancel if menu.closable => Some(MenuCommand::Close),
            _ => None,
        };

        if let Some(cmd) = cmd {
            self.dispatch(cmd);
        }
    }

    /// Run a menu command.
    pub fn dispatch(&mut self, cmd: MenuCommand) {
        log::debug!("dispatch {cmd:?}");
        use MenuCommand::*;
        match cmd {
            Close => self.menu = None,
            Town => self.menu = Some(self.town_menu()),
            Quests => self.menu = Some(self.quest_menu()),
            HandInQuest => {
                self.hand_in_quest();
                self.menu = Some(self.quest_menu());
            }
            Missions => self.menu = Some(self.mission_menu()),
            ClaimMission => {
                self.claim_mission();
                self.menu = Some(self.mission_menu());
            }
            Trade => self.menu = Some(self.trade_menu()),
            SellLoot => {
                self.sell_loot();
                self.menu = Some(self.trade_menu());
            }
            BuyArrows => {
                self.buy_arrows();
                self.menu = Some(self.trade_menu());
            }
            BuyUpgrade => {
                self.buy_upgrade();
                self.menu = Some(self.trade_menu());
            }
            Rest(camp) => {
                self.rest(camp);
                self.menu = None;
            }
            Revive => {
                self.revive();
                self.menu = None;
            }
        }
        self.pump_messages();
    }
}
