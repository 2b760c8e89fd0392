//! Emitting messages about instant events to the UI layer

use std::{
    cell::RefCell,
    collections::VecDeque,
    sync::mpsc::{self, Sender},
};

use derive_more::Deref;

/// Interface for receiving game event messages for displaying.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Msg {
    /// Text message.
    Message(String),

    /// Something that hurts the player, shown highlighted.
    Alert(String),
}

impl Msg {
    pub fn text(&self) -> &str {
        match self {
            Msg::Message(s) | Msg::Alert(s) => s,
        }
    }
}

thread_local! {
    // Game logic runs on a single thread, a thread-local channel keeps
    // separate games (like parallel tests) from hearing each other.
    static SENDER: RefCell<Option<Sender<Msg>>> = const { RefCell::new(None) };
}

#[derive(Deref)]
pub struct Receiver(mpsc::Receiver<Msg>);

impl Default for Receiver {
    fn default() -> Self {
        let (send, recv) = mpsc::channel();
        SENDER.with(|s| *s.borrow_mut() = Some(send));
        Receiver(recv)
    }
}

pub fn send_msg(msg: Msg) {
    SENDER.with(|s| {
        if let Some(ref sender) = *s.borrow() {
            // Receiver may be gone during teardown, nothing to do then.
            let _ = sender.send(msg);
        }
    });
}

#[macro_export]
macro_rules! msg {
    // NB. Even the simple cases needs to be wrapped in `format!` in case the
    // fmt string is doing named variable capture.
    ($fmt:expr) => {
        $crate::send_msg($crate::Msg::Message(format!($fmt)))
    };

    ($fmt:expr, $($arg:expr),*) => {
        $crate::send_msg($crate::Msg::Message(format!($fmt, $($arg),*)))
    };
}

#[macro_export]
macro_rules! alert {
    ($fmt:expr) => {
        $crate::send_msg($crate::Msg::Alert(format!($fmt)))
    };

    ($fmt:expr, $($arg:expr),*) => {
        $crate::send_msg($crate::Msg::Alert(format!($fmt, $($arg),*)))
    };
}

/// Most recent messages, oldest first.
#[derive(Default, Debug)]
pub struct MessageLog {
    lines: VecDeque<Msg>,
}

impl MessageLog {
    const CAPACITY: usize = 64;

    pub fn push(&mut self, msg: Msg) {
        log::debug!("msg: {}", msg.text());
        if self.lines.len() == Self::CAPACITY {
            self.lines.pop_front();
        }
        self.lines.push_back(msg);
    }

    /// The last `n` messages, oldest first.
    pub fn tail(&self, n: usize) -> impl Iterator<Item = &Msg> {
        self.lines.iter().skip(self.lines.len().saturating_sub(n))
    }
}
