//! Terminal frontend machinery

mod input;
pub use input::{spawn_input_thread, InputMap};

mod terminal;
pub use terminal::Terminal;
