//! Character grid graphics primitives.
//!
//! The game draws into anything implementing [`Display`], the terminal
//! frontend and the headless [`Buffer`] used in tests.

mod buffer;
pub use buffer::Buffer;

mod color;
pub use color::Rgb;

mod display;
pub use display::{CharCell, Display, Glyph};
