//! Shared terminal UI pieces: theme, screen layout and the text input widget.

mod input;
mod layout;
mod theme;

pub use input::{draw_input, FieldDisplay};
pub use layout::Layout;
pub use theme::Theme;
