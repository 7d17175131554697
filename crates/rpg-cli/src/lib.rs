//! rpg-cli: Console front end
//!
//! Menus, prompts and battle screens over any `BufRead`/`Write` pair.

pub mod app;
pub mod console;
pub mod input;
pub mod map;
pub mod theme;

pub use app::{App, Flow, Session};
pub use console::Console;
pub use theme::Theme;
