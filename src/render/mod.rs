pub mod renderer;

pub use renderer::{Hud, MENU_ITEMS, Renderer};
