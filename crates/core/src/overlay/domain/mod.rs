pub mod cursor_compositor;
pub mod cursor_sprite;
