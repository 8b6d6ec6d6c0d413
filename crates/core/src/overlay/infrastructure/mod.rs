pub mod image_cursor_loader;
