pub mod cursor_tracker;
pub mod stop_signal;
