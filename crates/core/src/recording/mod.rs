pub mod config;
pub mod pacer;
pub mod record_screen_use_case;
