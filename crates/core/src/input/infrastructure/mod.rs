pub mod device_query_tracker;
pub mod stop_key_listener;
