pub mod minifb_preview;
