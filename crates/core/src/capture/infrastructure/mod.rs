pub mod xcap_frame_source;
