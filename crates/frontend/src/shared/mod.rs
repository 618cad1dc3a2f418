pub mod config;
pub mod format;
pub mod guard;
pub mod icons;
pub mod key_listener;
pub mod modal_frame;
pub mod scroll_lock;
