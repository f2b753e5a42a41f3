//! Session-wide state shared across pages

pub mod stores;
pub mod toasts;

pub use stores::{AuthStore, PrefsStore, Theme};
pub use toasts::{ToastLevel, Toasts};
