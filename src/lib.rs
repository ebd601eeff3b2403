//! Page behaviour for server-rendered pages: marking the navigation link of
//! the current page, and showing dismissible alert banners that remove
//! themselves after a few seconds.

pub mod alert;
mod class_list;
mod config;
mod error;
pub mod nav;
mod page;

pub use self::alert::{AlertContent, AlertHandle, AlertPresenter, Severity, show_alert};
pub use self::class_list::ClassList;
pub use self::config::Config;
pub use self::error::{Error, Result};
pub use self::nav::{NavHighlighter, highlight_current};
pub use self::page::Page;
pub use roehn_timers::{PendingTimer, TimerHandle, TimerQueue};
