//! # Application Layer
//!
//! The session controller plus the resources it owns: the input capture
//! guard and the notification channel.

pub mod capture;
pub mod controller;
pub mod notification;
pub mod view;

pub use capture::CaptureGuard;
pub use controller::ReleaseSessionController;
pub use notification::NotificationChannel;
pub use view::SessionView;
