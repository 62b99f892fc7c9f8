//! Notification validation, payload mapping and delivery to FCM.
pub mod forwarder;
pub mod payload;
pub mod request;

pub use forwarder::{NotificationForwarder, ProviderResponse};
pub use request::{Notification, NotificationRequest};
