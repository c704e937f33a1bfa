//! Transient user-facing messages ("snackbars").

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::api::ApiError;

pub(crate) const LOGIN_REQUIRED: &str = "Login to add an item to the Cart";
pub(crate) const ALREADY_IN_CART: &str =
    "Item already in cart. Use the cart sidebar to update quantity or remove item.";
pub(crate) const BACKEND_UNREACHABLE: &str =
    "Something went wrong. Check that the backend is running, reachable and returns valid JSON.";
pub(crate) const CART_UNAVAILABLE: &str =
    "Could not fetch cart details. Check that the backend is running, reachable and returns valid JSON.";
pub(crate) const REGISTERED: &str = "Registered successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Somewhere to show notifications. Implemented by the front end.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Forwards notifications to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, notification: Notification) {
        let Notification { severity, message } = notification;
        match severity {
            Severity::Success => log::info!("{message}"),
            Severity::Warning => log::warn!("{message}"),
            Severity::Error => log::error!("{message}"),
        }
    }
}

/// Buffers notifications until the front end drains them.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: Mutex<Vec<Notification>>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn is_empty(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl NotificationSink for NotificationQueue {
    fn notify(&self, notification: Notification) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

/// The message to show for a failed request: the server's own words for a 400 or 401,
/// otherwise `fallback`.
pub(crate) fn failure_message<'a>(error: &'a ApiError, fallback: &'a str) -> &'a str {
    match error {
        ApiError::Unauthorized { message } | ApiError::Rejected { status: 400, message } => {
            message.as_str()
        }
        _ => fallback,
    }
}
