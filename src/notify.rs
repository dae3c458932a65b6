// =============================================================================
// NOTIFY MODULE
// =============================================================================
// Turns cart events into toast notifications and hands them to sinks.
//
// Delivery is fire-and-forget: a sink has no return value and nothing it does
// can change cart state.
// =============================================================================

use std::sync::{Mutex, PoisonError};

use crate::events::CartEvent;
use crate::models::{format_price, Notification, NotificationKind};

/// Receiver for user-facing notifications
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: &Notification);
}

impl Notification {
    /// The toast a cart event should produce, if any.
    ///
    /// Only adds and removals are announced; quantity edits, clears and
    /// panel toggles stay silent.
    pub fn from_cart_event(event: &CartEvent) -> Option<Notification> {
        match event {
            CartEvent::LineAdded {
                product_name,
                color,
                unit_price,
                ..
            } => Some(Notification::success(
                format!("{} added to cart!", product_name),
                format!("{} • {}", color, format_price(*unit_price)),
            )),
            CartEvent::QuantityIncremented {
                product_name,
                color,
                quantity,
                ..
            } => Some(Notification::success(
                format!("Added another {} to cart", product_name),
                format!("{} • Quantity: {}", color, quantity),
            )),
            CartEvent::LineRemoved {
                product_name,
                color,
                ..
            } => Some(Notification::error(
                format!("{} removed from cart", product_name),
                color.clone(),
            )),
            CartEvent::QuantityUpdated { .. }
            | CartEvent::Cleared { .. }
            | CartEvent::PanelToggled { .. } => None,
        }
    }
}

// -----------------------------------------------------------------------------
// TRACING SINK
// -----------------------------------------------------------------------------
/// Writes notifications to the log. Used by the headless host.
#[derive(Debug, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: &Notification) {
        match notification.kind {
            NotificationKind::Success => tracing::info!(
                title = %notification.title,
                description = %notification.description,
                "Notification"
            ),
            NotificationKind::Error => tracing::warn!(
                title = %notification.title,
                description = %notification.description,
                "Notification"
            ),
        }
    }
}

// -----------------------------------------------------------------------------
// RECORDING SINK
// -----------------------------------------------------------------------------
/// Keeps every notification it receives, oldest first
#[derive(Debug, Default)]
pub struct RecordingSink {
    received: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything recorded so far
    pub fn drain(&self) -> Vec<Notification> {
        let mut received = self.received.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *received)
    }

    pub fn len(&self) -> usize {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: &Notification) {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
    }
}
