//! Order status-change notifications
//!
//! The order service hands events to a [`StatusChangeNotifier`] without
//! waiting. [`EventNotifier`] queues them on a bounded channel; a background
//! worker serializes each one and publishes it through an [`EventSink`].

pub mod notifier;
pub mod sink;

pub use notifier::{EventNotifier, EventWorker, event_channel};
pub use sink::{EventSink, LogSink, SinkError, WebhookSink};

use serde::{Deserialize, Serialize};

/// Payload published when an order moves to a different status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusChanged {
    pub order_id: i64,
    pub old_status: String,
    pub new_status: String,
}

/// Fire-and-forget hook invoked by the order service
///
/// Must return immediately and never fail the caller.
pub trait StatusChangeNotifier: Send + Sync {
    fn order_status_changed(&self, order_id: i64, old_status: &str, new_status: &str);
}

/// Notifier that drops every event
pub struct NoopNotifier;

impl StatusChangeNotifier for NoopNotifier {
    fn order_status_changed(&self, _order_id: i64, _old_status: &str, _new_status: &str) {}
}
