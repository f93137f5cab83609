//! Bounded queue between request handlers and the publishing worker

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use super::{EventSink, OrderStatusChanged, StatusChangeNotifier};

/// Sender side, held by the order service
#[derive(Clone)]
pub struct EventNotifier {
    tx: mpsc::Sender<OrderStatusChanged>,
}

impl EventNotifier {
    /// Queue an event; a full or closed queue drops it with a warning
    pub fn publish_order_status_changed(&self, order_id: i64, old_status: &str, new_status: &str) {
        let event = OrderStatusChanged {
            order_id,
            old_status: old_status.to_string(),
            new_status: new_status.to_string(),
        };
        match self.tx.try_send(event) {
            Ok(()) => debug!(order_id, "status change queued"),
            Err(mpsc::error::TrySendError::Full(event)) => {
                warn!(order_id = event.order_id, "event queue full, dropping status change")
            }
            Err(mpsc::error::TrySendError::Closed(event)) => {
                warn!(order_id = event.order_id, "event worker stopped, dropping status change")
            }
        }
    }
}

impl StatusChangeNotifier for EventNotifier {
    fn order_status_changed(&self, order_id: i64, old_status: &str, new_status: &str) {
        self.publish_order_status_changed(order_id, old_status, new_status);
    }
}

/// Receiver side: drains the queue into an [`EventSink`]
pub struct EventWorker {
    rx: mpsc::Receiver<OrderStatusChanged>,
    sink: Arc<dyn EventSink>,
    topic: String,
}

impl EventWorker {
    /// Run until every [`EventNotifier`] clone has been dropped
    pub async fn run(mut self) {
        while let Some(event) = self.rx.recv().await {
            self.deliver(&event).await;
        }
        debug!("event worker exiting");
    }

    async fn deliver(&self, event: &OrderStatusChanged) {
        let payload = match serde_json::to_vec(event) {
            Ok(payload) => payload,
            Err(e) => {
                error!(order_id = event.order_id, error = %e, "failed to serialize status change");
                return;
            }
        };
        let key = event.order_id.to_string();
        if let Err(e) = self.sink.publish(&self.topic, &key, &payload).await {
            error!(
                order_id = event.order_id,
                sink = self.sink.name(),
                error = %e,
                "failed to publish status change"
            );
        }
    }
}

/// Create a notifier/worker pair sharing a queue of `capacity` events
pub fn event_channel(
    capacity: usize,
    topic: impl Into<String>,
    sink: Arc<dyn EventSink>,
) -> (EventNotifier, EventWorker) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        EventNotifier { tx },
        EventWorker {
            rx,
            sink,
            topic: topic.into(),
        },
    )
}
