//! Workflow change events.
//!
//! Every successful mutating engine operation broadcasts one event so
//! in-process listeners (dashboards, cache invalidation) can react.
//! Delivery is best-effort: an absent or lagging subscriber never
//! affects the mutation itself.

use tokio::sync::broadcast;
use uuid::Uuid;

/// What changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowEventKind {
    ApplicationSubmitted,
    EmployeeAssigned,
    StatusChanged,
}

/// A single workflow change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowEvent {
    pub kind: WorkflowEventKind,
    pub application_id: Uuid,
}

/// Broadcast fan-out for workflow events.
#[derive(Debug, Clone)]
pub struct WorkflowEvents {
    tx: broadcast::Sender<WorkflowEvent>,
}

impl WorkflowEvents {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<WorkflowEvent> {
        self.tx.subscribe()
    }

    /// Publish an event. Succeeds even with no subscribers.
    pub fn publish(&self, event: WorkflowEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for WorkflowEvents {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_published_event() {
        let events = WorkflowEvents::default();
        let mut rx = events.subscribe();

        let event = WorkflowEvent {
            kind: WorkflowEventKind::ApplicationSubmitted,
            application_id: Uuid::new_v4(),
        };
        events.publish(event);

        assert_eq!(rx.recv().await.unwrap(), event);
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        let events = WorkflowEvents::default();
        events.publish(WorkflowEvent {
            kind: WorkflowEventKind::StatusChanged,
            application_id: Uuid::new_v4(),
        });
    }
}
