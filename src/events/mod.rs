use tokio::sync::broadcast;

/// Change notification emitted after a successful local-store write.
///
/// Observers re-read the store when they receive an event for the table they
/// care about; the event itself carries no row data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    GoalsChanged,
    ContributionsChanged { goal_id: String },
    BudgetsChanged,
    CategoriesChanged,
    TransactionsChanged,
    UsersChanged,
    SessionChanged,
}

/// Lightweight broadcast bus that fans out store-change events to observers.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: StoreEvent) {
        // Lagging listeners are ignored to avoid blocking producers.
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();

        bus.publish(StoreEvent::GoalsChanged);
        bus.publish(StoreEvent::ContributionsChanged {
            goal_id: "g1".to_string(),
        });

        assert_eq!(rx.recv().await.unwrap(), StoreEvent::GoalsChanged);
        assert_eq!(
            rx.recv().await.unwrap(),
            StoreEvent::ContributionsChanged {
                goal_id: "g1".to_string()
            }
        );
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let bus = EventBus::new(8);
        bus.publish(StoreEvent::BudgetsChanged);
    }
}
