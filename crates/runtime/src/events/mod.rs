//! Topic-based event bus for runtime events.
//!
//! Events are published to specific topics so consumers subscribe only to
//! what they need: HUD layers to `Magic`, quest journals to `Quest`,
//! session tooling to `Session`.

use game_core::{MagicEvent, QuestEvent, Round};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Topics for event routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Effect lifecycle and per-round applications.
    Magic,
    /// Task triggers, popups, quest completion.
    Quest,
    /// Round advancement and persistence.
    Session,
}

/// Session-level happenings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    RoundAdvanced { round: Round },
    QuestStarted { name: String },
    GameSaved { slot: String },
    GameLoaded { slot: String },
}

/// Event wrapper that carries the topic and typed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Magic(MagicEvent),
    Quest(QuestEvent),
    Session(SessionEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Magic(_) => Topic::Magic,
            Event::Quest(_) => Topic::Quest,
            Event::Session(_) => Topic::Session,
        }
    }
}

/// Topic-based event bus.
///
/// Publishing never blocks; events published with no live subscribers are
/// dropped, which is the correct behavior for an observability channel.
#[derive(Clone)]
pub struct EventBus {
    magic: broadcast::Sender<Event>,
    quest: broadcast::Sender<Event>,
    session: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity per topic.
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with the given capacity per topic.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            magic: broadcast::channel(capacity).0,
            quest: broadcast::channel(capacity).0,
            session: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Magic => &self.magic,
            Topic::Quest => &self.quest,
            Topic::Session => &self.session,
        }
    }

    /// Subscribe to events from a specific topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Publish an event to its topic.
    ///
    /// Returns the number of subscribers that received it.
    pub fn publish(&self, event: Event) -> usize {
        let sender = self.sender(event.topic());
        sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::new();
        let mut session_rx = bus.subscribe(Topic::Session);
        let mut quest_rx = bus.subscribe(Topic::Quest);

        bus.publish(Event::Session(SessionEvent::RoundAdvanced { round: Round(1) }));

        let event = session_rx.recv().await.unwrap();
        assert!(matches!(event, Event::Session(SessionEvent::RoundAdvanced { .. })));
        assert!(quest_rx.try_recv().is_err());
    }

    #[test]
    fn publish_without_subscribers_is_dropped() {
        let bus = EventBus::new();
        let delivered =
            bus.publish(Event::Session(SessionEvent::RoundAdvanced { round: Round(1) }));
        assert_eq!(delivered, 0);
    }
}
