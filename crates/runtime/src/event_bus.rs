use crate::generation::Generation;

/// Minimal event type for traceability of the interactive flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub generation: Generation,
    pub kind: &'static str,
    pub message: String,
}

/// Bounded, append-only event log. Oldest events are dropped past `capacity`.
#[derive(Debug)]
pub struct EventBus {
    events: Vec<Event>,
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_capacity(256)
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn emit(&mut self, generation: Generation, kind: &'static str, message: impl Into<String>) {
        if self.events.len() == self.capacity {
            self.events.remove(0);
        }
        self.events.push(Event {
            generation,
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Event> + 'a {
        self.events.iter().filter(move |e| e.kind == kind)
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;
    use crate::generation::Generation;

    #[test]
    fn records_events_with_generation() {
        let mut bus = EventBus::new();
        bus.emit(Generation(2), "screen", "results");
        assert_eq!(bus.events().len(), 1);
        assert_eq!(bus.events()[0].generation, Generation(2));
        assert_eq!(bus.of_kind("screen").count(), 1);
        assert_eq!(bus.of_kind("request").count(), 0);
    }

    #[test]
    fn drops_oldest_past_capacity() {
        let mut bus = EventBus::with_capacity(2);
        bus.emit(Generation(0), "k", "a");
        bus.emit(Generation(1), "k", "b");
        bus.emit(Generation(2), "k", "c");
        let messages: Vec<&str> = bus.events().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["b", "c"]);
    }

    #[test]
    fn drain_clears_events() {
        let mut bus = EventBus::new();
        bus.emit(Generation(0), "k", "m");
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.events().is_empty());
    }
}
