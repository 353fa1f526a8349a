//! Event system for decoupled communication between components

use std::any::{Any, TypeId};
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::Mutex;

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// System-wide event bus.
///
/// Handlers run synchronously on the publishing thread and hold the
/// handler table locked while they run, so a handler must not publish.
pub struct EventBus {
    handlers: Arc<Mutex<AHashMap<TypeId, Vec<Box<dyn EventHandler>>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
        }
    }

    /// Subscribe a handler to events of type E
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        let mut handlers = self.handlers.lock();
        handlers.entry(TypeId::of::<E>()).or_default().push(handler);
    }

    /// Publish an event to all handlers subscribed to its type
    pub fn publish<E: Event>(&self, event: E) {
        let mut handlers = self.handlers.lock();
        if let Some(handler_list) = handlers.get_mut(&TypeId::of::<E>()) {
            for handler in handler_list {
                handler.handle(&event);
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Events published by the slide engine and application state
pub mod events {
    use super::Event;

    /// A slide transition happened
    #[derive(Debug, Clone)]
    pub struct PaginationChanged {
        /// 1-based index of the slide now showing
        pub current: usize,
        pub slide_count: usize,
        pub at_first: bool,
        pub at_last: bool,
    }

    /// The slide title and body to display changed
    #[derive(Debug, Clone)]
    pub struct SlideContentChanged {
        pub index: usize,
        pub title: String,
        pub body: String,
    }

    /// The comparison country picked on the interactive slide changed
    #[derive(Debug, Clone)]
    pub struct CountrySelectionChanged {
        pub country: String,
    }

    /// A dataset finished loading and indexing
    #[derive(Debug, Clone)]
    pub struct DatasetLoaded {
        pub source_name: String,
        pub record_count: usize,
        pub country_count: usize,
    }

    /// A dataset failed to load or index
    #[derive(Debug, Clone)]
    pub struct DatasetError {
        pub source_name: String,
        pub error: String,
    }

    macro_rules! impl_event {
        ($($event_type:ty),*) => {
            $(
                impl Event for $event_type {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        };
    }

    impl_event!(
        PaginationChanged,
        SlideContentChanged,
        CountrySelectionChanged,
        DatasetLoaded,
        DatasetError
    );
}

/// Helper for creating event handlers from closures
pub struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_reaches_subscriber() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        bus.subscribe::<events::PaginationChanged>(handler_from_fn(move |event| {
            if let Some(e) = event.as_any().downcast_ref::<events::PaginationChanged>() {
                sink.lock().push(e.current);
            }
        }));

        bus.publish(events::PaginationChanged {
            current: 2,
            slide_count: 4,
            at_first: false,
            at_last: false,
        });
        bus.publish(events::PaginationChanged {
            current: 3,
            slide_count: 4,
            at_first: false,
            at_last: false,
        });

        assert_eq!(*seen.lock(), vec![2, 3]);
    }

    #[test]
    fn test_events_are_isolated_by_type() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(0usize));

        let sink = seen.clone();
        bus.subscribe::<events::CountrySelectionChanged>(handler_from_fn(move |_| {
            *sink.lock() += 1;
        }));

        bus.publish(events::PaginationChanged {
            current: 1,
            slide_count: 4,
            at_first: true,
            at_last: false,
        });

        assert_eq!(*seen.lock(), 0);

        bus.publish(events::CountrySelectionChanged {
            country: "Germany".to_string(),
        });

        assert_eq!(*seen.lock(), 1);
    }

    #[test]
    fn test_multiple_subscribers() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(0usize));

        for _ in 0..3 {
            let sink = seen.clone();
            bus.subscribe::<events::DatasetLoaded>(handler_from_fn(move |_| {
                *sink.lock() += 1;
            }));
        }

        bus.publish(events::DatasetLoaded {
            source_name: "test.csv".to_string(),
            record_count: 10,
            country_count: 2,
        });

        assert_eq!(*seen.lock(), 3);
    }
}
