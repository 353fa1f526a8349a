//! Core state management for the health tour
//!
//! This crate provides the slide deck, the slide state machine, the
//! event bus, and the application state that ties them together.

pub mod events;
pub mod navigation;
pub mod state;
pub mod story;

// Re-export commonly used types
pub use events::EventBus;
pub use navigation::{SlideContext, SlideEngine};
pub use state::TourState;
pub use story::{Annotation, SlideDeck, SlideDefinition};
