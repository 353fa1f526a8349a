//! The slide state machine

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use super::SlideContext;
use crate::events::{events, EventBus};
use crate::story::SlideDeck;

#[derive(Debug, Clone)]
struct NavigationState {
    /// Current slide, 1-based; None until the tour starts
    current: Option<usize>,
    /// Comparison country picked on the interactive slide
    selected_country: Option<String>,
    /// Countries that may be selected, set once the dataset is indexed
    countries: Vec<String>,
    /// Whether a dataset is ready
    ready: bool,
}

/// Owns the only mutable navigation state in the system.
///
/// Requests that cannot be honored (out-of-range slide, unknown or
/// non-selectable country, no dataset yet) are silent no-ops: nothing
/// changes and nothing is published.
pub struct SlideEngine {
    deck: Arc<SlideDeck>,
    state: Arc<RwLock<NavigationState>>,
    event_bus: Arc<EventBus>,
}

impl SlideEngine {
    pub fn new(deck: Arc<SlideDeck>, event_bus: Arc<EventBus>) -> Self {
        Self {
            deck,
            state: Arc::new(RwLock::new(NavigationState {
                current: None,
                selected_country: None,
                countries: Vec::new(),
                ready: false,
            })),
            event_bus,
        }
    }

    pub fn deck(&self) -> &SlideDeck {
        &self.deck
    }

    /// Whether a dataset has been supplied
    pub fn is_ready(&self) -> bool {
        self.state.read().ready
    }

    /// Supply the selectable countries once a dataset index is built.
    /// Until this runs, every transition request is ignored. Loading a
    /// new dataset starts the tour over.
    pub fn update_countries(&self, countries: Vec<String>) {
        let mut state = self.state.write();
        state.countries = countries;
        state.ready = true;
        state.current = None;
        state.selected_country = None;
    }

    /// Jump to a slide. Ignored when the target is out of range, is
    /// already current, or no dataset is ready.
    pub fn go_to(&self, index: usize) {
        let context = {
            let mut state = self.state.write();
            if !state.ready {
                debug!("Ignoring slide request {} before a dataset is ready", index);
                return;
            }
            if index < 1 || index > self.deck.len() {
                debug!("Ignoring out-of-range slide request {}", index);
                return;
            }
            if state.current == Some(index) {
                return;
            }
            state.current = Some(index);
            // Every slide transition clears the selection
            state.selected_country = None;
            SlideContext {
                index,
                slide_count: self.deck.len(),
                selected_country: None,
                at_first: index == 1,
                at_last: index == self.deck.len(),
            }
        };

        debug!("Showing slide {}/{}", context.index, context.slide_count);
        self.event_bus.publish(events::PaginationChanged {
            current: context.index,
            slide_count: context.slide_count,
            at_first: context.at_first,
            at_last: context.at_last,
        });
        if let Some(slide) = self.deck.get(context.index) {
            self.event_bus.publish(events::SlideContentChanged {
                index: slide.index,
                title: slide.title.clone(),
                body: slide.body.clone(),
            });
        }
    }

    /// Advance one slide; ignored on the last slide
    pub fn next(&self) {
        let current = self.state.read().current;
        if let Some(current) = current {
            if current < self.deck.len() {
                self.go_to(current + 1);
            }
        }
    }

    /// Go back one slide; ignored on the first slide
    pub fn previous(&self) {
        let current = self.state.read().current;
        if let Some(current) = current {
            if current > 1 {
                self.go_to(current - 1);
            }
        }
    }

    /// Pick a comparison country. Only honored on an interactive slide,
    /// and only for countries in the selectable list.
    pub fn select_country(&self, name: &str) {
        {
            let mut state = self.state.write();
            let current = match state.current {
                Some(current) => current,
                None => return,
            };
            let slide = match self.deck.get(current) {
                Some(slide) => slide,
                None => return,
            };
            if !slide.interactive {
                debug!("Ignoring country selection on non-interactive slide {}", current);
                return;
            }
            if !state.countries.iter().any(|country| country == name) {
                debug!("Ignoring selection of non-selectable country {:?}", name);
                return;
            }
            if state.selected_country.as_deref() == Some(name) {
                return;
            }
            state.selected_country = Some(name.to_string());
        }

        debug!("Comparing against {}", name);
        self.event_bus.publish(events::CountrySelectionChanged {
            country: name.to_string(),
        });
    }

    /// Snapshot of the current navigation state, None until the tour
    /// has started
    pub fn context(&self) -> Option<SlideContext> {
        let state = self.state.read();
        self.snapshot(&state)
    }

    fn snapshot(&self, state: &NavigationState) -> Option<SlideContext> {
        state.current.map(|index| SlideContext {
            index,
            slide_count: self.deck.len(),
            selected_country: state.selected_country.clone(),
            at_first: index == 1,
            at_last: index == self.deck.len(),
        })
    }
}
