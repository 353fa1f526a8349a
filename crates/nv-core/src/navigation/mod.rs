//! Slide navigation

mod engine;

pub use engine::SlideEngine;

/// Snapshot of the navigation state handed to views each frame
#[derive(Debug, Clone, PartialEq)]
pub struct SlideContext {
    /// 1-based index of the current slide
    pub index: usize,
    pub slide_count: usize,
    /// Comparison country picked on the interactive slide
    pub selected_country: Option<String>,
    pub at_first: bool,
    pub at_last: bool,
}
