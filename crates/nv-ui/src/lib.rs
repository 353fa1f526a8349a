//! User interface panels for the health tour

pub mod pagination_panel;
pub mod story_panel;
pub mod theme;

pub use pagination_panel::{PaginationPanel, PaginationPanelConfig};
pub use story_panel::StoryPanel;
pub use theme::{accent_color, apply_theme, error_color, Theme};
