//! Pagination controls for the slide tour

use std::sync::Arc;

use egui::{Button, Color32, RichText, Ui, Vec2};

use nv_core::SlideEngine;

use crate::theme::accent_color;

/// Pagination panel configuration
#[derive(Debug, Clone)]
pub struct PaginationPanelConfig {
    /// Size of the numbered indicator buttons
    pub indicator_size: Vec2,
    /// Fill for the active indicator
    pub active_fill: Color32,
    /// Fill for everything else
    pub button_fill: Color32,
}

impl Default for PaginationPanelConfig {
    fn default() -> Self {
        Self {
            indicator_size: Vec2::new(28.0, 24.0),
            active_fill: accent_color().linear_multiply(0.55),
            button_fill: Color32::from_rgb(38, 42, 50),
        }
    }
}

/// Previous/next arrows plus one numbered indicator per slide.
/// All clicks go straight to the engine; the panel holds no state.
pub struct PaginationPanel {
    engine: Arc<SlideEngine>,
    config: PaginationPanelConfig,
}

impl PaginationPanel {
    pub fn new(engine: Arc<SlideEngine>) -> Self {
        Self {
            engine,
            config: PaginationPanelConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PaginationPanelConfig) -> Self {
        self.config = config;
        self
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        let context = match self.engine.context() {
            Some(context) => context,
            None => {
                ui.horizontal(|ui| {
                    ui.add_enabled(false, Button::new("◀ Previous"));
                    ui.label(RichText::new("Loading...").weak());
                    ui.add_enabled(false, Button::new("Next ▶"));
                });
                return;
            }
        };

        ui.horizontal(|ui| {
            ui.style_mut().spacing.button_padding = Vec2::new(8.0, 4.0);

            let previous = ui.add_enabled(
                !context.at_first,
                Button::new("◀ Previous").fill(self.config.button_fill),
            );
            if previous.on_hover_text("Previous slide (Left Arrow)").clicked() {
                self.engine.previous();
            }

            for index in 1..=context.slide_count {
                let active = index == context.index;
                let fill = if active {
                    self.config.active_fill
                } else {
                    self.config.button_fill
                };
                let indicator = ui.add_sized(
                    self.config.indicator_size,
                    Button::new(RichText::new(index.to_string()).size(14.0)).fill(fill),
                );
                if indicator
                    .on_hover_text(format!("Go to slide {}", index))
                    .clicked()
                {
                    self.engine.go_to(index);
                }
            }

            let next = ui.add_enabled(
                !context.at_last,
                Button::new("Next ▶").fill(self.config.button_fill),
            );
            if next.on_hover_text("Next slide (Right Arrow)").clicked() {
                self.engine.next();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    RichText::new(format!("Slide {} of {}", context.index, context.slide_count))
                        .weak(),
                );
            });
        });
    }
}
