//! Slide text and the country comparison picker

use std::sync::Arc;

use egui::{ComboBox, RichText, Ui};
use parking_lot::RwLock;

use nv_core::SlideEngine;
use nv_data::{DatasetIndex, REFERENCE_COUNTRY};

/// Shows the current slide's title and body and, on the interactive
/// slide, the country picker
pub struct StoryPanel {
    engine: Arc<SlideEngine>,
    dataset: Arc<RwLock<Option<Arc<DatasetIndex>>>>,
    /// Country line under the pointer, written by the chart
    hovered_series: Arc<RwLock<Option<String>>>,
}

impl StoryPanel {
    pub fn new(
        engine: Arc<SlideEngine>,
        dataset: Arc<RwLock<Option<Arc<DatasetIndex>>>>,
        hovered_series: Arc<RwLock<Option<String>>>,
    ) -> Self {
        Self {
            engine,
            dataset,
            hovered_series,
        }
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        let context = match self.engine.context() {
            Some(context) => context,
            None => return,
        };
        let slide = match self.engine.deck().get(context.index) {
            Some(slide) => slide,
            None => return,
        };

        ui.heading(&slide.title);
        ui.add_space(4.0);
        ui.label(RichText::new(&slide.body).size(14.5));

        // Gray context lines are unlabeled, so name the hovered one
        if !slide.interactive {
            if let Some(hovered) = self.hovered_series.read().clone() {
                ui.add_space(4.0);
                ui.label(RichText::new(format!("Highlighted: {}", hovered)).weak().italics());
            }
        }

        if slide.interactive {
            ui.add_space(8.0);
            let dataset = self.dataset.read();
            let index = match dataset.as_ref() {
                Some(index) => index,
                None => return,
            };

            ui.horizontal(|ui| {
                ui.label("Compare with:");
                let selected_text = context
                    .selected_country
                    .clone()
                    .unwrap_or_else(|| "Select a country".to_string());
                ComboBox::from_id_source("country_picker")
                    .width(220.0)
                    .selected_text(selected_text)
                    .show_ui(ui, |ui| {
                        for country in index.list_countries(&[REFERENCE_COUNTRY]) {
                            let checked = context.selected_country.as_deref() == Some(country);
                            if ui.selectable_label(checked, country).clicked() {
                                self.engine.select_country(country);
                            }
                        }
                    });
            });
        }
    }
}
