//! The tour chart
//!
//! Translates the projected visual state into plot primitives. All
//! styling and filtering decisions happen in the projection; this view
//! only draws what it is given, plus pointer feedback.

use egui::{Align2, Color32, Ui};
use egui_plot::{Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Text};
use tracing::debug;

use nv_core::navigation::SlideContext;

use crate::projection::{
    self, MarkerPoint, SeriesEmphasis, VisualState, HEALTH_EXPENDITURE_DOMAIN,
    LIFE_EXPECTANCY_DOMAIN,
};
use crate::ViewerContext;

/// Configuration for the tour chart
#[derive(Debug, Clone)]
pub struct TourChartConfig {
    /// Stroke width for reference and active lines
    pub emphasis_width: f32,
    /// Stroke width for context lines
    pub context_width: f32,
    /// Marker radius
    pub point_radius: f32,
    pub show_grid: bool,
    /// Hover pick distance as a fraction of the axis spans
    pub hover_radius: f64,
    pub reference_color: Color32,
    pub active_color: Color32,
    pub inactive_color: Color32,
    pub label_color: Color32,
    pub annotation_color: Color32,
}

impl Default for TourChartConfig {
    fn default() -> Self {
        Self {
            emphasis_width: 3.0,
            context_width: 2.0,
            point_radius: 3.5,
            show_grid: true,
            hover_radius: 0.02,
            reference_color: Color32::from_rgb(31, 119, 180),
            active_color: Color32::from_rgb(255, 127, 14),
            inactive_color: Color32::from_gray(120),
            label_color: Color32::from_gray(170),
            annotation_color: Color32::from_gray(210),
        }
    }
}

/// Chart view for the narrative tour
pub struct TourChartView {
    config: TourChartConfig,
    cached_state: Option<VisualState>,
    last_projected: Option<SlideContext>,
}

impl TourChartView {
    pub fn new() -> Self {
        Self {
            config: TourChartConfig::default(),
            cached_state: None,
            last_projected: None,
        }
    }

    pub fn with_config(mut self, config: TourChartConfig) -> Self {
        self.config = config;
        self
    }

    /// Recompute the projection when the slide or selection changed.
    /// Returns false while there is nothing to draw.
    fn refresh(&mut self, ctx: &ViewerContext) -> bool {
        let slide_context = match ctx.engine.context() {
            Some(context) => context,
            None => {
                self.cached_state = None;
                self.last_projected = None;
                return false;
            }
        };
        if self.cached_state.is_some() && self.last_projected.as_ref() == Some(&slide_context) {
            return true;
        }

        let dataset = ctx.dataset.read();
        let index = match dataset.as_ref() {
            Some(index) => index,
            None => return false,
        };
        let slide = match ctx.engine.deck().get(slide_context.index) {
            Some(slide) => slide,
            None => return false,
        };

        debug!(
            "Projecting slide {} (selection {:?})",
            slide_context.index, slide_context.selected_country
        );
        self.cached_state = Some(projection::project(
            index,
            slide,
            slide_context.selected_country.as_deref(),
        ));
        self.last_projected = Some(slide_context);
        true
    }

    pub fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        if !self.refresh(ctx) {
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new("No data to display").weak());
            });
            return;
        }
        let visual = match self.cached_state.as_ref() {
            Some(visual) => visual,
            None => return,
        };
        let config = &self.config;

        let plot = Plot::new("tour_chart")
            .show_grid(config.show_grid)
            .x_axis_label("Health Expenditure Per Capita (PPP US Dollars)")
            .y_axis_label("Life Expectancy (Years)")
            // Framing is fixed; the story depends on lines growing into
            // constant space
            .auto_bounds(egui::Vec2b::new(false, false))
            .include_x(HEALTH_EXPENDITURE_DOMAIN.0)
            .include_x(HEALTH_EXPENDITURE_DOMAIN.1)
            .include_y(LIFE_EXPECTANCY_DOMAIN.0)
            .include_y(LIFE_EXPECTANCY_DOMAIN.1)
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_boxed_zoom(false);

        plot.show(ui, |plot_ui| {
            let pointer = plot_ui.pointer_coordinate();

            // Hovering a context line promotes it while the pointer stays
            let hovered = if visual.country_picker_visible {
                None
            } else {
                nearest_context_series(visual, config, pointer.as_ref())
            };
            *ctx.hovered_series.write() = hovered.clone();

            for (country, records) in &visual.visible_series {
                let mut style = visual.line_style(country);
                if style == SeriesEmphasis::Inactive && hovered.as_deref() == Some(country.as_str())
                {
                    style = SeriesEmphasis::Active;
                }
                let (color, width) = match style {
                    SeriesEmphasis::Reference => (config.reference_color, config.emphasis_width),
                    SeriesEmphasis::Active => (config.active_color, config.emphasis_width),
                    SeriesEmphasis::Inactive => (config.inactive_color, config.context_width),
                    SeriesEmphasis::Invisible => continue,
                };

                let group = records
                    .first()
                    .map(|record| record.location_code.clone())
                    .unwrap_or_default();
                for segment in projection::defined_segments(records) {
                    plot_ui.line(
                        Line::new(PlotPoints::new(segment))
                            .color(color)
                            .width(width)
                            .name(&group),
                    );
                }
            }

            if !visual.markers.is_empty() {
                let mut reference_points = Vec::new();
                let mut selected_points = Vec::new();
                for marker in &visual.markers {
                    if visual.line_style(&marker.country) == SeriesEmphasis::Reference {
                        reference_points.push(marker.position());
                    } else {
                        selected_points.push(marker.position());
                    }
                }
                if !reference_points.is_empty() {
                    plot_ui.points(
                        Points::new(reference_points)
                            .color(config.reference_color)
                            .radius(config.point_radius)
                            .shape(MarkerShape::Circle),
                    );
                }
                if !selected_points.is_empty() {
                    plot_ui.points(
                        Points::new(selected_points)
                            .color(config.active_color)
                            .radius(config.point_radius)
                            .shape(MarkerShape::Circle),
                    );
                }
            }

            for label in &visual.year_labels {
                let anchor = if label.dx >= 0.0 {
                    Align2::LEFT_CENTER
                } else {
                    Align2::RIGHT_CENTER
                };
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(label.x + label.dx, label.y),
                        egui::RichText::new(label.year.to_string())
                            .color(config.label_color)
                            .text_style(egui::TextStyle::Small),
                    )
                    .anchor(anchor),
                );
            }

            if let Some(annotation) = &visual.annotation {
                let label_x = annotation.x + annotation.dx;
                let label_y = annotation.y + annotation.dy;
                plot_ui.line(
                    Line::new(PlotPoints::new(vec![
                        [annotation.x, annotation.y],
                        [label_x, label_y],
                    ]))
                    .color(config.annotation_color)
                    .width(1.0)
                    .style(egui_plot::LineStyle::Dashed { length: 10.0 }),
                );
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(label_x, label_y + 0.3),
                        egui::RichText::new(&annotation.title)
                            .strong()
                            .color(config.annotation_color),
                    )
                    .anchor(Align2::CENTER_BOTTOM),
                );
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(label_x, label_y),
                        egui::RichText::new(&annotation.body)
                            .color(config.annotation_color)
                            .text_style(egui::TextStyle::Small),
                    )
                    .anchor(Align2::CENTER_TOP),
                );
            }

            // Marker under the pointer gets a highlight and a tooltip
            if let Some(pointer) = pointer {
                if let Some(marker) = nearest_marker(visual, config, &pointer) {
                    plot_ui.points(
                        Points::new(vec![marker.position()])
                            .color(config.active_color.gamma_multiply(1.5))
                            .radius(config.point_radius * 2.0)
                            .shape(MarkerShape::Circle),
                    );
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(marker.health_expenditure, marker.life_expectancy),
                            egui::RichText::new(marker.tooltip_text())
                                .color(Color32::WHITE)
                                .text_style(egui::TextStyle::Small),
                        )
                        .anchor(Align2::LEFT_BOTTOM),
                    );
                }
            }
        });
    }
}

impl Default for TourChartView {
    fn default() -> Self {
        Self::new()
    }
}

/// Distance between a data point and the pointer, with both axes
/// normalized to their domain spans
fn normalized_distance(x: f64, y: f64, pointer: &PlotPoint) -> f64 {
    let dx = (x - pointer.x) / (HEALTH_EXPENDITURE_DOMAIN.1 - HEALTH_EXPENDITURE_DOMAIN.0);
    let dy = (y - pointer.y) / (LIFE_EXPECTANCY_DOMAIN.1 - LIFE_EXPECTANCY_DOMAIN.0);
    (dx * dx + dy * dy).sqrt()
}

fn nearest_context_series(
    visual: &VisualState,
    config: &TourChartConfig,
    pointer: Option<&PlotPoint>,
) -> Option<String> {
    let pointer = pointer?;
    let mut best_dist = f64::INFINITY;
    let mut best: Option<&str> = None;
    for (country, records) in &visual.visible_series {
        if visual.line_style(country) != SeriesEmphasis::Inactive {
            continue;
        }
        for record in records {
            let dist =
                normalized_distance(record.health_expenditure, record.life_expectancy, pointer);
            if dist < best_dist {
                best_dist = dist;
                best = Some(country);
            }
        }
    }
    if best_dist <= config.hover_radius {
        best.map(|country| country.to_string())
    } else {
        None
    }
}

fn nearest_marker<'a>(
    visual: &'a VisualState,
    config: &TourChartConfig,
    pointer: &PlotPoint,
) -> Option<&'a MarkerPoint> {
    let mut best_dist = f64::INFINITY;
    let mut best: Option<&MarkerPoint> = None;
    for marker in &visual.markers {
        let dist = normalized_distance(marker.health_expenditure, marker.life_expectancy, pointer);
        if dist < best_dist {
            best_dist = dist;
            best = Some(marker);
        }
    }
    if best_dist <= config.hover_radius {
        best
    } else {
        None
    }
}
