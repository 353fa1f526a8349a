//! Main application entry point

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use eframe::egui::{self, Context, RichText, Ui};
use parking_lot::RwLock;
use tracing::{error, info, warn};

use nv_core::events::{events, handler_from_fn};
use nv_core::{SlideDeck, TourState};
use nv_data::{CsvSource, DataConfig, RecordSource};
use nv_ui::{PaginationPanel, StoryPanel, Theme};
use nv_views::{TourChartView, ViewerContext};

mod demo;

/// Optional JSON config next to the binary pointing at the dataset
const CONFIG_PATH: &str = "healthtour.json";

/// Main application state
struct TourApp {
    /// Shared core state
    state: Arc<TourState>,

    /// Context handed to the chart view
    viewer_context: ViewerContext,

    /// The chart
    chart: TourChartView,

    /// Pagination controls
    pagination: PaginationPanel,

    /// Slide text and country picker
    story: StoryPanel,

    /// Last load failure, shown on the error screen
    load_error: Arc<RwLock<Option<String>>>,

    /// Tokio runtime driving dataset loads
    runtime: tokio::runtime::Runtime,
}

impl TourApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        nv_ui::apply_theme(&cc.egui_ctx, &Theme::default());

        let runtime = tokio::runtime::Runtime::new().unwrap();
        let state = Arc::new(TourState::new(SlideDeck::standard()));
        let load_error: Arc<RwLock<Option<String>>> = Arc::new(RwLock::new(None));

        // Log slide transitions
        state
            .event_bus
            .subscribe::<events::SlideContentChanged>(handler_from_fn(|event| {
                if let Some(changed) = event
                    .as_any()
                    .downcast_ref::<events::SlideContentChanged>()
                {
                    info!("Slide {}: {}", changed.index, changed.title);
                }
            }));

        // Surface load failures on the error screen
        let error_slot = load_error.clone();
        state
            .event_bus
            .subscribe::<events::DatasetError>(handler_from_fn(move |event| {
                if let Some(failed) = event.as_any().downcast_ref::<events::DatasetError>() {
                    *error_slot.write() = Some(format!("{}: {}", failed.source_name, failed.error));
                }
            }));

        let viewer_context = ViewerContext {
            dataset: state.dataset.clone(),
            engine: state.engine.clone(),
            hovered_series: Arc::new(RwLock::new(None)),
        };

        let chart = TourChartView::new();
        let pagination = PaginationPanel::new(state.engine.clone());
        let story = StoryPanel::new(
            state.engine.clone(),
            state.dataset.clone(),
            viewer_context.hovered_series.clone(),
        );

        let app = Self {
            state,
            viewer_context,
            chart,
            pagination,
            story,
            load_error,
            runtime,
        };
        app.spawn_load(app.initial_source());
        app
    }

    /// The configured CSV when it exists, otherwise the built-in demo
    fn initial_source(&self) -> Arc<dyn RecordSource> {
        let config = DataConfig::load_or_default(Path::new(CONFIG_PATH));
        if config.path.exists() {
            Arc::new(CsvSource::from_config(&config))
        } else {
            warn!(
                "Dataset {} not found, using synthetic demo data",
                config.path.display()
            );
            Arc::new(demo::DemoSource::new())
        }
    }

    /// Load a source in the background; the UI notices readiness
    /// through the shared state
    fn spawn_load(&self, source: Arc<dyn RecordSource>) {
        *self.load_error.write() = None;
        let state = self.state.clone();
        self.runtime.spawn(async move {
            let name = source.source_name().to_string();
            if let Err(e) = state.load_source(source).await {
                error!("Failed to load dataset from {}: {}", name, e);
                state.event_bus.publish(events::DatasetError {
                    source_name: name,
                    error: e.to_string(),
                });
            }
        });
    }

    fn handle_menu(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open CSV...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("CSV Files", &["csv"])
                            .pick_file()
                        {
                            self.spawn_load(Arc::new(CsvSource::new(path)));
                        }
                        ui.close_menu();
                    }

                    if ui.button("Load Demo Data").clicked() {
                        self.spawn_load(Arc::new(demo::DemoSource::new()));
                        ui.close_menu();
                    }
                });
            });
        });
    }

    /// Shown in the chart area until a dataset is ready
    fn show_loading_screen(&self, ui: &mut Ui) {
        let error = self.load_error.read().clone();
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.35);
            match error {
                Some(message) => {
                    ui.heading(
                        RichText::new("Could not load the dataset").color(nv_ui::error_color()),
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(message).weak());
                    ui.add_space(8.0);
                    ui.label("Use File > Open CSV... to pick a file, or File > Load Demo Data.");
                }
                None => {
                    ui.spinner();
                    ui.add_space(8.0);
                    ui.label("Loading health data...");
                }
            }
        });
    }
}

impl eframe::App for TourApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        // The tour starts on the first slide once a dataset is ready
        if self.state.is_ready() && self.state.engine.context().is_none() {
            self.state.engine.go_to(1);
        }

        // Keyboard navigation
        ctx.input(|input| {
            if input.key_pressed(egui::Key::ArrowLeft) {
                self.state.engine.previous();
            }
            if input.key_pressed(egui::Key::ArrowRight) {
                self.state.engine.next();
            }
        });

        self.handle_menu(ctx);

        egui::TopBottomPanel::top("story_panel").show(ctx, |ui| {
            ui.add_space(6.0);
            self.story.ui(ui);
            ui.add_space(6.0);
        });

        egui::TopBottomPanel::bottom("pagination_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            self.pagination.ui(ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.is_ready() {
                self.chart.ui(&self.viewer_context, ui);
            } else {
                self.show_loading_screen(ui);
            }
        });

        // Keep polling while the dataset loads in the background
        if !self.state.is_ready() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting the health expenditure tour");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([800.0, 600.0]),
        default_theme: eframe::Theme::Dark,
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        "How the US Compares: Health Spending and Life Expectancy",
        options,
        Box::new(|cc| Box::new(TourApp::new(cc))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
