//! Chart views for the health tour

pub mod projection;
mod tour_chart;

pub use projection::{
    defined_segments, project, MarkerPoint, SeriesEmphasis, VisualState, YearLabel,
    HEALTH_EXPENDITURE_DOMAIN, LIFE_EXPECTANCY_DOMAIN,
};
pub use tour_chart::{TourChartConfig, TourChartView};

use std::sync::Arc;

use parking_lot::RwLock;

use nv_core::SlideEngine;
use nv_data::DatasetIndex;

/// Context passed to views during rendering
#[derive(Clone)]
pub struct ViewerContext {
    /// The dataset, present once loading finished
    pub dataset: Arc<RwLock<Option<Arc<DatasetIndex>>>>,
    /// The slide state machine
    pub engine: Arc<SlideEngine>,
    /// Country line currently under the pointer
    pub hovered_series: Arc<RwLock<Option<String>>>,
}
