//! Shared application state

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use nv_data::{DataError, DatasetIndex, RecordSource, REFERENCE_COUNTRY};

use crate::events::{events, EventBus};
use crate::navigation::SlideEngine;
use crate::story::SlideDeck;

/// Everything the application mutates lives here explicitly and is
/// handed down to the views; there is no ambient module state.
pub struct TourState {
    /// The slide state machine
    pub engine: Arc<SlideEngine>,
    /// The event bus
    pub event_bus: Arc<EventBus>,
    /// The dataset, present once a load succeeds
    pub dataset: Arc<RwLock<Option<Arc<DatasetIndex>>>>,
}

impl TourState {
    /// Create the application state around a slide deck
    pub fn new(deck: SlideDeck) -> Self {
        let event_bus = Arc::new(EventBus::new());
        let engine = Arc::new(SlideEngine::new(Arc::new(deck), event_bus.clone()));
        Self {
            engine,
            event_bus,
            dataset: Arc::new(RwLock::new(None)),
        }
    }

    /// Load a record source, build the dataset index, and arm the
    /// engine with the selectable countries
    pub async fn load_source(&self, source: Arc<dyn RecordSource>) -> Result<(), DataError> {
        let records = source.load().await?;
        let index = DatasetIndex::build(records)?;

        let (first_year, last_year) = index.year_range();
        info!(
            "Indexed {} records for {} countries ({}..={})",
            index.record_count(),
            index.len(),
            first_year,
            last_year
        );

        let countries: Vec<String> = index
            .list_countries(&[REFERENCE_COUNTRY])
            .iter()
            .map(|country| country.to_string())
            .collect();
        let record_count = index.record_count();
        let country_count = index.len();

        *self.dataset.write() = Some(Arc::new(index));
        self.engine.update_countries(countries);

        self.event_bus.publish(events::DatasetLoaded {
            source_name: source.source_name().to_string(),
            record_count,
            country_count,
        });
        Ok(())
    }

    /// Whether a dataset index is built and the tour can start
    pub fn is_ready(&self) -> bool {
        self.dataset.read().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nv_data::Record;
    use parking_lot::Mutex;

    struct StubSource {
        records: Vec<Record>,
    }

    #[async_trait]
    impl RecordSource for StubSource {
        async fn load(&self) -> Result<Vec<Record>, DataError> {
            Ok(self.records.clone())
        }

        fn source_name(&self) -> &str {
            "stub"
        }
    }

    fn rec(country: &str, code: &str, year: i32, life: f64, spend: f64) -> Record {
        Record {
            country: country.to_string(),
            location_code: code.to_string(),
            year,
            life_expectancy: life,
            health_expenditure: spend,
        }
    }

    fn sample_records() -> Vec<Record> {
        vec![
            rec("United States", "USA", 1970, 70.8, 330.0),
            rec("United States", "USA", 1971, 71.1, 360.0),
            rec("Germany", "DEU", 1970, 70.6, 270.0),
            rec("Germany", "DEU", 1971, 71.0, 300.0),
        ]
    }

    #[tokio::test]
    async fn test_load_source_arms_the_engine() {
        let state = TourState::new(SlideDeck::standard());
        assert!(!state.is_ready());

        let loaded = Arc::new(Mutex::new(Vec::new()));
        let sink = loaded.clone();
        state
            .event_bus
            .subscribe::<events::DatasetLoaded>(crate::events::handler_from_fn(move |event| {
                if let Some(e) = event.as_any().downcast_ref::<events::DatasetLoaded>() {
                    sink.lock().push((e.record_count, e.country_count));
                }
            }));

        state
            .load_source(Arc::new(StubSource {
                records: sample_records(),
            }))
            .await
            .unwrap();

        assert!(state.is_ready());
        assert!(state.engine.is_ready());
        assert_eq!(*loaded.lock(), vec![(4, 2)]);

        // The engine only offers non-reference countries
        state.engine.go_to(4);
        state.engine.select_country("United States");
        assert_eq!(state.engine.context().unwrap().selected_country, None);
        state.engine.select_country("Germany");
        assert_eq!(
            state.engine.context().unwrap().selected_country,
            Some("Germany".to_string())
        );
    }

    #[tokio::test]
    async fn test_load_source_rejects_malformed_dataset() {
        let state = TourState::new(SlideDeck::standard());

        // Missing the reference country
        let result = state
            .load_source(Arc::new(StubSource {
                records: vec![rec("Germany", "DEU", 1970, 70.6, 270.0)],
            }))
            .await;

        assert!(matches!(result, Err(DataError::MalformedData(_))));
        assert!(!state.is_ready());
        assert!(state.engine.context().is_none());
    }

    #[tokio::test]
    async fn test_reload_restarts_the_tour() {
        let state = TourState::new(SlideDeck::standard());
        state
            .load_source(Arc::new(StubSource {
                records: sample_records(),
            }))
            .await
            .unwrap();

        state.engine.go_to(3);
        assert_eq!(state.engine.context().unwrap().index, 3);

        state
            .load_source(Arc::new(StubSource {
                records: sample_records(),
            }))
            .await
            .unwrap();
        assert!(state.engine.context().is_none());
    }
}
