//! Country-indexed dataset
//!
//! Built once after loading and shared read-only with the views.

use ahash::AHashMap;
use indexmap::IndexMap;

use crate::record::{Record, REFERENCE_COUNTRY};
use crate::DataError;

/// One country's observations, ordered by year ascending
#[derive(Debug, Clone)]
pub struct Series {
    country: String,
    location_code: String,
    records: Vec<Record>,
}

impl Series {
    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn location_code(&self) -> &str {
        &self.location_code
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest observed year. Series are never built empty.
    pub fn first_year(&self) -> i32 {
        self.records.first().map(|r| r.year).unwrap_or_default()
    }

    /// Latest observed year
    pub fn last_year(&self) -> i32 {
        self.records.last().map(|r| r.year).unwrap_or_default()
    }
}

/// Lookup from country name to its time series.
///
/// Iteration yields countries in the order they first appeared in the
/// input, so a dataset always renders the same way.
#[derive(Debug)]
pub struct DatasetIndex {
    series: IndexMap<String, Series>,
    record_count: usize,
}

impl DatasetIndex {
    /// Build the index from loaded records.
    ///
    /// Fails when the record contract is violated: duplicate
    /// (country, year) pairs, a location code that is not one-to-one
    /// with its country, or a missing reference country.
    pub fn build(records: Vec<Record>) -> Result<Self, DataError> {
        if records.is_empty() {
            return Err(DataError::MalformedData("no records in input".to_string()));
        }

        let record_count = records.len();
        let mut series: IndexMap<String, Series> = IndexMap::new();
        let mut code_owners: AHashMap<String, String> = AHashMap::new();

        for record in records {
            match code_owners.get(&record.location_code) {
                Some(owner) if owner != &record.country => {
                    return Err(DataError::MalformedData(format!(
                        "location code {} used by both {} and {}",
                        record.location_code, owner, record.country
                    )));
                }
                None => {
                    code_owners.insert(record.location_code.clone(), record.country.clone());
                }
                _ => {}
            }

            let entry = series.entry(record.country.clone()).or_insert_with(|| Series {
                country: record.country.clone(),
                location_code: record.location_code.clone(),
                records: Vec::new(),
            });
            if entry.location_code != record.location_code {
                return Err(DataError::MalformedData(format!(
                    "{} has conflicting location codes {} and {}",
                    record.country, entry.location_code, record.location_code
                )));
            }
            entry.records.push(record);
        }

        for s in series.values_mut() {
            s.records.sort_by_key(|r| r.year);
            if let Some(pair) = s.records.windows(2).find(|pair| pair[0].year == pair[1].year) {
                return Err(DataError::MalformedData(format!(
                    "duplicate year {} for {}",
                    pair[0].year, s.country
                )));
            }
        }

        if !series.contains_key(REFERENCE_COUNTRY) {
            return Err(DataError::MalformedData(format!(
                "reference country {:?} missing from dataset",
                REFERENCE_COUNTRY
            )));
        }

        Ok(Self {
            series,
            record_count,
        })
    }

    /// Get one country's series
    pub fn get(&self, country: &str) -> Option<&Series> {
        self.series.get(country)
    }

    /// The reference country's series, guaranteed present after build
    pub fn reference(&self) -> &Series {
        self.series
            .get(REFERENCE_COUNTRY)
            .expect("reference country validated at build")
    }

    /// Country names in first-seen order, minus the given exclusions
    pub fn list_countries(&self, excluding: &[&str]) -> Vec<&str> {
        self.series
            .keys()
            .map(|name| name.as_str())
            .filter(|name| !excluding.contains(name))
            .collect()
    }

    /// Iterate countries with their series, in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Series)> {
        self.series.iter().map(|(name, series)| (name.as_str(), series))
    }

    /// Number of countries
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Total number of records across all series
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Earliest and latest year across all series
    pub fn year_range(&self) -> (i32, i32) {
        let mut min = i32::MAX;
        let mut max = i32::MIN;
        for series in self.series.values() {
            min = min.min(series.first_year());
            max = max.max(series.last_year());
        }
        (min, max)
    }
}
