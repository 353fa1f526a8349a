//! Synthetic demo dataset
//!
//! Used when no CSV file is configured, so the tour always has
//! something to show. The trajectories are deterministic and loosely
//! shaped after OECD health statistics.

use async_trait::async_trait;

use nv_data::{DataError, Record, RecordSource};

const FIRST_YEAR: i32 = 1970;
const LAST_YEAR: i32 = 2022;

/// Shape parameters for one synthetic country
struct CountryProfile {
    name: &'static str,
    code: &'static str,
    /// Life expectancy at the first year
    life_start: f64,
    /// Life expectancy approached by the last year
    life_end: f64,
    /// Health expenditure at the first year
    spend_start: f64,
    /// Health expenditure at the last year
    spend_end: f64,
    /// Year after which life expectancy stalls and slips, if any
    plateau_after: Option<i32>,
}

/// Demo data source generating deterministic synthetic records
pub struct DemoSource {
    countries: Vec<CountryProfile>,
}

impl DemoSource {
    pub fn new() -> Self {
        Self {
            countries: vec![
                CountryProfile {
                    name: "United States",
                    code: "USA",
                    life_start: 70.8,
                    life_end: 79.3,
                    spend_start: 330.0,
                    spend_end: 11_300.0,
                    plateau_after: Some(2012),
                },
                CountryProfile {
                    name: "Germany",
                    code: "DEU",
                    life_start: 70.6,
                    life_end: 81.0,
                    spend_start: 270.0,
                    spend_end: 6_600.0,
                    plateau_after: None,
                },
                CountryProfile {
                    name: "France",
                    code: "FRA",
                    life_start: 72.2,
                    life_end: 82.4,
                    spend_start: 250.0,
                    spend_end: 5_700.0,
                    plateau_after: None,
                },
                CountryProfile {
                    name: "Japan",
                    code: "JPN",
                    life_start: 72.0,
                    life_end: 84.4,
                    spend_start: 150.0,
                    spend_end: 4_900.0,
                    plateau_after: None,
                },
                CountryProfile {
                    name: "Canada",
                    code: "CAN",
                    life_start: 72.7,
                    life_end: 82.0,
                    spend_start: 290.0,
                    spend_end: 6_300.0,
                    plateau_after: None,
                },
                CountryProfile {
                    name: "United Kingdom",
                    code: "GBR",
                    life_start: 71.8,
                    life_end: 80.9,
                    spend_start: 220.0,
                    spend_end: 5_500.0,
                    plateau_after: None,
                },
                CountryProfile {
                    name: "Italy",
                    code: "ITA",
                    life_start: 71.6,
                    life_end: 82.9,
                    spend_start: 200.0,
                    spend_end: 4_300.0,
                    plateau_after: None,
                },
                CountryProfile {
                    name: "Australia",
                    code: "AUS",
                    life_start: 71.0,
                    life_end: 83.1,
                    spend_start: 250.0,
                    spend_end: 6_200.0,
                    plateau_after: None,
                },
                CountryProfile {
                    name: "Netherlands",
                    code: "NLD",
                    life_start: 73.6,
                    life_end: 81.7,
                    spend_start: 280.0,
                    spend_end: 6_700.0,
                    plateau_after: None,
                },
                CountryProfile {
                    name: "Sweden",
                    code: "SWE",
                    life_start: 74.7,
                    life_end: 83.1,
                    spend_start: 310.0,
                    spend_end: 6_400.0,
                    plateau_after: None,
                },
                CountryProfile {
                    name: "Switzerland",
                    code: "CHE",
                    life_start: 73.0,
                    life_end: 83.9,
                    spend_start: 350.0,
                    spend_end: 8_000.0,
                    plateau_after: None,
                },
            ],
        }
    }

    fn generate(&self) -> Vec<Record> {
        let mut records = Vec::new();
        for profile in &self.countries {
            for year in FIRST_YEAR..=LAST_YEAR {
                let mut life = life_curve(profile, year);
                if let Some(plateau) = profile.plateau_after {
                    if year > plateau {
                        life = life_curve(profile, plateau) - (year - plateau) as f64 * 0.05;
                    }
                }
                let spend = spend_curve(profile, year);
                records.push(Record {
                    country: profile.name.to_string(),
                    location_code: profile.code.to_string(),
                    year,
                    life_expectancy: round1(life),
                    health_expenditure: round1(spend),
                });
            }
        }
        records
    }
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Smooth gains early, tapering toward the end of the series
fn life_curve(profile: &CountryProfile, year: i32) -> f64 {
    let t = (year - FIRST_YEAR) as f64 / (LAST_YEAR - FIRST_YEAR) as f64;
    profile.life_start + (profile.life_end - profile.life_start) * smoothstep(t)
}

/// Roughly exponential spending growth
fn spend_curve(profile: &CountryProfile, year: i32) -> f64 {
    let t = (year - FIRST_YEAR) as f64 / (LAST_YEAR - FIRST_YEAR) as f64;
    profile.spend_start * (profile.spend_end / profile.spend_start).powf(t)
}

fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[async_trait]
impl RecordSource for DemoSource {
    async fn load(&self) -> Result<Vec<Record>, DataError> {
        Ok(self.generate())
    }

    fn source_name(&self) -> &str {
        "synthetic demo data"
    }
}
