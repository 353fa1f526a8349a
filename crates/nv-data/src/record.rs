//! Record types for the health expenditure dataset

use serde::Deserialize;

use crate::DataError;

/// Display name of the reference country. Every valid dataset contains
/// it, and it is always drawn with reference styling.
pub const REFERENCE_COUNTRY: &str = "United States";

/// Years outside this window are treated as corrupt input
const YEAR_RANGE: (i32, i32) = (1900, 2100);

/// One CSV row as it appears on disk, before numeric coercion
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Country")]
    pub country: String,

    #[serde(rename = "LOCATION")]
    pub location_code: String,

    #[serde(rename = "Year")]
    pub year: String,

    #[serde(rename = "Life Expectancy")]
    pub life_expectancy: String,

    #[serde(rename = "Health Expenditure")]
    pub health_expenditure: String,
}

/// One (country, year) observation with typed fields
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Country display name
    pub country: String,
    /// Short country code, used to address rendered groups
    pub location_code: String,
    pub year: i32,
    /// Life expectancy at birth, years
    pub life_expectancy: f64,
    /// Health expenditure per capita, PPP US dollars
    pub health_expenditure: f64,
}

impl Record {
    /// Coerce a raw CSV row into a typed record
    pub fn from_raw(raw: &RawRecord) -> Result<Self, DataError> {
        let country = non_empty(&raw.country, "Country")?;
        let location_code = non_empty(&raw.location_code, "LOCATION")?;
        let year = parse_year(&raw.year, country)?;
        let life_expectancy = parse_numeric(&raw.life_expectancy, "Life Expectancy", country, year)?;
        let health_expenditure =
            parse_numeric(&raw.health_expenditure, "Health Expenditure", country, year)?;

        Ok(Self {
            country: country.to_string(),
            location_code: location_code.to_string(),
            year,
            life_expectancy,
            health_expenditure,
        })
    }
}

fn non_empty<'a>(value: &'a str, column: &str) -> Result<&'a str, DataError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DataError::MalformedData(format!("empty {} field", column)));
    }
    Ok(trimmed)
}

fn parse_year(value: &str, country: &str) -> Result<i32, DataError> {
    let year = value.trim().parse::<i32>().map_err(|_| {
        DataError::MalformedData(format!("non-numeric Year {:?} for {}", value, country))
    })?;
    if !(YEAR_RANGE.0..=YEAR_RANGE.1).contains(&year) {
        return Err(DataError::MalformedData(format!(
            "Year {} out of range for {}",
            year, country
        )));
    }
    Ok(year)
}

fn parse_numeric(value: &str, column: &str, country: &str, year: i32) -> Result<f64, DataError> {
    let parsed = value.trim().parse::<f64>().map_err(|_| {
        DataError::MalformedData(format!(
            "non-numeric {} {:?} for {} {}",
            column, value, country, year
        ))
    })?;
    if !parsed.is_finite() {
        return Err(DataError::MalformedData(format!(
            "non-finite {} for {} {}",
            column, country, year
        )));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(country: &str, code: &str, year: &str, life: &str, spend: &str) -> RawRecord {
        RawRecord {
            country: country.to_string(),
            location_code: code.to_string(),
            year: year.to_string(),
            life_expectancy: life.to_string(),
            health_expenditure: spend.to_string(),
        }
    }

    #[test]
    fn test_from_raw() {
        let record = Record::from_raw(&raw("Germany", "DEU", "2000", "78.3", "2547.6")).unwrap();
        assert_eq!(record.country, "Germany");
        assert_eq!(record.location_code, "DEU");
        assert_eq!(record.year, 2000);
        assert_eq!(record.life_expectancy, 78.3);
        assert_eq!(record.health_expenditure, 2547.6);
    }

    #[test]
    fn test_from_raw_trims_whitespace() {
        let record = Record::from_raw(&raw(" Germany ", " DEU", " 2000 ", "78.3 ", " 2547.6")).unwrap();
        assert_eq!(record.country, "Germany");
        assert_eq!(record.year, 2000);
    }

    #[test]
    fn test_empty_field_is_malformed() {
        let result = Record::from_raw(&raw("", "DEU", "2000", "78.3", "2547.6"));
        assert!(matches!(result, Err(DataError::MalformedData(_))));

        let result = Record::from_raw(&raw("Germany", "  ", "2000", "78.3", "2547.6"));
        assert!(matches!(result, Err(DataError::MalformedData(_))));
    }

    #[test]
    fn test_non_numeric_year_is_malformed() {
        let result = Record::from_raw(&raw("Germany", "DEU", "n/a", "78.3", "2547.6"));
        assert!(matches!(result, Err(DataError::MalformedData(_))));
    }

    #[test]
    fn test_year_out_of_range_is_malformed() {
        let result = Record::from_raw(&raw("Germany", "DEU", "200", "78.3", "2547.6"));
        assert!(matches!(result, Err(DataError::MalformedData(_))));
    }

    #[test]
    fn test_non_finite_value_is_malformed() {
        let result = Record::from_raw(&raw("Germany", "DEU", "2000", "NaN", "2547.6"));
        assert!(matches!(result, Err(DataError::MalformedData(_))));

        let result = Record::from_raw(&raw("Germany", "DEU", "2000", "78.3", "inf"));
        assert!(matches!(result, Err(DataError::MalformedData(_))));
    }

    #[test]
    fn test_non_numeric_expenditure_is_malformed() {
        let result = Record::from_raw(&raw("Germany", "DEU", "2000", "78.3", "2,547"));
        assert!(matches!(result, Err(DataError::MalformedData(_))));
    }
}
