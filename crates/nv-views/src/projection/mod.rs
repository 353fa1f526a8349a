//! Projection from navigation state to a declarative visual state
//!
//! `project` is a pure function of the dataset, the slide definition,
//! and the selection. The chart adapter only translates its output
//! into plot primitives, which keeps every styling and filtering rule
//! testable without a UI.

use indexmap::IndexMap;

use nv_core::story::{Annotation, SlideDefinition};
use nv_data::{DatasetIndex, Record, REFERENCE_COUNTRY};

/// Fixed x-axis domain: health expenditure per capita, PPP US dollars.
/// Framing stays constant across slides so lines grow into the same
/// space instead of rescaling under the viewer.
pub const HEALTH_EXPENDITURE_DOMAIN: (f64, f64) = (0.0, 12_000.0);

/// Fixed y-axis domain: life expectancy, years
pub const LIFE_EXPECTANCY_DOMAIN: (f64, f64) = (70.0, 85.0);

/// Records below this life expectancy break the plotted line into
/// separate segments instead of being interpolated across
pub const DEFINED_LIFE_EXPECTANCY_MIN: f64 = 70.0;

/// Year labels go on every fifth year of the reference series
const YEAR_LABEL_STEP: i32 = 5;
/// One extra labeled year outside the five-year grid
const YEAR_LABEL_EXTRA: i32 = 2022;
/// Horizontal label offset, data units, left of the point
const YEAR_LABEL_DX: f64 = -420.0;
/// The final label sits on the other side so it clears the line end
const YEAR_LABEL_FINAL_DX: f64 = 360.0;

/// Visual emphasis of one country's line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesEmphasis {
    /// The reference country, always prominent
    Reference,
    /// Highlighted: selected, or hovered on a guided slide
    Active,
    /// Default gray context line on guided slides
    Inactive,
    /// Not drawn at all
    Invisible,
}

/// A data point that gets a hoverable marker
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPoint {
    pub country: String,
    pub year: i32,
    pub life_expectancy: f64,
    pub health_expenditure: f64,
}

impl MarkerPoint {
    fn for_record(record: &Record) -> Self {
        Self {
            country: record.country.clone(),
            year: record.year,
            life_expectancy: record.life_expectancy,
            health_expenditure: record.health_expenditure,
        }
    }

    /// Hover tooltip content
    pub fn tooltip_text(&self) -> String {
        format!(
            "Year {}: {} yrs | {} $",
            self.year, self.life_expectancy, self.health_expenditure
        )
    }

    /// Position in plot coordinates
    pub fn position(&self) -> [f64; 2] {
        [self.health_expenditure, self.life_expectancy]
    }
}

/// A year label along the reference series
#[derive(Debug, Clone, PartialEq)]
pub struct YearLabel {
    pub year: i32,
    /// Anchor, data coordinates
    pub x: f64,
    pub y: f64,
    /// Horizontal offset of the label from its anchor, data units
    pub dx: f64,
}

/// Declarative description of everything the chart shows for one
/// (slide, selection) pair
#[derive(Debug, Clone, PartialEq)]
pub struct VisualState {
    pub slide_index: usize,
    /// Per-country records visible on this slide, first-seen order
    pub visible_series: IndexMap<String, Vec<Record>>,
    line_styles: IndexMap<String, SeriesEmphasis>,
    /// Points that get markers and tooltips
    pub markers: Vec<MarkerPoint>,
    pub year_labels: Vec<YearLabel>,
    pub annotation: Option<Annotation>,
    pub country_picker_visible: bool,
}

impl VisualState {
    /// Emphasis for a country's line; unknown countries are not drawn
    pub fn line_style(&self, country: &str) -> SeriesEmphasis {
        self.line_styles
            .get(country)
            .copied()
            .unwrap_or(SeriesEmphasis::Invisible)
    }
}

/// Compute the visual state for a slide and selection
pub fn project(
    index: &DatasetIndex,
    slide: &SlideDefinition,
    selected: Option<&str>,
) -> VisualState {
    if let Some(country) = selected {
        debug_assert!(
            index.get(country).is_some(),
            "selected country {:?} not in dataset",
            country
        );
    }

    let mut visible_series = IndexMap::new();
    let mut line_styles = IndexMap::new();

    for (country, series) in index.iter() {
        let records: Vec<Record> = match slide.cutoff_year {
            Some(cutoff) => series
                .records()
                .iter()
                .filter(|record| record.year <= cutoff)
                .cloned()
                .collect(),
            None => series.records().to_vec(),
        };

        let style = if country == REFERENCE_COUNTRY {
            SeriesEmphasis::Reference
        } else if !slide.interactive {
            SeriesEmphasis::Inactive
        } else if selected == Some(country) {
            SeriesEmphasis::Active
        } else {
            SeriesEmphasis::Invisible
        };

        line_styles.insert(country.to_string(), style);
        visible_series.insert(country.to_string(), records);
    }

    let markers = if slide.interactive {
        let mut markers: Vec<MarkerPoint> = Vec::new();
        if let Some(records) = visible_series.get(REFERENCE_COUNTRY) {
            markers.extend(records.iter().map(MarkerPoint::for_record));
        }
        if let Some(country) = selected {
            if country != REFERENCE_COUNTRY {
                if let Some(records) = visible_series.get(country) {
                    markers.extend(records.iter().map(MarkerPoint::for_record));
                }
            }
        }
        markers
    } else {
        Vec::new()
    };

    let year_labels = visible_series
        .get(REFERENCE_COUNTRY)
        .map(|records| year_labels_for(records))
        .unwrap_or_default();

    VisualState {
        slide_index: slide.index,
        visible_series,
        line_styles,
        markers,
        year_labels,
        annotation: slide.annotation.clone(),
        country_picker_visible: slide.interactive,
    }
}

/// Labels for every fifth year of the reference series plus the fixed
/// extra year, with the final label flipped to the other side of its
/// point
fn year_labels_for(records: &[Record]) -> Vec<YearLabel> {
    let mut labels: Vec<YearLabel> = records
        .iter()
        .filter(|record| record.year % YEAR_LABEL_STEP == 0 || record.year == YEAR_LABEL_EXTRA)
        .map(|record| YearLabel {
            year: record.year,
            x: record.health_expenditure,
            y: record.life_expectancy,
            dx: YEAR_LABEL_DX,
        })
        .collect();
    if let Some(last) = labels.last_mut() {
        last.dx = YEAR_LABEL_FINAL_DX;
    }
    labels
}

/// Split a series into line segments of defined points.
///
/// A record below the defined minimum breaks the line rather than being
/// interpolated across; markers and visibility are unaffected.
pub fn defined_segments(records: &[Record]) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    for record in records {
        if record.life_expectancy >= DEFINED_LIFE_EXPECTANCY_MIN {
            current.push([record.health_expenditure, record.life_expectancy]);
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use nv_core::SlideDeck;

    fn rec(country: &str, code: &str, year: i32, life: f64, spend: f64) -> Record {
        Record {
            country: country.to_string(),
            location_code: code.to_string(),
            year,
            life_expectancy: life,
            health_expenditure: spend,
        }
    }

    /// US and Germany, annual records 1970..=2022
    fn sample_index() -> DatasetIndex {
        let mut records = Vec::new();
        for year in 1970..=2022 {
            let t = (year - 1970) as f64;
            records.push(rec("United States", "USA", year, 70.8 + t * 0.12, 330.0 + t * 210.0));
            records.push(rec("Germany", "DEU", year, 70.6 + t * 0.2, 270.0 + t * 120.0));
        }
        DatasetIndex::build(records).unwrap()
    }

    fn guided_slide(cutoff: Option<i32>) -> SlideDefinition {
        SlideDefinition {
            index: 1,
            title: "Guided".to_string(),
            body: "Guided slide".to_string(),
            cutoff_year: cutoff,
            annotation: None,
            interactive: false,
        }
    }

    fn interactive_slide() -> SlideDefinition {
        SlideDefinition {
            index: 4,
            title: "Explore".to_string(),
            body: "Interactive slide".to_string(),
            cutoff_year: None,
            annotation: None,
            interactive: true,
        }
    }

    #[test]
    fn test_cutoff_filters_every_series() {
        let index = sample_index();
        let visual = project(&index, &guided_slide(Some(1979)), None);

        for records in visual.visible_series.values() {
            assert_eq!(records.len(), 10);
            assert!(records.iter().all(|record| record.year <= 1979));
        }
    }

    #[test]
    fn test_no_cutoff_shows_full_series() {
        let index = sample_index();
        let visual = project(&index, &interactive_slide(), None);
        for records in visual.visible_series.values() {
            assert_eq!(records.len(), 53);
        }
    }

    #[test]
    fn test_guided_slide_styles() {
        let index = sample_index();
        let visual = project(&index, &guided_slide(Some(2000)), None);

        assert_eq!(visual.line_style("United States"), SeriesEmphasis::Reference);
        assert_eq!(visual.line_style("Germany"), SeriesEmphasis::Inactive);
        assert_eq!(visual.line_style("Atlantis"), SeriesEmphasis::Invisible);
        assert!(!visual.country_picker_visible);
        assert!(visual.markers.is_empty());
    }

    #[test]
    fn test_interactive_slide_styles() {
        let index = sample_index();

        let nothing_selected = project(&index, &interactive_slide(), None);
        assert_eq!(
            nothing_selected.line_style("United States"),
            SeriesEmphasis::Reference
        );
        assert_eq!(nothing_selected.line_style("Germany"), SeriesEmphasis::Invisible);
        assert!(nothing_selected.country_picker_visible);

        let germany_selected = project(&index, &interactive_slide(), Some("Germany"));
        assert_eq!(germany_selected.line_style("Germany"), SeriesEmphasis::Active);
    }

    #[test]
    fn test_markers_cover_reference_and_selection() {
        let index = sample_index();

        let nothing_selected = project(&index, &interactive_slide(), None);
        assert_eq!(nothing_selected.markers.len(), 53);
        assert!(nothing_selected
            .markers
            .iter()
            .all(|marker| marker.country == "United States"));

        let germany_selected = project(&index, &interactive_slide(), Some("Germany"));
        assert_eq!(germany_selected.markers.len(), 106);

        let german_markers = germany_selected
            .markers
            .iter()
            .filter(|marker| marker.country == "Germany")
            .count();
        assert_eq!(german_markers, 53);
    }

    #[test]
    fn test_switching_selection_replaces_markers() {
        let mut records = Vec::new();
        for year in 1970..=1979 {
            let t = (year - 1970) as f64;
            records.push(rec("United States", "USA", year, 70.8 + t * 0.1, 330.0 + t * 50.0));
            records.push(rec("Germany", "DEU", year, 70.6 + t * 0.1, 270.0 + t * 40.0));
            records.push(rec("France", "FRA", year, 72.2 + t * 0.1, 250.0 + t * 40.0));
        }
        let index = DatasetIndex::build(records).unwrap();

        let france_selected = project(&index, &interactive_slide(), Some("France"));
        assert!(france_selected
            .markers
            .iter()
            .all(|marker| marker.country != "Germany"));
        assert!(france_selected
            .markers
            .iter()
            .any(|marker| marker.country == "France"));
    }

    #[test]
    fn test_tooltip_format() {
        let marker = MarkerPoint {
            country: "Germany".to_string(),
            year: 2000,
            life_expectancy: 78.3,
            health_expenditure: 2547.0,
        };
        assert_eq!(marker.tooltip_text(), "Year 2000: 78.3 yrs | 2547 $");
    }

    #[test]
    fn test_year_labels_every_fifth_year_plus_extra() {
        let index = sample_index();
        let visual = project(&index, &interactive_slide(), None);

        let years: Vec<i32> = visual.year_labels.iter().map(|label| label.year).collect();
        let mut expected: Vec<i32> = (1970..=2020).step_by(5).collect();
        expected.push(2022);
        assert_eq!(years, expected);
    }

    #[test]
    fn test_final_year_label_offset_flips() {
        let index = sample_index();
        let visual = project(&index, &interactive_slide(), None);

        let labels = &visual.year_labels;
        assert!(labels.last().map(|label| label.dx > 0.0).unwrap_or(false));
        assert!(labels[..labels.len() - 1]
            .iter()
            .all(|label| label.dx < 0.0));
    }

    #[test]
    fn test_year_labels_respect_cutoff() {
        let index = sample_index();
        let visual = project(&index, &guided_slide(Some(1979)), None);

        let years: Vec<i32> = visual.year_labels.iter().map(|label| label.year).collect();
        assert_eq!(years, vec![1970, 1975]);
        // The last visible label takes the flipped offset
        assert!(visual.year_labels[1].dx > 0.0);
    }

    #[test]
    fn test_defined_segments_split_on_low_values() {
        let records = vec![
            rec("X", "XXX", 1970, 71.0, 100.0),
            rec("X", "XXX", 1971, 72.0, 200.0),
            rec("X", "XXX", 1972, 65.0, 300.0),
            rec("X", "XXX", 1973, 73.0, 400.0),
            rec("X", "XXX", 1974, 74.0, 500.0),
        ];
        let segments = defined_segments(&records);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], vec![[100.0, 71.0], [200.0, 72.0]]);
        assert_eq!(segments[1], vec![[400.0, 73.0], [500.0, 74.0]]);
    }

    #[test]
    fn test_defined_segments_whole_series_defined() {
        let records = vec![
            rec("X", "XXX", 1970, 71.0, 100.0),
            rec("X", "XXX", 1971, 72.0, 200.0),
        ];
        let segments = defined_segments(&records);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].len(), 2);
    }

    #[test]
    fn test_defined_segments_nothing_defined() {
        let records = vec![rec("X", "XXX", 1970, 60.0, 100.0)];
        assert!(defined_segments(&records).is_empty());
    }

    #[test]
    fn test_projection_is_deterministic() {
        let index = sample_index();
        let slide = guided_slide(Some(2000));
        assert_eq!(project(&index, &slide, None), project(&index, &slide, None));
    }

    #[test]
    fn test_standard_deck_walkthrough() {
        let index = sample_index();
        let deck = SlideDeck::standard();

        let opening = project(&index, deck.get(1).unwrap(), None);
        assert_eq!(opening.slide_index, 1);
        assert!(opening.visible_series["Germany"]
            .iter()
            .all(|record| record.year <= 1979));
        assert_eq!(opening.line_style("Germany"), SeriesEmphasis::Inactive);
        assert!(opening.markers.is_empty());
        assert!(opening.annotation.is_some());

        let finale = project(&index, deck.get(4).unwrap(), Some("Germany"));
        assert_eq!(finale.line_style("Germany"), SeriesEmphasis::Active);
        assert_eq!(finale.markers.len(), 106);
        assert!(finale.country_picker_visible);
        assert!(finale.annotation.is_none());
    }
}
