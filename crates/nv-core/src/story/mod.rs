//! The slide deck
//!
//! Slides are static descriptors. Everything the chart does on a given
//! slide (visible year range, annotation, interactivity) is driven by
//! these fields rather than hard-coded per slide index.

/// A callout anchored to a chart position
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub title: String,
    pub body: String,
    /// Anchor, data coordinates: health expenditure
    pub x: f64,
    /// Anchor, data coordinates: life expectancy
    pub y: f64,
    /// Label offset from the anchor, data units
    pub dx: f64,
    pub dy: f64,
}

/// One slide of the tour
#[derive(Debug, Clone)]
pub struct SlideDefinition {
    /// 1-based slide number
    pub index: usize,
    pub title: String,
    pub body: String,
    /// Latest visible year; None shows the full range
    pub cutoff_year: Option<i32>,
    pub annotation: Option<Annotation>,
    /// Whether this slide offers the country comparison controls
    pub interactive: bool,
}

/// The ordered slides of the tour
#[derive(Debug, Clone)]
pub struct SlideDeck {
    slides: Vec<SlideDefinition>,
}

impl SlideDeck {
    pub fn new(slides: Vec<SlideDefinition>) -> Self {
        Self { slides }
    }

    /// The built-in four-slide narrative
    pub fn standard() -> Self {
        Self::new(vec![
            SlideDefinition {
                index: 1,
                title: "A Fair Start: The 1970s".to_string(),
                body: "In 1970 the United States spent about as much on health care as \
                       other wealthy countries, and its citizens lived about as long. \
                       Through the decade the pack moved together: spending crept up \
                       everywhere, and life expectancy climbed past 72 years."
                    .to_string(),
                cutoff_year: Some(1979),
                annotation: Some(Annotation {
                    title: "The pack moves together".to_string(),
                    body: "Through 1979, US spending and life span track its peers closely."
                        .to_string(),
                    x: 650.0,
                    y: 72.5,
                    dx: 2000.0,
                    dy: 2.0,
                }),
                interactive: false,
            },
            SlideDefinition {
                index: 2,
                title: "The Great Divergence".to_string(),
                body: "During the 1980s and 1990s, American health spending pulled away \
                       from every other rich country, roughly doubling the OECD average \
                       by 2000. Life expectancy kept rising, but no faster than in \
                       countries spending half as much."
                    .to_string(),
                cutoff_year: Some(2000),
                annotation: Some(Annotation {
                    title: "Spending pulls away".to_string(),
                    body: "By 2000 the US spends roughly twice the rich-country average \
                           per person."
                        .to_string(),
                    x: 3500.0,
                    y: 76.0,
                    dx: 2500.0,
                    dy: -1.8,
                }),
                interactive: false,
            },
            SlideDefinition {
                index: 3,
                title: "Paying More, Living Less".to_string(),
                body: "By the 2010s the gap had become a chasm. The United States spends \
                       more per person than any other country, yet American life \
                       expectancy has stalled and now trails every wealthy peer."
                    .to_string(),
                cutoff_year: Some(2021),
                annotation: Some(Annotation {
                    title: "The chasm".to_string(),
                    body: "Highest spending in the world, shortest lives among rich \
                           countries."
                        .to_string(),
                    x: 10500.0,
                    y: 77.0,
                    dx: -3300.0,
                    dy: -3.5,
                }),
                interactive: false,
            },
            SlideDefinition {
                index: 4,
                title: "Explore the Data".to_string(),
                body: "Pick any country to compare its path with the United States, and \
                       hover over the dots for the exact numbers behind each year."
                    .to_string(),
                cutoff_year: None,
                annotation: None,
                interactive: true,
            },
        ])
    }

    /// Get a slide by its 1-based index
    pub fn get(&self, index: usize) -> Option<&SlideDefinition> {
        if index == 0 {
            return None;
        }
        self.slides.get(index - 1)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[SlideDefinition] {
        &self.slides
    }
}
