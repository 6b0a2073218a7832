use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Aggregate describing one cruise/site, discovered during ingestion.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Site {
    #[validate(length(min = 1))]
    pub name: String,

    pub aeronet_number: i64,

    pub description: String,

    /// [earliest, latest] observation dates over the site's persisted
    /// daily level-1.5 measurements; `None` until the first load lands.
    pub span_date: Option<(NaiveDate, NaiveDate)>,
}

impl Site {
    /// A freshly discovered site carries a placeholder description until
    /// curated by hand.
    pub fn discovered(name: String, aeronet_number: i64) -> Self {
        Self {
            name,
            aeronet_number,
            description: "?".to_string(),
            span_date: None,
        }
    }

    /// True when the site's date span intersects [window_start, window_end].
    pub fn span_overlaps(&self, window_start: NaiveDate, window_end: NaiveDate) -> bool {
        match self.span_date {
            Some((start, end)) => start <= window_end && end >= window_start,
            None => false,
        }
    }
}
